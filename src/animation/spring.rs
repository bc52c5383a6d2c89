use crate::foundation::core::Fps;
use crate::foundation::error::{SegueError, SegueResult};

/// Upper bound for [`measure_spring`]; springs that have not settled by then are reported as
/// never settling.
pub const MAX_SPRING_FRAMES: u64 = 100_000;

/// Damped harmonic oscillator parameters for a `0 -> 1` step response.
///
/// The response is evaluated in closed form at continuous time `frame / fps`, so a spring has
/// no per-frame state. Underdamped springs overshoot 1 before settling unless
/// [`overshoot_clamping`](Self::overshoot_clamping) is set.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Spring constant `k`.
    pub stiffness: f64,
    /// Damping coefficient `c`.
    pub damping: f64,
    /// Mass `m`.
    pub mass: f64,
    /// Cap the output at 1 instead of overshooting.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Reject non-finite values, non-positive stiffness/mass and negative damping.
    pub fn validate(&self) -> SegueResult<()> {
        let finite =
            self.stiffness.is_finite() && self.damping.is_finite() && self.mass.is_finite();
        if !finite {
            return Err(SegueError::validation("spring parameters must be finite"));
        }
        if self.stiffness <= 0.0 {
            return Err(SegueError::validation("spring stiffness must be > 0"));
        }
        if self.mass <= 0.0 {
            return Err(SegueError::validation("spring mass must be > 0"));
        }
        if self.damping < 0.0 {
            return Err(SegueError::validation("spring damping must be >= 0"));
        }
        Ok(())
    }

    /// Damping ratio `zeta`; `< 1` oscillates, `1` is critical, `> 1` is overdamped.
    pub fn damping_ratio(&self) -> f64 {
        let k = self.stiffness.max(0.0);
        let m = self.mass.max(1e-9);
        self.damping.max(0.0) / (2.0 * (k * m).sqrt()).max(1e-9)
    }

    /// Step response at `secs` seconds after release.
    pub fn value_at_secs(&self, secs: f64) -> f64 {
        let v = spring_step(secs.max(0.0), self.stiffness, self.damping, self.mass);
        if self.overshoot_clamping {
            v.min(1.0)
        } else {
            v
        }
    }

    /// Step response at an integer frame offset.
    pub fn value_at_frame(&self, frame: u64, fps: Fps) -> f64 {
        self.value_at_secs(fps.frames_to_secs(frame))
    }

    /// Upper bound on `|1 - x(t)|` for all times `>= secs`, non-increasing in `secs`.
    fn deviation_envelope(&self, secs: f64) -> f64 {
        let k = self.stiffness.max(0.0);
        let m = self.mass.max(1e-9);
        let w0 = (k / m).sqrt();
        let zeta = self.damping_ratio();
        if zeta < 1.0 - 1e-6 {
            let amp = (1.0 + zeta * zeta / (1.0 - zeta * zeta)).sqrt();
            amp * (-zeta * w0 * secs).exp()
        } else {
            // Critically and overdamped responses approach 1 monotonically.
            (1.0 - spring_step(secs, self.stiffness, self.damping, self.mass)).abs()
        }
    }
}

/// Number of frames after which `config` stays within `threshold` of its rest value 1.
///
/// Returns `None` for springs that do not settle within [`MAX_SPRING_FRAMES`] (for example
/// zero damping) or for a non-positive threshold. Use the result as a hard cutoff, or as
/// the transition duration for spring-timed transitions.
pub fn measure_spring(config: &SpringConfig, fps: Fps, threshold: f64) -> Option<u64> {
    if threshold.is_nan() || threshold <= 0.0 || config.validate().is_err() {
        return None;
    }

    // Find a frame where the envelope guarantees the curve can no longer leave the band...
    let mut settled = None;
    let mut step = 1u64;
    let mut f = 0u64;
    while f <= MAX_SPRING_FRAMES {
        if config.deviation_envelope(fps.frames_to_secs(f)) <= threshold {
            settled = Some(f);
            break;
        }
        f = f.saturating_add(step);
        step = (step * 2).min(256);
    }
    let mut f = settled?;

    // ...then walk back to the first frame of the final in-band run.
    while f > 0 && (1.0 - config.value_at_frame(f - 1, fps)).abs() <= threshold {
        f -= 1;
    }
    Some(f)
}

fn spring_step(t: f64, stiffness: f64, damping: f64, mass: f64) -> f64 {
    // Step response from 0 to 1 with x(0)=0, v(0)=0.
    let k = stiffness.max(0.0);
    let c = damping.max(0.0);
    let m = mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return t;
    }
    let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped.
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        // Underdamped.
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let c1 = (wd * t).cos();
        let s1 = (wd * t).sin();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * (c1 + k * s1)
    } else {
        // Overdamped.
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;

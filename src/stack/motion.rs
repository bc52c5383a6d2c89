use crate::{
    animation::ease::Ease,
    effects::style::StyleDescriptor,
    foundation::core::Vec2,
    foundation::error::{SegueError, SegueResult},
};

/// Intra-scene content animation driven only by the scene's local frame.
///
/// Motion runs over the whole scene: `local_frame == 0` samples the start value and the last
/// frame (`duration - 1`) samples the end value, independent of any transition.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum ContentMotion {
    /// Static content.
    #[default]
    None,
    /// Fade up from black over `in_frames` and back down over the final `out_frames`.
    Fade {
        /// Frames to reach full opacity; `0` starts fully visible.
        in_frames: u64,
        /// Frames to fade out before the scene ends; `0` ends fully visible.
        out_frames: u64,
    },
    /// Uniform scale from `from` to `to`.
    Zoom {
        /// Scale at the first frame.
        from: f64,
        /// Scale at the last frame.
        to: f64,
        /// Curve applied to scene progress.
        #[serde(default = "default_ease")]
        ease: Ease,
    },
    /// Pan between two offsets, in fractions of the canvas.
    Drift {
        /// Offset at the first frame.
        from: Vec2,
        /// Offset at the last frame.
        to: Vec2,
        /// Curve applied to scene progress.
        #[serde(default = "default_ease")]
        ease: Ease,
    },
    /// Combined zoom and pan.
    KenBurns {
        /// Scale at the first frame.
        from_scale: f64,
        /// Scale at the last frame.
        to_scale: f64,
        /// Offset at the first frame.
        from: Vec2,
        /// Offset at the last frame.
        to: Vec2,
        /// Curve applied to scene progress.
        #[serde(default = "default_ease")]
        ease: Ease,
    },
}

fn default_ease() -> Ease {
    Ease::Linear
}

impl ContentMotion {
    /// Reject non-finite values and non-positive scales.
    pub fn validate(&self) -> SegueResult<()> {
        match *self {
            Self::None | Self::Fade { .. } => Ok(()),
            Self::Zoom { from, to, .. } => validate_scales("zoom", from, to),
            Self::Drift { from, to, .. } => validate_offsets("drift", from, to),
            Self::KenBurns {
                from_scale,
                to_scale,
                from,
                to,
                ..
            } => {
                validate_scales("ken_burns", from_scale, to_scale)?;
                validate_offsets("ken_burns", from, to)
            }
        }
    }

    /// Content style at `local_frame` of a scene `duration_frames` long.
    pub fn style(&self, local_frame: u64, duration_frames: u64) -> StyleDescriptor {
        let last = duration_frames.saturating_sub(1);
        let local = local_frame.min(last);
        let t = if last == 0 {
            0.0
        } else {
            local as f64 / last as f64
        };

        match *self {
            Self::None => StyleDescriptor::identity(),
            Self::Fade {
                in_frames,
                out_frames,
            } => {
                let fade_in = ramp(local, in_frames);
                let fade_out = ramp(last - local, out_frames);
                StyleDescriptor::with_opacity(fade_in.min(fade_out))
            }
            Self::Zoom { from, to, ease } => StyleDescriptor {
                scale: lerp(from, to, ease.apply(t)),
                ..StyleDescriptor::identity()
            },
            Self::Drift { from, to, ease } => StyleDescriptor {
                translate: from.lerp(to, ease.apply(t)),
                ..StyleDescriptor::identity()
            },
            Self::KenBurns {
                from_scale,
                to_scale,
                from,
                to,
                ease,
            } => {
                let e = ease.apply(t);
                StyleDescriptor {
                    scale: lerp(from_scale, to_scale, e),
                    translate: from.lerp(to, e),
                    ..StyleDescriptor::identity()
                }
            }
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// `0` at `frames_in == 0`, `1` once `frames_in >= frames`.
fn ramp(frames_in: u64, frames: u64) -> f64 {
    if frames == 0 || frames_in >= frames {
        1.0
    } else {
        frames_in as f64 / frames as f64
    }
}

fn validate_scales(kind: &str, from: f64, to: f64) -> SegueResult<()> {
    if !(from.is_finite() && to.is_finite()) || from <= 0.0 || to <= 0.0 {
        return Err(SegueError::validation(format!(
            "{kind} scales must be finite and > 0"
        )));
    }
    Ok(())
}

fn validate_offsets(kind: &str, from: Vec2, to: Vec2) -> SegueResult<()> {
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return Err(SegueError::validation(format!(
            "{kind} offsets must be finite"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/stack/motion.rs"]
mod tests;

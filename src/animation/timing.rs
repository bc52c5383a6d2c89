use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::animation::spring::SpringConfig;
use crate::foundation::core::Fps;
use crate::foundation::error::{SegueError, SegueResult};

/// Maps a frame offset inside a window of `duration_frames` to a progress value.
///
/// Every variant returns exactly `0.0` for offsets `<= 0` and exactly `1.0` for offsets
/// `>= duration_frames`. Between those, eased curves may overshoot (see [`Ease`]) and springs
/// may not have reached 1 yet. Output is never clamped.
///
/// JSON forms: `"linear"`, any [`Ease::from_name`] name (`"out_cubic"`, `"ease_in_out"`, ...),
/// `{"cubic_bezier": [x1, y1, x2, y2]}` and `{"spring": {"stiffness": .., "damping": ..,
/// "mass": ..}}`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Timing {
    /// `offset / duration`.
    #[default]
    Linear,
    /// An easing curve applied to `offset / duration`.
    Eased(Ease),
    /// Damped spring evaluated at `offset / fps` seconds. The window end still snaps to 1.
    Spring(SpringConfig),
}

impl Timing {
    /// Progress for integer `frame_offset` within a window of `duration_frames`.
    ///
    /// `fps` only matters for [`Timing::Spring`]; linear and eased curves are frame-rate
    /// independent.
    pub fn progress(&self, frame_offset: i64, duration_frames: u64, fps: Fps) -> f64 {
        if frame_offset <= 0 {
            return 0.0;
        }
        let offset = frame_offset as u64;
        if offset >= duration_frames {
            return 1.0;
        }
        let t = (offset as f64) / (duration_frames as f64);
        match self {
            Self::Linear => t,
            Self::Eased(ease) => ease.apply(t),
            Self::Spring(cfg) => cfg.value_at_frame(offset, fps),
        }
    }

    /// Validate curve parameters (spring constants, bezier control points).
    pub fn validate(&self) -> SegueResult<()> {
        match self {
            Self::Linear => Ok(()),
            Self::Eased(Ease::CubicBezier { x1, y1, x2, y2 }) => {
                if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                    return Err(SegueError::validation(
                        "cubic_bezier control points must be finite",
                    ));
                }
                if !(0.0..=1.0).contains(x1) || !(0.0..=1.0).contains(x2) {
                    return Err(SegueError::validation(
                        "cubic_bezier x control points must be within [0, 1]",
                    ));
                }
                Ok(())
            }
            Self::Eased(_) => Ok(()),
            Self::Spring(cfg) => cfg.validate(),
        }
    }
}

impl Serialize for Timing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        #[serde(rename_all = "snake_case")]
        enum Repr<'a> {
            CubicBezier([f64; 4]),
            Spring(&'a SpringConfig),
        }

        match self {
            Self::Linear => serializer.serialize_str("linear"),
            Self::Eased(Ease::CubicBezier { x1, y1, x2, y2 }) => {
                Repr::CubicBezier([*x1, *y1, *x2, *y2]).serialize(serializer)
            }
            Self::Eased(ease) => serializer.serialize_str(ease.name().unwrap_or("linear")),
            Self::Spring(cfg) => Repr::Spring(cfg).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Timing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            CubicBezier { cubic_bezier: [f64; 4] },
            Spring { spring: SpringConfig },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => match Ease::from_name(&s) {
                Some(Ease::Linear) => Ok(Self::Linear),
                Some(ease) => Ok(Self::Eased(ease)),
                None => Err(serde::de::Error::custom(format!(
                    "unknown timing \"{s}\""
                ))),
            },
            Repr::CubicBezier { cubic_bezier } => Ok(Self::Eased(Ease::CubicBezier {
                x1: cubic_bezier[0],
                y1: cubic_bezier[1],
                x2: cubic_bezier[2],
                y2: cubic_bezier[3],
            })),
            Repr::Spring { spring } => Ok(Self::Spring(spring)),
        }
    }
}

impl From<Ease> for Timing {
    fn from(ease: Ease) -> Self {
        match ease {
            Ease::Linear => Self::Linear,
            other => Self::Eased(other),
        }
    }
}

impl From<SpringConfig> for Timing {
    fn from(cfg: SpringConfig) -> Self {
        Self::Spring(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;

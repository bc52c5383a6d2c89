use crate::foundation::error::{SegueError, SegueResult};

pub use kurbo::{Affine, Rect, Vec2};

/// Absolute (timeline) or scene-local frame number.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame in the range.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> SegueResult<Self> {
        if start.0 > end.0 {
            return Err(SegueError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Clamp `f` to the last frame inside the range.
    pub fn clamp(self, f: FrameIndex) -> FrameIndex {
        if self.is_empty() {
            return self.start;
        }
        let max_inclusive = self.end.0.saturating_sub(1);
        FrameIndex(f.0.clamp(self.start.0, max_inclusive))
    }
}

/// How a scene participates in the frame being resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Incoming side of a transition: being revealed.
    Entering,
    /// Outgoing side of a transition: being hidden.
    Exiting,
    /// Not inside any transition window.
    Steady,
}

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be > 0.
    pub den: u32,
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

impl Fps {
    /// Create a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> SegueResult<Self> {
        if den == 0 {
            return Err(SegueError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SegueError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Check an already-constructed value (e.g. one that came through serde).
    pub fn validate(self) -> SegueResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    /// Length of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

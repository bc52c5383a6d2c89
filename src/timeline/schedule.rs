use std::fmt;
use std::sync::Arc;

use crate::{
    animation::ease::Ease,
    animation::timing::Timing,
    effects::presentation::Presentation,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::math::Fnv1a64,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// A scene placed on the absolute timeline.
pub struct ScheduledScene {
    /// Scene id from the authored spec.
    pub scene_id: String,
    /// Position in the sequence; also the scene's z-index.
    pub index: usize,
    /// First absolute frame.
    pub start_frame: u64,
    /// One past the last absolute frame.
    pub end_frame: u64,
}

impl ScheduledScene {
    /// Scene length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.end_frame - self.start_frame
    }

    /// `[start_frame, end_frame)` as a range.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.end_frame),
        }
    }

    /// `true` when absolute frame `f` falls inside the scene.
    pub fn contains(&self, f: u64) -> bool {
        self.start_frame <= f && f < self.end_frame
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Overlap window of one transition.
///
/// Transition `index` joins scene `index` (outgoing) to scene `index + 1` (incoming). The window
/// always ends where the outgoing scene ends.
pub struct TransitionWindow {
    /// Position among the transitions.
    pub index: usize,
    /// Presentation name, canonicalized.
    pub kind: String,
    /// Params handed to the presentation factory.
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
    /// Progress curve over the window.
    pub timing: Timing,
    /// Duration as authored, before clamping.
    pub requested_frames: i64,
    /// First absolute frame of the overlap.
    pub overlap_start: u64,
    /// One past the last absolute frame of the overlap.
    pub overlap_end: u64,
    /// Scene being hidden.
    pub outgoing_scene_id: String,
    /// Scene being revealed.
    pub incoming_scene_id: String,
}

impl TransitionWindow {
    /// Overlap length in frames (after clamping).
    pub fn len_frames(&self) -> u64 {
        self.overlap_end - self.overlap_start
    }

    /// `[overlap_start, overlap_end)` as a range.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.overlap_start),
            end: FrameIndex(self.overlap_end),
        }
    }

    /// `true` when absolute frame `f` is inside the overlap.
    pub fn contains(&self, f: u64) -> bool {
        self.overlap_start <= f && f < self.overlap_end
    }

    /// `true` when the requested duration was shortened to fit its neighbours.
    pub fn was_clamped(&self) -> bool {
        self.requested_frames > self.len_frames() as i64
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Non-fatal adjustment made while building a schedule.
pub enum BuildWarning {
    /// A transition was longer than its neighbours allow and was shortened.
    TransitionClamped {
        /// Transition index.
        index: usize,
        /// Authored duration.
        requested: i64,
        /// Duration actually used.
        clamped: u64,
        /// Outgoing scene id.
        outgoing: String,
        /// Incoming scene id.
        incoming: String,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransitionClamped {
                index,
                requested,
                clamped,
                outgoing,
                incoming,
            } => write!(
                f,
                "transition {index} ('{outgoing}' -> '{incoming}') clamped from {requested} to {clamped} frames"
            ),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Immutable frame-range mapping produced by [`TimelineBuilder`](crate::TimelineBuilder).
///
/// Scenes are stored in sequence order, which is also ascending `start_frame` order, and
/// transition `i` sits between scenes `i` and `i + 1`. Nothing here changes after build, so a
/// schedule can be shared freely across resolver threads.
pub struct Schedule {
    fps: Fps,
    total_frames: u64,
    scenes: Vec<ScheduledScene>,
    transitions: Vec<TransitionWindow>,
    #[serde(skip)]
    presentations: Vec<Arc<dyn Presentation>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<BuildWarning>,
}

impl Schedule {
    pub(crate) fn from_parts(
        fps: Fps,
        scenes: Vec<ScheduledScene>,
        transitions: Vec<TransitionWindow>,
        presentations: Vec<Arc<dyn Presentation>>,
        warnings: Vec<BuildWarning>,
    ) -> Self {
        debug_assert_eq!(transitions.len() + 1, scenes.len());
        debug_assert_eq!(transitions.len(), presentations.len());
        let total_frames = scenes.last().map_or(0, |s| s.end_frame);
        Self {
            fps,
            total_frames,
            scenes,
            transitions,
            presentations,
            warnings,
        }
    }

    /// Frame rate the schedule was built with.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Total timeline length: sum of scene durations minus the clamped overlaps.
    pub fn total_duration_frames(&self) -> u64 {
        self.total_frames
    }

    /// Scenes in sequence order.
    pub fn scenes(&self) -> &[ScheduledScene] {
        &self.scenes
    }

    /// Transition windows in sequence order.
    pub fn transitions(&self) -> &[TransitionWindow] {
        &self.transitions
    }

    /// Clamp warnings recorded during build.
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Scene with id `id`.
    pub fn scene_by_id(&self, id: &str) -> Option<&ScheduledScene> {
        self.scenes.iter().find(|s| s.scene_id == id)
    }

    /// Window in which scene `scene_index` is the incoming side.
    pub fn leading_window(&self, scene_index: usize) -> Option<&TransitionWindow> {
        scene_index
            .checked_sub(1)
            .and_then(|i| self.transitions.get(i))
    }

    /// Window in which scene `scene_index` is the outgoing side.
    pub fn trailing_window(&self, scene_index: usize) -> Option<&TransitionWindow> {
        self.transitions.get(scene_index)
    }

    /// Presentation instantiated for transition `index`.
    pub fn presentation(&self, index: usize) -> Option<&dyn Presentation> {
        self.presentations.get(index).map(|p| p.as_ref())
    }

    /// Stable 64-bit hash of everything that affects resolution.
    ///
    /// Two schedules built from identical input always share a fingerprint; it is suitable as a
    /// cache key for rendered frames.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u64(u64::from(self.fps.num));
        h.write_u64(u64::from(self.fps.den));
        h.write_u64(self.total_frames);

        h.write_u64(self.scenes.len() as u64);
        for s in &self.scenes {
            h.write_str(&s.scene_id);
            h.write_u64(s.start_frame);
            h.write_u64(s.end_frame);
        }

        h.write_u64(self.transitions.len() as u64);
        for t in &self.transitions {
            h.write_str(&t.kind);
            write_json_value(&mut h, &t.params);
            write_timing(&mut h, &t.timing);
            h.write_u64(t.requested_frames as u64);
            h.write_u64(t.overlap_start);
            h.write_u64(t.overlap_end);
        }
        h.finish()
    }
}

impl PartialEq for Schedule {
    fn eq(&self, other: &Self) -> bool {
        // Presentations are a pure function of (kind, params), which the windows already carry.
        self.fps == other.fps
            && self.total_frames == other.total_frames
            && self.scenes == other.scenes
            && self.transitions == other.transitions
            && self.warnings == other.warnings
    }
}

fn write_timing(h: &mut Fnv1a64, timing: &Timing) {
    match timing {
        Timing::Linear => h.write_u8(0),
        Timing::Eased(Ease::CubicBezier { x1, y1, x2, y2 }) => {
            h.write_u8(1);
            for v in [x1, y1, x2, y2] {
                h.write_f64(*v);
            }
        }
        Timing::Eased(ease) => {
            h.write_u8(2);
            h.write_str(ease.name().unwrap_or_default());
        }
        Timing::Spring(cfg) => {
            h.write_u8(3);
            h.write_f64(cfg.stiffness);
            h.write_f64(cfg.damping);
            h.write_f64(cfg.mass);
            h.write_u8(u8::from(cfg.overshoot_clamping));
        }
    }
}

fn write_json_value(h: &mut Fnv1a64, v: &serde_json::Value) {
    match v {
        serde_json::Value::Null => h.write_u8(0),
        serde_json::Value::Bool(x) => {
            h.write_u8(1);
            h.write_u8(u8::from(*x));
        }
        serde_json::Value::Number(n) => {
            h.write_u8(2);
            h.write_str(&n.to_string());
        }
        serde_json::Value::String(s) => {
            h.write_u8(3);
            h.write_str(s);
        }
        serde_json::Value::Array(items) => {
            h.write_u8(4);
            h.write_u64(items.len() as u64);
            for item in items {
                write_json_value(h, item);
            }
        }
        serde_json::Value::Object(map) => {
            h.write_u8(5);
            let mut keys = map.keys().collect::<Vec<_>>();
            keys.sort();
            h.write_u64(keys.len() as u64);
            for k in keys {
                h.write_str(k);
                write_json_value(h, &map[k]);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;

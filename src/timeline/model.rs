use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::{
    animation::timing::Timing,
    foundation::core::Fps,
    foundation::error::{SegueError, SegueResult},
    timeline::builder::TimelineBuilder,
    timeline::schedule::Schedule,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A fixed-duration unit of content.
pub struct SceneSpec {
    /// Stable, unique scene identifier handed back in render instructions.
    pub id: String,
    /// Scene length in frames, must be > 0.
    pub duration_frames: i64,
}

impl SceneSpec {
    /// Create a scene spec.
    pub fn new(id: impl Into<String>, duration_frames: i64) -> Self {
        Self {
            id: id.into(),
            duration_frames,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Transition joining the scene before it to the scene after it.
pub struct TransitionSpec {
    /// Presentation name looked up in the registry.
    #[serde(rename = "type")]
    pub kind: String,
    /// Requested overlap length in frames, must be >= 0. May be shortened at build time.
    pub duration_frames: i64,
    /// Progress curve over the overlap window.
    #[serde(default)]
    pub timing: Timing,
    /// Presentation parameter object.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl TransitionSpec {
    /// Create a transition spec without params.
    pub fn new(kind: impl Into<String>, duration_frames: i64, timing: impl Into<Timing>) -> Self {
        Self {
            kind: kind.into(),
            duration_frames,
            timing: timing.into(),
            params: serde_json::Value::Null,
        }
    }

    /// Attach a params object.
    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// One element of the authored sequence: `Scene, Transition, Scene, ..., Scene`.
pub enum TimelineEntry {
    /// A scene.
    Scene(SceneSpec),
    /// A transition between the neighbouring scenes.
    Transition(TransitionSpec),
}

impl From<SceneSpec> for TimelineEntry {
    fn from(v: SceneSpec) -> Self {
        Self::Scene(v)
    }
}

impl From<TransitionSpec> for TimelineEntry {
    fn from(v: TransitionSpec) -> Self {
        Self::Transition(v)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// JSON authoring format for a timeline.
///
/// ```json
/// {
///   "fps": { "num": 30, "den": 1 },
///   "sequence": [
///     { "scene": { "id": "intro", "duration_frames": 60 } },
///     { "transition": { "type": "fade", "duration_frames": 15, "timing": "out_cubic" } },
///     { "scene": { "id": "body", "duration_frames": 90 } }
///   ]
/// }
/// ```
pub struct TimelineDef {
    /// Frame rate used by spring timings. Defaults to 30/1.
    #[serde(default)]
    pub fps: Fps,
    /// Alternating scenes and transitions.
    pub sequence: Vec<TimelineEntry>,
}

impl TimelineDef {
    /// Parse a timeline from a JSON string.
    pub fn from_json_str(s: &str) -> SegueResult<Self> {
        serde_json::from_str(s).map_err(|e| SegueError::serde(format!("parse timeline JSON: {e}")))
    }

    /// Parse a timeline from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SegueResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SegueError::serde(format!("parse timeline JSON: {e}")))
    }

    /// Parse a timeline from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SegueResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open timeline JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build the schedule with `builder`'s registry.
    pub fn build(&self, builder: &TimelineBuilder) -> SegueResult<Schedule> {
        builder.build_with_fps(&self.sequence, self.fps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;

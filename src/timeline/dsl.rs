use crate::{
    animation::timing::Timing,
    foundation::core::Fps,
    foundation::error::SegueResult,
    timeline::builder::TimelineBuilder,
    timeline::model::{SceneSpec, TimelineDef, TimelineEntry, TransitionSpec},
    timeline::schedule::Schedule,
};

/// Fluent builder for a scene/transition sequence.
///
/// ```
/// use segue::{Ease, SequenceBuilder, TimelineBuilder};
///
/// let schedule = SequenceBuilder::new()
///     .scene("a", 60)
///     .transition("fade", 15, Ease::OutCubic)
///     .scene("b", 90)
///     .build(&TimelineBuilder::new())?;
/// assert_eq!(schedule.total_duration_frames(), 135);
/// # Ok::<(), segue::SegueError>(())
/// ```
///
/// Structure is not checked while chaining; [`build`](Self::build) reports every problem the
/// [`TimelineBuilder`] would.
#[derive(Clone, Debug, Default)]
pub struct SequenceBuilder {
    fps: Fps,
    entries: Vec<TimelineEntry>,
}

impl SequenceBuilder {
    /// Empty sequence at 30 fps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame rate used by spring timings.
    pub fn fps(mut self, fps: Fps) -> Self {
        self.fps = fps;
        self
    }

    /// Append a scene.
    pub fn scene(mut self, id: impl Into<String>, duration_frames: i64) -> Self {
        self.entries
            .push(TimelineEntry::Scene(SceneSpec::new(id, duration_frames)));
        self
    }

    /// Append a transition without params.
    pub fn transition(
        self,
        kind: impl Into<String>,
        duration_frames: i64,
        timing: impl Into<Timing>,
    ) -> Self {
        self.transition_with(kind, duration_frames, timing, serde_json::Value::Null)
    }

    /// Append a transition with a params object (e.g. `{"direction": "from_left"}`).
    pub fn transition_with(
        mut self,
        kind: impl Into<String>,
        duration_frames: i64,
        timing: impl Into<Timing>,
        params: serde_json::Value,
    ) -> Self {
        self.entries.push(TimelineEntry::Transition(
            TransitionSpec::new(kind, duration_frames, timing).with_params(params),
        ));
        self
    }

    /// Entries appended so far.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Convert into the JSON authoring form.
    pub fn into_def(self) -> TimelineDef {
        TimelineDef {
            fps: self.fps,
            sequence: self.entries,
        }
    }

    /// Validate and build the schedule.
    pub fn build(&self, builder: &TimelineBuilder) -> SegueResult<Schedule> {
        builder.build_with_fps(&self.entries, self.fps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/dsl.rs"]
mod tests;

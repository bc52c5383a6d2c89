use smallvec::SmallVec;

use crate::{
    effects::style::StyleDescriptor,
    eval::resolver::{FrameResolver, RenderInstruction},
    foundation::core::Fps,
    foundation::error::{SegueError, SegueResult},
    stack::motion::ContentMotion,
    timeline::builder::TimelineBuilder,
    timeline::model::{SceneSpec, TimelineEntry, TransitionSpec},
    timeline::schedule::Schedule,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A scene plus the motion applied to its content.
pub struct StackScene {
    /// Id and duration.
    #[serde(flatten)]
    pub spec: SceneSpec,
    /// Intra-scene content motion.
    #[serde(default)]
    pub motion: ContentMotion,
}

impl StackScene {
    /// Scene with static content.
    pub fn new(id: impl Into<String>, duration_frames: i64) -> Self {
        Self {
            spec: SceneSpec::new(id, duration_frames),
            motion: ContentMotion::None,
        }
    }

    /// Replace the content motion.
    pub fn with_motion(mut self, motion: ContentMotion) -> Self {
        self.motion = motion;
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One drawable layer of a stack frame.
pub struct StackLayer {
    /// Where the scene is and how it participates in the frame.
    pub instruction: RenderInstruction,
    /// Style from the cross-scene presentation alone.
    pub transition_style: StyleDescriptor,
    /// Style from the scene's own content motion alone.
    pub content_style: StyleDescriptor,
    /// Content style with the transition style stacked on top.
    pub combined_style: StyleDescriptor,
}

/// Declarative scene stack: scenes with content motion joined by transitions.
///
/// Content motion and transitions are two independent axes. Content motion depends only on
/// `(local_frame, scene duration)`; transition styles only on the overlap window. They are
/// combined per layer at the very end.
#[derive(Clone, Debug)]
pub struct SceneStack {
    schedule: Schedule,
    motions: Vec<ContentMotion>,
}

impl SceneStack {
    /// Build a stack. `transitions[i]` joins `scenes[i]` and `scenes[i + 1]`.
    pub fn build(
        builder: &TimelineBuilder,
        fps: Fps,
        scenes: Vec<StackScene>,
        transitions: Vec<TransitionSpec>,
    ) -> SegueResult<Self> {
        if scenes.is_empty() {
            return Err(SegueError::EmptySceneList);
        }
        if transitions.len() + 1 != scenes.len() {
            return Err(SegueError::validation(format!(
                "scene stack with {} scenes needs {} transitions, got {}",
                scenes.len(),
                scenes.len() - 1,
                transitions.len()
            )));
        }
        for s in &scenes {
            s.motion.validate()?;
        }

        let mut motions = Vec::with_capacity(scenes.len());
        let mut entries = Vec::with_capacity(scenes.len() * 2 - 1);
        let mut transitions = transitions.into_iter();
        for (i, s) in scenes.into_iter().enumerate() {
            if i > 0
                && let Some(t) = transitions.next()
            {
                entries.push(TimelineEntry::Transition(t));
            }
            motions.push(s.motion);
            entries.push(TimelineEntry::Scene(s.spec));
        }

        let schedule = builder.build_with_fps(&entries, fps)?;
        Ok(Self { schedule, motions })
    }

    /// Underlying schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Total length in frames.
    pub fn total_duration_frames(&self) -> u64 {
        self.schedule.total_duration_frames()
    }

    /// Content motion of scene `index`.
    pub fn motion(&self, index: usize) -> Option<&ContentMotion> {
        self.motions.get(index)
    }

    /// Layers for `global_frame` in ascending z order.
    pub fn frame(&self, global_frame: i64) -> SmallVec<[StackLayer; 2]> {
        let resolved = FrameResolver::resolve(&self.schedule, global_frame);
        resolved
            .instructions
            .into_iter()
            .map(|instruction| {
                let transition_style = FrameResolver::style_for(&self.schedule, &instruction);
                let duration = self.schedule.scenes()[instruction.scene_index].duration_frames();
                let content_style = self
                    .motions
                    .get(instruction.scene_index)
                    .map_or_else(StyleDescriptor::identity, |m| {
                        m.style(instruction.local_frame, duration)
                    });
                let combined_style = content_style.compose(&transition_style);
                StackLayer {
                    instruction,
                    transition_style,
                    content_style,
                    combined_style,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stack/scene_stack.rs"]
mod tests;

use smallvec::SmallVec;

use crate::{
    effects::style::StyleDescriptor,
    foundation::core::{Direction, FrameIndex, FrameRange},
    timeline::schedule::{Schedule, ScheduledScene},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// What to draw for one active scene on one frame.
pub struct RenderInstruction {
    /// Scene id from the authored spec.
    pub scene_id: String,
    /// Scene position in the sequence.
    pub scene_index: usize,
    /// Frame relative to the scene's own start.
    pub local_frame: u64,
    /// Role of the scene on this frame.
    pub direction: Direction,
    /// Transition progress; exactly `1.0` when steady.
    pub progress: f64,
    /// Paint order; higher draws on top.
    pub z_index: usize,
    /// Transition window driving a non-steady direction.
    pub transition: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Result of resolving one timeline frame.
pub struct ResolvedFrame {
    /// Frame as requested by the caller.
    pub requested_frame: i64,
    /// Frame actually resolved after boundary clamping.
    pub frame: u64,
    /// `true` when `requested_frame` lay outside `[0, total)`.
    pub clamped: bool,
    /// Active scenes in ascending `z_index` order; one or two entries.
    pub instructions: SmallVec<[RenderInstruction; 2]>,
}

impl ResolvedFrame {
    /// `true` when two scenes share this frame.
    pub fn in_transition(&self) -> bool {
        self.instructions.len() == 2
    }

    /// Instruction with the given direction, if any.
    pub fn with_direction(&self, direction: Direction) -> Option<&RenderInstruction> {
        self.instructions.iter().find(|i| i.direction == direction)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Instruction paired with its presentation style.
pub struct StyledInstruction {
    /// The underlying instruction.
    pub instruction: RenderInstruction,
    /// Style from the driving presentation, identity when steady.
    pub style: StyleDescriptor,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// [`ResolvedFrame`] with styles attached.
pub struct StyledFrame {
    /// Frame as requested by the caller.
    pub requested_frame: i64,
    /// Frame actually resolved after boundary clamping.
    pub frame: u64,
    /// `true` when `requested_frame` lay outside `[0, total)`.
    pub clamped: bool,
    /// Styled layers in ascending z order.
    pub layers: SmallVec<[StyledInstruction; 2]>,
}

/// Stateless resolver from schedule and frame to render instructions.
///
/// Every call reads only its arguments, so frames can be resolved in any order and from any
/// number of threads.
pub struct FrameResolver;

impl FrameResolver {
    /// Resolve `global_frame`. Never fails; out-of-range frames clamp to the nearest end.
    pub fn resolve(schedule: &Schedule, global_frame: i64) -> ResolvedFrame {
        let scenes = schedule.scenes();
        let total = schedule.total_duration_frames();
        let mut instructions = SmallVec::new();

        let timeline = FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(total),
        };
        let requested = FrameIndex(global_frame.max(0) as u64);
        let clamped = global_frame < 0 || !timeline.contains(requested);
        let frame = timeline.clamp(requested).0;

        if global_frame < 0 {
            if let Some(first) = scenes.first() {
                instructions.push(steady(first, 0));
            }
        } else if clamped {
            if let Some(last) = scenes.last() {
                instructions.push(steady(last, last.duration_frames() - 1));
            }
        } else {
            // Scenes are in ascending start order; the last one starting at or before `frame` is
            // always active, and only its predecessor can still overlap it.
            let cur = scenes.partition_point(|s| s.start_frame <= frame);
            let lo = cur.saturating_sub(2);
            for scene in &scenes[lo..cur] {
                if scene.contains(frame) {
                    instructions.push(active(schedule, scene, frame));
                }
            }
        }

        if clamped {
            tracing::debug!(
                requested = global_frame,
                resolved = frame,
                total,
                "frame outside timeline; clamped to boundary"
            );
        }

        ResolvedFrame {
            requested_frame: global_frame,
            frame,
            clamped,
            instructions,
        }
    }

    /// Resolve `global_frame` and attach each layer's presentation style.
    pub fn resolve_styled(schedule: &Schedule, global_frame: i64) -> StyledFrame {
        let resolved = Self::resolve(schedule, global_frame);
        let layers = resolved
            .instructions
            .into_iter()
            .map(|instruction| StyledInstruction {
                style: Self::style_for(schedule, &instruction),
                instruction,
            })
            .collect();
        StyledFrame {
            requested_frame: resolved.requested_frame,
            frame: resolved.frame,
            clamped: resolved.clamped,
            layers,
        }
    }

    /// Presentation style for one instruction.
    pub fn style_for(schedule: &Schedule, instruction: &RenderInstruction) -> StyleDescriptor {
        instruction
            .transition
            .and_then(|i| schedule.presentation(i))
            .map_or_else(StyleDescriptor::identity, |p| {
                p.style(instruction.progress, instruction.direction)
            })
    }
}

fn steady(scene: &ScheduledScene, local_frame: u64) -> RenderInstruction {
    RenderInstruction {
        scene_id: scene.scene_id.clone(),
        scene_index: scene.index,
        local_frame,
        direction: Direction::Steady,
        progress: 1.0,
        z_index: scene.index,
        transition: None,
    }
}

fn active(schedule: &Schedule, scene: &ScheduledScene, g: u64) -> RenderInstruction {
    let local_frame = g - scene.start_frame;
    let window = schedule
        .leading_window(scene.index)
        .filter(|w| w.contains(g))
        .map(|w| (w, Direction::Entering))
        .or_else(|| {
            schedule
                .trailing_window(scene.index)
                .filter(|w| w.contains(g))
                .map(|w| (w, Direction::Exiting))
        });
    let Some((w, direction)) = window else {
        return steady(scene, local_frame);
    };
    let offset = (g - w.overlap_start) as i64;
    let progress = w.timing.progress(offset, w.len_frames(), schedule.fps());
    RenderInstruction {
        scene_id: scene.scene_id.clone(),
        scene_index: scene.index,
        local_frame,
        direction,
        progress,
        z_index: scene.index,
        transition: Some(w.index),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/resolver.rs"]
mod tests;

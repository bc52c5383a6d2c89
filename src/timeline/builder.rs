use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    effects::presentation::{Presentation, PresentationRegistry, canonical_name},
    foundation::core::Fps,
    foundation::error::{SegueError, SegueResult},
    timeline::model::{SceneSpec, TimelineEntry, TransitionSpec},
    timeline::schedule::{BuildWarning, Schedule, ScheduledScene, TransitionWindow},
};

/// Turns an alternating scene/transition list into an immutable [`Schedule`].
///
/// The builder owns the [`PresentationRegistry`] used to resolve transition types, so every
/// lookup and parameter check happens here and a built schedule can never fail to resolve.
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    registry: PresentationRegistry,
}

impl TimelineBuilder {
    /// Builder backed by the built-in presentations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder backed by a custom registry.
    pub fn with_registry(registry: PresentationRegistry) -> Self {
        Self { registry }
    }

    /// Registry used to resolve transition types.
    pub fn registry(&self) -> &PresentationRegistry {
        &self.registry
    }

    /// Mutable access for registering extra presentations.
    pub fn registry_mut(&mut self) -> &mut PresentationRegistry {
        &mut self.registry
    }

    /// Build at the default 30 fps.
    pub fn build(&self, entries: &[TimelineEntry]) -> SegueResult<Schedule> {
        self.build_with_fps(entries, Fps::default())
    }

    /// Build at `fps`. The frame rate only affects spring timings.
    #[tracing::instrument(skip(self, entries), fields(entries = entries.len()))]
    pub fn build_with_fps(&self, entries: &[TimelineEntry], fps: Fps) -> SegueResult<Schedule> {
        fps.validate()?;
        let (scenes, transitions) = split_alternating(entries)?;
        let lengths = validate_durations(&scenes, &transitions)?;
        validate_ids(&scenes)?;

        let mut presentations: Vec<Arc<dyn Presentation>> = Vec::with_capacity(transitions.len());
        for t in &transitions {
            t.timing.validate()?;
            presentations.push(self.registry.instantiate(&t.kind, &t.params)?);
        }

        let mut placed = Vec::with_capacity(scenes.len());
        let mut windows = Vec::with_capacity(transitions.len());
        let mut warnings = Vec::new();
        let mut cursor = 0u64;
        let mut leading_overlap = 0u64;

        for (i, scene) in scenes.iter().enumerate() {
            let start = cursor;
            let end = start.checked_add(lengths[i]).ok_or_else(|| {
                SegueError::validation(format!(
                    "scene '{}' ends past the last representable frame",
                    scene.id
                ))
            })?;
            placed.push(ScheduledScene {
                scene_id: scene.id.clone(),
                index: i,
                start_frame: start,
                end_frame: end,
            });

            let Some(t) = transitions.get(i) else {
                cursor = end;
                continue;
            };
            let incoming = scenes[i + 1];
            // The outgoing scene may already be shared with its own leading window; only the
            // remainder is available, so at most two scenes are ever active at once.
            let bound = lengths[i]
                .saturating_sub(leading_overlap)
                .min(lengths[i + 1]);
            let requested = t.duration_frames.unsigned_abs();
            let clamped = requested.min(bound);
            if clamped < requested {
                tracing::warn!(
                    index = i,
                    requested = t.duration_frames,
                    clamped,
                    outgoing = %scene.id,
                    incoming = %incoming.id,
                    "transition longer than its neighbours allow; clamped"
                );
                warnings.push(BuildWarning::TransitionClamped {
                    index: i,
                    requested: t.duration_frames,
                    clamped,
                    outgoing: scene.id.clone(),
                    incoming: incoming.id.clone(),
                });
            }

            let overlap_start = end - clamped;
            windows.push(TransitionWindow {
                index: i,
                kind: canonical_name(&t.kind),
                params: t.params.clone(),
                timing: t.timing,
                requested_frames: t.duration_frames,
                overlap_start,
                overlap_end: end,
                outgoing_scene_id: scene.id.clone(),
                incoming_scene_id: incoming.id.clone(),
            });
            cursor = overlap_start;
            leading_overlap = clamped;
        }

        let schedule = Schedule::from_parts(fps, placed, windows, presentations, warnings);
        tracing::debug!(
            scenes = schedule.scenes().len(),
            transitions = schedule.transitions().len(),
            total_frames = schedule.total_duration_frames(),
            warnings = schedule.warnings().len(),
            "schedule built"
        );
        Ok(schedule)
    }
}

fn split_alternating(
    entries: &[TimelineEntry],
) -> SegueResult<(Vec<&SceneSpec>, Vec<&TransitionSpec>)> {
    let mut scenes = Vec::new();
    let mut transitions = Vec::new();
    for entry in entries {
        match entry {
            TimelineEntry::Scene(s) => scenes.push(s),
            TimelineEntry::Transition(t) => transitions.push(t),
        }
    }
    if scenes.is_empty() {
        return Err(SegueError::EmptySceneList);
    }

    for (pos, entry) in entries.iter().enumerate() {
        let want_scene = pos % 2 == 0;
        match (want_scene, entry) {
            (true, TimelineEntry::Scene(_)) | (false, TimelineEntry::Transition(_)) => {}
            (true, TimelineEntry::Transition(_)) if pos == 0 => {
                return Err(SegueError::validation(
                    "timeline must start with a scene, found a transition",
                ));
            }
            (true, TimelineEntry::Transition(_)) => {
                return Err(SegueError::validation(format!(
                    "entry {pos}: two adjacent transitions"
                )));
            }
            (false, TimelineEntry::Scene(_)) => {
                return Err(SegueError::validation(format!(
                    "entry {pos}: two adjacent scenes need a transition between them"
                )));
            }
        }
    }
    if matches!(entries.last(), Some(TimelineEntry::Transition(_))) {
        return Err(SegueError::validation(
            "timeline must end with a scene, found a trailing transition",
        ));
    }
    Ok((scenes, transitions))
}

/// Checked scene lengths, in scene order.
fn validate_durations(
    scenes: &[&SceneSpec],
    transitions: &[&TransitionSpec],
) -> SegueResult<Vec<u64>> {
    let mut lengths = Vec::with_capacity(scenes.len());
    for (i, scene) in scenes.iter().enumerate() {
        if scene.duration_frames <= 0 {
            return Err(SegueError::invalid_scene_duration(
                &scene.id,
                scene.duration_frames,
            ));
        }
        lengths.push(scene.duration_frames.unsigned_abs());
        if let Some(t) = transitions.get(i)
            && t.duration_frames < 0
        {
            return Err(SegueError::invalid_transition_duration(
                &scene.id,
                &scenes[i + 1].id,
                t.duration_frames,
            ));
        }
    }
    Ok(lengths)
}

fn validate_ids(scenes: &[&SceneSpec]) -> SegueResult<()> {
    let mut seen = BTreeSet::new();
    for (i, scene) in scenes.iter().enumerate() {
        if scene.id.trim().is_empty() {
            return Err(SegueError::validation(format!(
                "scene {i} id must be non-empty"
            )));
        }
        if !seen.insert(scene.id.as_str()) {
            return Err(SegueError::validation(format!(
                "duplicate scene id '{}'",
                scene.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;

use super::*;

use crate::animation::ease::Ease;
use crate::animation::timing::Timing;
use crate::foundation::core::{Direction, Vec2};

fn stack() -> SceneStack {
    SceneStack::build(
        &TimelineBuilder::new(),
        Fps::default(),
        vec![
            StackScene::new("a", 60).with_motion(ContentMotion::Zoom {
                from: 1.0,
                to: 1.2,
                ease: Ease::Linear,
            }),
            StackScene::new("b", 90).with_motion(ContentMotion::Drift {
                from: Vec2::ZERO,
                to: Vec2::new(0.1, 0.0),
                ease: Ease::OutSine,
            }),
            StackScene::new("c", 60),
        ],
        vec![
            TransitionSpec::new("fade", 15, Timing::Linear),
            TransitionSpec::new("slide", 15, Timing::Linear),
        ],
    )
    .unwrap()
}

#[test]
fn builds_the_same_schedule_as_the_timeline() {
    let s = stack();
    assert_eq!(s.total_duration_frames(), 180);
    assert_eq!(s.schedule().scenes()[2].start_frame, 120);
    assert_eq!(s.motion(2), Some(&ContentMotion::None));
}

#[test]
fn overlap_frame_has_both_layers_with_independent_styles() {
    let s = stack();
    let layers = s.frame(50);
    assert_eq!(layers.len(), 2);

    let a = &layers[0];
    assert_eq!(a.instruction.direction, Direction::Exiting);
    assert!((a.transition_style.opacity - (1.0 - 5.0 / 15.0)).abs() < 1e-12);
    // Zoom runs over the whole scene, not over the overlap window.
    assert_eq!(a.content_style, s.motion(0).unwrap().style(50, 60));
    assert_eq!(a.combined_style, a.content_style.compose(&a.transition_style));

    let b = &layers[1];
    assert_eq!(b.instruction.direction, Direction::Entering);
    assert_eq!(b.content_style, s.motion(1).unwrap().style(5, 90));
    assert!(b.instruction.z_index > a.instruction.z_index);
}

#[test]
fn content_motion_ignores_transition_progress() {
    let with_motion = stack();
    // Same scenes and motions, different transitions.
    let other = SceneStack::build(
        &TimelineBuilder::new(),
        Fps::default(),
        vec![
            StackScene::new("a", 60).with_motion(*with_motion.motion(0).unwrap()),
            StackScene::new("b", 90).with_motion(*with_motion.motion(1).unwrap()),
            StackScene::new("c", 60),
        ],
        vec![
            TransitionSpec::new("wipe", 15, Ease::InOutCubic),
            TransitionSpec::new("iris", 15, Ease::OutBack),
        ],
    )
    .unwrap();
    for f in 0..180 {
        let x = with_motion.frame(f);
        let y = other.frame(f);
        assert_eq!(x.len(), y.len());
        for (lx, ly) in x.iter().zip(y.iter()) {
            assert_eq!(lx.content_style, ly.content_style, "frame {f}");
        }
    }
}

#[test]
fn steady_layers_only_carry_content_style() {
    let s = stack();
    let layers = s.frame(100);
    assert_eq!(layers.len(), 1);
    let b = &layers[0];
    assert_eq!(b.transition_style, StyleDescriptor::identity());
    assert_eq!(b.combined_style, b.content_style);
}

#[test]
fn transition_count_must_match() {
    let err = SceneStack::build(
        &TimelineBuilder::new(),
        Fps::default(),
        vec![StackScene::new("a", 10), StackScene::new("b", 10)],
        vec![],
    )
    .unwrap_err();
    assert!(matches!(err, SegueError::Validation(_)));

    let err = SceneStack::build(&TimelineBuilder::new(), Fps::default(), vec![], vec![])
        .unwrap_err();
    assert!(matches!(err, SegueError::EmptySceneList));
}

#[test]
fn invalid_motion_is_rejected() {
    let err = SceneStack::build(
        &TimelineBuilder::new(),
        Fps::default(),
        vec![StackScene::new("a", 10).with_motion(ContentMotion::Zoom {
            from: -1.0,
            to: 1.0,
            ease: Ease::Linear,
        })],
        vec![],
    )
    .unwrap_err();
    assert!(err.to_string().contains("zoom scales"));
}

#[test]
fn stack_scene_json_flattens_the_spec() {
    let s: StackScene = serde_json::from_value(serde_json::json!({
        "id": "hero",
        "duration_frames": 48,
        "motion": { "kind": "fade", "params": { "in_frames": 6, "out_frames": 6 } }
    }))
    .unwrap();
    assert_eq!(s.spec, SceneSpec::new("hero", 48));
    assert_eq!(
        s.motion,
        ContentMotion::Fade {
            in_frames: 6,
            out_frames: 6
        }
    );
}

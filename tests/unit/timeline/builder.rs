use super::*;

use crate::animation::ease::Ease;
use crate::animation::timing::Timing;
use crate::effects::style::StyleDescriptor;
use crate::foundation::core::Direction;
use crate::timeline::dsl::SequenceBuilder;

fn scene(id: &str, frames: i64) -> TimelineEntry {
    TimelineEntry::Scene(SceneSpec::new(id, frames))
}

fn fade(frames: i64) -> TimelineEntry {
    TimelineEntry::Transition(TransitionSpec::new("fade", frames, Timing::Linear))
}

#[test]
fn worked_example_layout() {
    let s = TimelineBuilder::new()
        .build(&[scene("a", 60), fade(15), scene("b", 90), fade(15), scene("c", 60)])
        .unwrap();
    let ranges: Vec<(u64, u64)> = s
        .scenes()
        .iter()
        .map(|sc| (sc.start_frame, sc.end_frame))
        .collect();
    assert_eq!(ranges, vec![(0, 60), (45, 135), (120, 180)]);
    let windows: Vec<(u64, u64)> = s
        .transitions()
        .iter()
        .map(|w| (w.overlap_start, w.overlap_end))
        .collect();
    assert_eq!(windows, vec![(45, 60), (120, 135)]);
    assert_eq!(s.total_duration_frames(), 180);
    assert_eq!(s.transitions()[0].outgoing_scene_id, "a");
    assert_eq!(s.transitions()[0].incoming_scene_id, "b");
    assert!(s.warnings().is_empty());
}

#[test]
fn single_scene_has_no_windows() {
    let s = TimelineBuilder::new().build(&[scene("solo", 42)]).unwrap();
    assert_eq!(s.total_duration_frames(), 42);
    assert!(s.transitions().is_empty());
}

#[test]
fn overlong_transition_is_clamped_with_warning() {
    let s = TimelineBuilder::new()
        .build(&[scene("a", 20), fade(40), scene("b", 30)])
        .unwrap();
    let w = &s.transitions()[0];
    assert_eq!(w.len_frames(), 20);
    assert_eq!(w.requested_frames, 40);
    assert!(w.was_clamped());
    assert_eq!(s.total_duration_frames(), 30);
    assert_eq!(
        s.warnings(),
        &[BuildWarning::TransitionClamped {
            index: 0,
            requested: 40,
            clamped: 20,
            outgoing: "a".into(),
            incoming: "b".into(),
        }]
    );
}

#[test]
fn clamp_reserves_the_outgoing_leading_overlap() {
    let s = TimelineBuilder::new()
        .build(&[scene("a", 60), fade(15), scene("b", 20), fade(15), scene("c", 60)])
        .unwrap();
    let b = &s.scenes()[1];
    assert_eq!((b.start_frame, b.end_frame), (45, 65));
    let w = &s.transitions()[1];
    assert_eq!((w.overlap_start, w.overlap_end), (60, 65));
    assert_eq!(s.warnings().len(), 1);
    // The second window starts exactly where the first one ends.
    assert_eq!(s.transitions()[0].overlap_end, w.overlap_start);
    assert_eq!(s.total_duration_frames(), 60 + 20 + 60 - 15 - 5);
}

#[test]
fn zero_length_transition_is_a_hard_cut() {
    let s = TimelineBuilder::new()
        .build(&[scene("a", 10), fade(0), scene("b", 10)])
        .unwrap();
    let w = &s.transitions()[0];
    assert_eq!(w.len_frames(), 0);
    assert_eq!(s.scenes()[1].start_frame, 10);
    assert_eq!(s.total_duration_frames(), 20);
}

#[test]
fn total_is_sum_minus_overlaps() {
    let s = TimelineBuilder::new()
        .build(&[
            scene("a", 30),
            fade(10),
            scene("b", 12),
            fade(50),
            scene("c", 7),
            fade(3),
            scene("d", 40),
        ])
        .unwrap();
    let scene_sum: u64 = [30, 12, 7, 40].iter().sum();
    let overlap_sum: u64 = s.transitions().iter().map(|w| w.len_frames()).sum();
    assert_eq!(s.total_duration_frames(), scene_sum - overlap_sum);
}

#[test]
fn empty_scene_list_is_rejected() {
    let err = TimelineBuilder::new().build(&[]).unwrap_err();
    assert!(matches!(err, SegueError::EmptySceneList));
    let err = TimelineBuilder::new().build(&[fade(5)]).unwrap_err();
    assert!(matches!(err, SegueError::EmptySceneList));
}

#[test]
fn non_positive_durations_are_rejected() {
    let err = TimelineBuilder::new()
        .build(&[scene("a", 0)])
        .unwrap_err();
    assert!(matches!(
        err,
        SegueError::InvalidDuration { what: "scene", frames: 0, .. }
    ));

    let err = TimelineBuilder::new()
        .build(&[scene("a", 10), fade(5), scene("b", -5)])
        .unwrap_err();
    assert!(matches!(
        err,
        SegueError::InvalidDuration { what: "scene", ref id, frames: -5 } if id == "b"
    ));

    let err = TimelineBuilder::new()
        .build(&[scene("a", 10), fade(-1), scene("b", 10)])
        .unwrap_err();
    match err {
        SegueError::InvalidDuration { what, id, frames } => {
            assert_eq!(what, "transition");
            assert_eq!(id, "a -> b");
            assert_eq!(frames, -1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn frame_overflow_fails_instead_of_wrapping() {
    let err = TimelineBuilder::new()
        .build(&[
            scene("a", i64::MAX),
            fade(0),
            scene("b", i64::MAX),
            fade(0),
            scene("c", i64::MAX),
        ])
        .unwrap_err();
    assert!(matches!(err, SegueError::Validation(ref msg) if msg.contains("'c'")));
}

#[test]
fn unknown_presentation_fails_the_build() {
    let err = TimelineBuilder::new()
        .build(&[
            scene("a", 10),
            TimelineEntry::Transition(TransitionSpec::new("Morph", 5, Timing::Linear)),
            scene("b", 10),
        ])
        .unwrap_err();
    match err {
        SegueError::UnknownPresentation(name) => assert_eq!(name, "morph"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn entries_must_alternate() {
    let b = TimelineBuilder::new();
    for entries in [
        vec![fade(5), scene("a", 10)],
        vec![scene("a", 10), fade(5)],
        vec![scene("a", 10), scene("b", 10)],
        vec![scene("a", 10), fade(5), fade(5), scene("b", 10)],
    ] {
        let err = b.build(&entries).unwrap_err();
        assert!(matches!(err, SegueError::Validation(_)), "{err}");
    }
}

#[test]
fn scene_ids_must_be_unique_and_non_empty() {
    let b = TimelineBuilder::new();
    let err = b
        .build(&[scene("a", 10), fade(2), scene("a", 10)])
        .unwrap_err();
    assert!(err.to_string().contains("duplicate scene id 'a'"));
    let err = b.build(&[scene(" ", 10)]).unwrap_err();
    assert!(matches!(err, SegueError::Validation(_)));
}

#[test]
fn params_timing_and_fps_are_validated() {
    let b = TimelineBuilder::new();
    let bad_direction = TransitionSpec::new("wipe", 5, Timing::Linear)
        .with_params(serde_json::json!({ "direction": "sideways" }));
    let err = b
        .build(&[scene("a", 10), bad_direction.into(), scene("b", 10)])
        .unwrap_err();
    assert!(matches!(err, SegueError::Validation(_)));

    let bad_bezier = TransitionSpec::new(
        "fade",
        5,
        Ease::CubicBezier {
            x1: 1.5,
            y1: 0.0,
            x2: 0.5,
            y2: 1.0,
        },
    );
    assert!(
        b.build(&[scene("a", 10), bad_bezier.into(), scene("b", 10)])
            .is_err()
    );

    let err = b
        .build_with_fps(&[scene("a", 10)], Fps { num: 30, den: 0 })
        .unwrap_err();
    assert!(matches!(err, SegueError::Validation(_)));
}

#[test]
fn kinds_are_canonicalized() {
    let s = SequenceBuilder::new()
        .scene("a", 10)
        .transition(" Clock_Wipe ", 4, Timing::Linear)
        .scene("b", 10)
        .build(&TimelineBuilder::new())
        .unwrap();
    assert_eq!(s.transitions()[0].kind, "clock_wipe");
}

#[derive(Debug)]
struct AlwaysShown;

impl Presentation for AlwaysShown {
    fn style(&self, _progress: f64, _direction: Direction) -> StyleDescriptor {
        StyleDescriptor::identity()
    }
}

#[test]
fn custom_registry_is_used() {
    let mut b = TimelineBuilder::with_registry(PresentationRegistry::empty());
    assert!(
        b.build(&[scene("a", 10), fade(2), scene("b", 10)])
            .is_err()
    );
    b.registry_mut().register_static("fade", AlwaysShown);
    assert!(b.registry().contains("fade"));
    let s = b
        .build(&[scene("a", 10), fade(2), scene("b", 10)])
        .unwrap();
    assert_eq!(
        s.presentation(0).unwrap().style(0.0, Direction::Entering),
        StyleDescriptor::identity()
    );
}

#[test]
fn rebuilding_is_deterministic() {
    let entries = [scene("a", 60), fade(15), scene("b", 90), fade(15), scene("c", 60)];
    let x = TimelineBuilder::new().build(&entries).unwrap();
    let y = TimelineBuilder::new().build(&entries).unwrap();
    assert_eq!(x, y);
    assert_eq!(x.fingerprint(), y.fingerprint());
}

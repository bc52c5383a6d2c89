use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SegueError::EmptySceneList
            .to_string()
            .contains("empty scene list")
    );
    assert!(
        SegueError::invalid_scene_duration("intro", 0)
            .to_string()
            .contains("invalid duration: scene 'intro' has 0 frames")
    );
    assert!(
        SegueError::invalid_transition_duration("a", "b", -3)
            .to_string()
            .contains("transition 'a -> b' has -3 frames")
    );
    assert!(
        SegueError::unknown_presentation("zoom_blur")
            .to_string()
            .contains("unknown presentation 'zoom_blur'")
    );
    assert!(
        SegueError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SegueError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SegueError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

//! Scene-stack convenience layer: content motion composed with cross-scene transitions.

/// Local-frame content motion (fade, zoom, drift, Ken Burns).
pub mod motion;
/// Declarative stack of scenes with per-layer combined styles.
pub mod scene_stack;

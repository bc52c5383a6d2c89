//! Authoring inputs and the immutable schedule they compile to.
//!
//! Scenes are laid end to end; each transition pulls the next scene back so the two share an
//! overlap window at the end of the outgoing scene.

/// Validation and layout of a scene/transition list.
pub mod builder;
/// Fluent sequence construction.
pub mod dsl;
/// Scene/transition specs and the JSON timeline format.
pub mod model;
/// Built schedule: scene ranges and transition windows.
pub mod schedule;

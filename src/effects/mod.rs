//! Transition looks: style descriptors, the [`Presentation`] contract and its registry.
//!
//! [`Presentation`]: presentation::Presentation

/// Built-in presentations (`cut`, `fade`, `slide`, `wipe`, `flip`, `clock_wipe`, `iris`).
pub mod builtin;
/// Presentation trait, factories and the name-keyed registry.
pub mod presentation;
/// Renderer-agnostic per-layer style descriptors.
pub mod style;

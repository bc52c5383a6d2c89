//! Timing curves: named easing tables, springs, and the windowed [`Timing`] contract.
//!
//! [`Timing`]: timing::Timing

/// Named easing curves.
pub mod ease;
/// Closed-form damped spring step response.
pub mod spring;
/// Frame-window progress functions.
pub mod timing;

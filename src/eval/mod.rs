//! Per-frame resolution of a built schedule.

/// Range resolution, optionally on a rayon pool, and worker partitioning.
pub mod batch;
/// Single-frame resolution.
pub mod resolver;

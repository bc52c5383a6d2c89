//! Frame arithmetic, error taxonomy and hashing shared by every other module.

/// Frame indices, ranges, directions and frame rates.
pub mod core;
/// [`SegueError`](error::SegueError) and [`SegueResult`](error::SegueResult).
pub mod error;
pub(crate) mod math;

//! Segue is a deterministic scene/transition sequencing engine for frame-by-frame video
//! composition.
//!
//! A timeline is an ordered list of fixed-length scenes joined by transitions. Segue turns that
//! list into an immutable [`Schedule`] once, then answers "what is on screen at frame `f`?" for
//! any frame, in any order, from any number of threads.
//!
//! # Pipeline overview
//!
//! 1. **Build**: `[TimelineEntry] -> Schedule` via [`TimelineBuilder`] (validation, overlap
//!    layout, presentation lookup)
//! 2. **Resolve**: `Schedule + frame -> ResolvedFrame` via [`FrameResolver`] (active scenes,
//!    local frames, transition progress and direction)
//! 3. **Style** (optional): `RenderInstruction -> StyleDescriptor` via the transition's
//!    [`Presentation`]
//!
//! Painting pixels is left to the caller; a [`StyleDescriptor`] says how to draw a layer, not
//! how to rasterize it.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Fail at build time**: every error surfaces from [`TimelineBuilder::build`]; resolving a
//!   built schedule never fails.
//! - **Deterministic**: building and resolving are pure functions of their inputs.
//! - **At most two scenes per frame**: overlong transitions are clamped with a
//!   [`BuildWarning`].
//!
//! # Getting started
//!
//! ```
//! use segue::{Direction, Ease, FrameResolver, SequenceBuilder, TimelineBuilder};
//!
//! let schedule = SequenceBuilder::new()
//!     .scene("intro", 60)
//!     .transition("fade", 15, Ease::InOutCubic)
//!     .scene("body", 90)
//!     .build(&TimelineBuilder::new())?;
//!
//! let frame = FrameResolver::resolve(&schedule, 50);
//! assert_eq!(frame.instructions.len(), 2);
//! assert_eq!(frame.instructions[1].direction, Direction::Entering);
//! # Ok::<(), segue::SegueError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod effects;
mod eval;
mod foundation;
mod stack;
mod timeline;

pub use animation::ease::Ease;
pub use animation::spring::{MAX_SPRING_FRAMES, SpringConfig, measure_spring};
pub use animation::timing::Timing;
pub use effects::builtin::{ClockWipe, Cut, Fade, Flip, Iris, Slide, Wipe};
pub use effects::presentation::{Edge, Presentation, PresentationFactory, PresentationRegistry};
pub use effects::style::{ClipShape, FULL_COVER_RADIUS, StyleDescriptor};
pub use eval::batch::{ResolveStats, ResolveThreading, partition_frames, resolve_range};
pub use eval::resolver::{
    FrameResolver, RenderInstruction, ResolvedFrame, StyledFrame, StyledInstruction,
};
pub use foundation::core::{Affine, Direction, Fps, FrameIndex, FrameRange, Rect, Vec2};
pub use foundation::error::{SegueError, SegueResult};
pub use stack::motion::ContentMotion;
pub use stack::scene_stack::{SceneStack, StackLayer, StackScene};
pub use timeline::builder::TimelineBuilder;
pub use timeline::dsl::SequenceBuilder;
pub use timeline::model::{SceneSpec, TimelineDef, TimelineEntry, TransitionSpec};
pub use timeline::schedule::{BuildWarning, Schedule, ScheduledScene, TransitionWindow};

//! Shared core for the Pipeforge studio page controller.
//!
//! Everything in this crate is plain Rust with no DOM or network access: the
//! browser shell and the service both build on these types, and the behavior
//! the page exposes (notices, validation, outcome reduction, request
//! sequencing) is unit-tested here natively.

pub mod controller;
pub mod notice;
pub mod protocol;

pub use controller::{
    GenerateOutcome, GuideOutcome, RequestSequencer, TaskInputError, render_generate_outcome,
    render_guide_outcome, validate_task_description,
};
pub use notice::Notice;

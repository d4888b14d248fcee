//! Step-instrumented algorithm implementations
//!
//! One module per family. Every implementation is written against the
//! state models in [`crate::model`] and checkpoints through
//! [`crate::step::StepContext`] after each meaningful operation, so the
//! renderer observes every intermediate state and `stop()` takes effect
//! within one checkpoint.
//!
//! The functions here are plain synchronous code: cancellation surfaces as
//! [`crate::step::Cancelled`] from a checkpoint and is propagated with `?`,
//! which unwinds recursive algorithms without any shared mutable stop flag.

pub mod bst;
pub mod mst;
pub mod pathfinding;
pub mod sorting;

//! Core domain models
//!
//! This module defines the data the runner works over: environment flags,
//! the pipeline decision table and step plans, and the run context.

pub mod context;
pub mod flag;
pub mod pipeline;
pub mod step;

pub use context::*;
pub use flag::*;
pub use pipeline::*;
pub use step::*;

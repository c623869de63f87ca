//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the driver and the simulator can stay focused on running episodes.

pub mod action_map;
pub mod environment;
pub mod errors;

pub use action_map::ActionMap;
pub use environment::{Environment, StepResult};
pub use errors::{Result, RuntimeError};

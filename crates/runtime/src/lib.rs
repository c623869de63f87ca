//! Episode orchestration for the dungeon agent.
//!
//! This crate joins an [`agent_core`] decision policy to a game environment
//! and turns finished episodes into evaluation statistics. Consumers implement
//! [`Environment`] for their game backend, or use the bundled [`TextDungeon`]
//! simulator, and hand it to an [`EpisodeDriver`].
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the environment seam, action mapping and errors
//! - [`driver`] runs the per-tick loop and reports episode outcomes
//! - [`scenario`] loads RON scenarios and simulates them as text dungeons
//! - [`summary`] aggregates reports over many episodes
//! - [`config`] holds driver settings and their environment overrides
pub mod api;
pub mod config;
pub mod driver;
pub mod scenario;
pub mod summary;

pub use api::{ActionMap, Environment, Result, RuntimeError, StepResult};
pub use config::DriverConfig;
pub use driver::{EpisodeDriver, EpisodeOutcome, EpisodeReport, is_death_message};
pub use scenario::{Scenario, TextDungeon};
pub use summary::{EvaluationSummary, Spread};

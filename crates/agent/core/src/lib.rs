//! Grid navigation and rule-based decision making for a dungeon-crawling agent.
//!
//! `agent-core` owns everything the agent needs to pick one action per tick:
//! read-only queries over the tick's glyph grid, level-scoped visitation
//! memory, the graph searches that turn goals into paths, and the priority
//! ladder that chooses between them. It performs no I/O; the runtime feeds it
//! [`Observation`]s and applies the [`Action`]s it returns.
//!
//! Modules are organized leaf-first:
//! - [`grid`] hosts positions, directions, snapshots and [`GridIndex`]
//! - [`memory`] tracks visit counts and the seen map
//! - [`search`] implements BFS, frontier and A* searches
//! - [`locator`] ranks walkable tiles by how rarely they were visited
//! - [`policy`] holds the per-tick state machine and its guards
pub mod action;
pub mod config;
pub mod error;
pub mod grid;
pub mod locator;
pub mod memory;
pub mod policy;
pub mod rng;
pub mod search;

pub use action::Action;
pub use config::{AgentConfig, FrontierOrder, SearchLimits};
pub use error::{ErrorSeverity, GridError};
pub use grid::{
    CardinalDirection, GridIndex, GridSnapshot, ItemKind, MapDimensions, Position, TileClass,
};
pub use locator::LeastVisitedLocator;
pub use memory::VisitationMemory;
pub use policy::{
    Agent, Decision, DecisionPolicy, DecisionState, HungerStatus, Intent, Observation,
    ResourceMeter,
};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use search::{Path, SearchEngine, Target};

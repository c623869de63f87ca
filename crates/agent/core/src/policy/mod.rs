//! Per-tick decision making.
//!
//! [`Agent`] owns the level-scoped [`VisitationMemory`] and the per-episode
//! [`DecisionState`]. Each call to [`DecisionPolicy::decide`] runs the same
//! sequence:
//!
//! 1. Detect a dungeon level change (a descent wipes the level memory)
//! 2. Record the visit and widen the seen map around the agent
//! 3. Walk the priority ladder until a rule produces a decision
//! 4. Let the stuck and oscillation guards override the chosen action
//!
//! The ladder never fails: when every targeted strategy comes up empty it
//! emits a random cardinal move.
mod guards;
mod ladder;
mod observation;
mod state;

pub use observation::{HungerStatus, Observation, ResourceMeter};
pub use state::{ActionHistory, DecisionState, PendingConfirmation};

use crate::action::Action;
use crate::config::AgentConfig;
use crate::memory::VisitationMemory;
use crate::rng::{PcgRng, RngOracle, compute_seed};

/// Why the policy chose the action it emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    /// Neutral action completing last tick's pickup or eat.
    ConfirmPickup,
    /// Standing on an item and picking it up.
    PickUp,
    /// Standing on food while hungry.
    Eat,
    /// Spending one tick of an armed random-exploration burst.
    RandomExploration,
    /// Standing on the down staircase with enough items.
    Descend,
    /// Walking toward the down staircase.
    SeekStairs,
    /// Walking toward the nearest unclaimed item.
    SeekItem,
    /// Walking toward the nearest unseen walkable tile.
    Explore,
    /// Walking toward a rarely visited tile.
    LeastVisited,
    /// No strategy produced a path.
    Wander,
    /// Replaced by the stuck guard.
    Unstick,
    /// Replaced by the oscillation guard.
    BreakOscillation,
}

impl Intent {
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Outcome of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Apply `action` to the environment.
    Act { action: Action, intent: Intent },
    /// The episode goal is met; no action is emitted.
    Success,
}

impl Decision {
    pub fn action(&self) -> Option<Action> {
        match self {
            Decision::Act { action, .. } => Some(*action),
            Decision::Success => None,
        }
    }

    pub fn intent(&self) -> Option<Intent> {
        match self {
            Decision::Act { intent, .. } => Some(*intent),
            Decision::Success => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Decision::Success)
    }
}

/// A policy that turns one observation into one decision.
pub trait DecisionPolicy {
    fn decide(&mut self, observation: &Observation) -> Decision;

    /// Progress recorded so far this episode.
    fn state(&self) -> &DecisionState;

    /// Clears all per-episode state.
    fn reset(&mut self);
}

/// Draw contexts keeping the random choices of one tick independent.
mod draw {
    pub(super) const EXPLORATION: u32 = 0;
    pub(super) const WANDER: u32 = 1;
    pub(super) const STUCK: u32 = 2;
    pub(super) const OSCILLATION: u32 = 3;
}

/// The rule-based dungeon agent.
#[derive(Debug)]
pub struct Agent<R: RngOracle = PcgRng> {
    config: AgentConfig,
    memory: VisitationMemory,
    state: DecisionState,
    rng: R,
}

impl Agent<PcgRng> {
    pub fn new(config: AgentConfig) -> Self {
        Self::with_rng(config, PcgRng)
    }
}

impl<R: RngOracle> Agent<R> {
    pub fn with_rng(config: AgentConfig, rng: R) -> Self {
        Self {
            config,
            memory: VisitationMemory::new(),
            state: DecisionState::new(),
            rng,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn memory(&self) -> &VisitationMemory {
        &self.memory
    }

    /// Compares the observed depth with the last one seen.
    ///
    /// An increase counts as a descent and wipes the level memory. A decrease
    /// is logged and otherwise ignored.
    fn track_level(&mut self, depth: u32) {
        let Some(last_depth) = self.state.last_depth else {
            self.state.last_depth = Some(depth);
            return;
        };

        if depth > last_depth {
            tracing::info!("Descended from level {} to level {}", last_depth, depth);
            self.state.descended = true;
            self.memory.reset_for_new_level();
            self.state.claimed.clear();
            self.state.pending = None;
        } else if depth < last_depth {
            tracing::warn!(
                "Level decreased from {} to {}; possible death or teleport",
                last_depth,
                depth
            );
        }
        self.state.last_depth = Some(depth);
    }

    /// Uniform random cardinal move from `options`.
    fn random_move(&self, context: u32, options: &[Action]) -> Action {
        let seed = compute_seed(self.config.seed, self.state.tick, context);
        self.rng.choose(seed, options).unwrap_or(Action::Wait)
    }
}

impl<R: RngOracle> DecisionPolicy for Agent<R> {
    fn decide(&mut self, observation: &Observation) -> Decision {
        let position = observation.position;

        self.track_level(observation.depth);
        self.memory.record_visit(position);
        self.memory
            .mark_seen(position, self.config.fov_radius, observation.grid.dimensions());

        tracing::debug!(
            "Tick {}: at {} (glyph {}) | Seen {} | HP {} | Hunger {} | Level {} | Items {}",
            self.state.tick,
            position,
            observation.grid.glyph_at(position).unwrap_or_default(),
            self.memory.seen_count(),
            observation.hp,
            observation.hunger,
            observation.depth,
            self.state.items_collected
        );

        let decision = match self.climb_ladder(observation) {
            Decision::Act { action, intent } => {
                let (action, intent) = self.apply_guards(position, action, intent);
                self.state.last_position = Some(position);
                self.state.last_action = Some(action);
                Decision::Act { action, intent }
            }
            Decision::Success => Decision::Success,
        };

        self.state.tick += 1;
        decision
    }

    fn state(&self) -> &DecisionState {
        &self.state
    }

    fn reset(&mut self) {
        self.memory = VisitationMemory::new();
        self.state = DecisionState::new();
    }
}

//! The priority ladder: each rung either decides the tick or falls through.
use crate::action::Action;
use crate::grid::{GridIndex, Position};
use crate::locator::LeastVisitedLocator;
use crate::rng::RngOracle;
use crate::search::{SearchEngine, Target};

use super::state::PendingConfirmation;
use super::{Agent, Decision, Intent, Observation, draw};

fn act(action: Action, intent: Intent) -> Decision {
    Decision::Act { action, intent }
}

impl<R: RngOracle> Agent<R> {
    pub(super) fn climb_ladder(&mut self, observation: &Observation) -> Decision {
        let position = observation.position;
        let index = GridIndex::new(&observation.grid);

        if let Some(pending) = self.state.pending.take() {
            tracing::debug!("Confirming {} at {}", pending.action, pending.position);
            self.state.claimed.insert(pending.position);
            return act(Action::Wait, Intent::ConfirmPickup);
        }

        let unclaimed_item = index
            .item_at(position)
            .filter(|_| !self.state.is_claimed(position));
        if let Some(item) = unclaimed_item {
            let (action, intent) = if item.is_food() && observation.hunger.wants_food() {
                (Action::Eat, Intent::Eat)
            } else {
                (Action::Pickup, Intent::PickUp)
            };
            self.state.items_collected += 1;
            self.state.pending = action
                .needs_confirmation()
                .then_some(PendingConfirmation { position, action });
            tracing::info!(
                "Found {} at {}, {} (items: {})",
                item,
                position,
                if action == Action::Eat { "eating" } else { "picking up" },
                self.state.items_collected
            );
            return act(action, intent);
        }

        if self.state.exploration_steps > 0 {
            self.state.exploration_steps -= 1;
            let action = self.random_move(draw::EXPLORATION, &Action::MOVES);
            tracing::debug!(
                "Random exploration {} ({} left)",
                action,
                self.state.exploration_steps
            );
            return act(action, Intent::RandomExploration);
        }

        if self.state.items_collected >= self.config.success_item_threshold
            && self.state.descended
        {
            tracing::info!(
                "Collected {} items and reached level {}",
                self.state.items_collected,
                observation.depth
            );
            return Decision::Success;
        }

        if self.state.items_collected >= self.config.descend_item_threshold
            && !self.state.descended
        {
            if let Some(decision) = self.seek_stairs(index, position) {
                return decision;
            }
            tracing::debug!("Stairs not reachable yet, exploring");
        }

        self.explore(index, observation)
    }

    /// Descends when on the stairs, otherwise steps toward them.
    ///
    /// `None` when no stairs are visible or no path reaches them.
    fn seek_stairs(&self, index: GridIndex<'_>, position: Position) -> Option<Decision> {
        let stairs = index.find_stairs_down()?;
        if stairs == position {
            tracing::info!("Standing on stairs at {}, going down", stairs);
            return Some(act(Action::Descend, Intent::Descend));
        }

        let path = self.engine(index).shortest_path(position, stairs)?;
        let action = path.first_action()?;
        tracing::debug!("Moving toward stairs at {}", stairs);
        Some(act(action, Intent::SeekStairs))
    }

    /// Items first, then unseen tiles, then rarely visited tiles, then chance.
    fn explore(&self, index: GridIndex<'_>, observation: &Observation) -> Decision {
        let position = observation.position;
        let engine = self.engine(index);

        if let Some((target, action)) = first_step(engine.nearest_item(position)) {
            let item = index
                .item_at(target.position)
                .map_or("item", |item| item.label());
            tracing::debug!("Moving toward {} at {}", item, target.position);
            return act(action, Intent::SeekItem);
        }

        let frontier = engine.nearest_frontier_ordered(position, self.config.frontier_order);
        if let Some((target, action)) = first_step(frontier) {
            tracing::debug!("Exploring toward {}", target.position);
            return act(action, Intent::Explore);
        }

        let locator = LeastVisitedLocator::new(engine, self.config.least_visited_ceiling);
        if let Some((target, action)) = first_step(locator.locate(position)) {
            tracing::debug!("Moving to least visited {}", target.position);
            return act(action, Intent::LeastVisited);
        }

        let action = self.random_move(draw::WANDER, &Action::MOVES);
        tracing::debug!("No target reachable, wandering {}", action);
        act(action, Intent::Wander)
    }

    fn engine<'a>(&'a self, index: GridIndex<'a>) -> SearchEngine<'a> {
        SearchEngine::new(index, &self.memory, self.config.search)
            .with_claimed(&self.state.claimed)
    }
}

/// A target whose path has at least one step, with that step.
fn first_step(target: Option<Target>) -> Option<(Target, Action)> {
    let target = target?;
    let action = target.first_action()?;
    Some((target, action))
}

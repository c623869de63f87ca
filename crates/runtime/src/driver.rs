//! The tick loop joining a decision policy to an environment.
//!
//! The driver owns no search or decision logic. Each tick it checks the step
//! budget and signs of death, asks the policy for one decision, translates
//! the action into the environment's index space and applies it. Ticks are
//! strictly sequential: one decision and one environment step per tick.
use std::fmt;

use agent_core::{Agent, AgentConfig, Decision, DecisionPolicy, Observation};
use serde::Serialize;

use crate::api::{ActionMap, Environment, Result};
use crate::config::DriverConfig;

/// Message fragments the game prints when the agent dies.
const DEATH_MESSAGES: [&str; 2] = ["You die", "You were killed"];

/// True when the message line reports the agent's death.
pub fn is_death_message(message: &str) -> bool {
    DEATH_MESSAGES
        .iter()
        .any(|fragment| message.contains(fragment))
}

/// How an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EpisodeOutcome {
    /// The policy reached its item goal after descending.
    Success,
    /// The message line reported the agent's death, or its hit points ran out.
    Died,
    /// The environment ended the episode for another reason.
    Terminated,
    /// The environment's own step limit was reached.
    Truncated,
    /// The driver's step budget ran out first.
    StepBudgetExhausted,
}

impl EpisodeOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Died => "died",
            Self::Terminated => "terminated",
            Self::Truncated => "truncated",
            Self::StepBudgetExhausted => "step budget exhausted",
        }
    }

    /// The episode ended with the agent dead or the game over.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Died | Self::Terminated)
    }
}

impl fmt::Display for EpisodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of one finished episode.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EpisodeReport {
    /// Environment steps taken.
    pub steps: u32,
    /// Pickups and eats issued by the policy.
    pub items_collected: u32,
    /// Steps that paid a positive reward.
    pub items_rewarded: u32,
    pub descended: bool,
    pub final_depth: u32,
    pub outcome: EpisodeOutcome,
    /// The episode ended fatally while the agent was weak from hunger or worse.
    pub starving: bool,
}

/// Runs episodes of a policy against one environment.
pub struct EpisodeDriver<E> {
    env: E,
    actions: ActionMap,
    config: DriverConfig,
}

impl<E: Environment> EpisodeDriver<E> {
    pub fn new(env: E, actions: ActionMap, config: DriverConfig) -> Self {
        Self {
            env,
            actions,
            config,
        }
    }

    /// Plays one episode from a fresh environment reset.
    pub async fn run_episode<P>(&mut self, policy: &mut P) -> Result<EpisodeReport>
    where
        P: DecisionPolicy + Send,
    {
        policy.reset();
        let mut observation = self.env.reset().await?;
        let start_depth = observation.depth;
        let mut steps = 0u32;
        let mut items_rewarded = 0u32;

        let outcome = loop {
            if steps >= self.config.max_steps {
                tracing::info!("Step budget of {} exhausted", self.config.max_steps);
                break EpisodeOutcome::StepBudgetExhausted;
            }

            let action = match policy.decide(&observation) {
                Decision::Success => break EpisodeOutcome::Success,
                Decision::Act { action, intent } => {
                    tracing::debug!("Step {}: {} ({})", steps, action, intent.label());
                    action
                }
            };

            let result = self.env.step(self.actions.translate(action)).await?;
            steps += 1;
            if result.reward > 0.0 {
                items_rewarded += 1;
                tracing::info!("Collected an item, total {}", items_rewarded);
            }
            if !result.observation.message.is_empty() {
                tracing::debug!("Game message: {}", result.observation.message);
            }
            let (terminated, truncated) = (result.terminated, result.truncated);
            observation = result.observation;

            if is_death_message(&observation.message) || observation.hp.is_depleted() {
                tracing::warn!("Agent died: {}", observation.message);
                break EpisodeOutcome::Died;
            }
            if terminated {
                break EpisodeOutcome::Terminated;
            }
            if truncated {
                break EpisodeOutcome::Truncated;
            }

            if !self.config.tick_delay.is_zero() {
                tokio::time::sleep(self.config.tick_delay).await;
            }
        };

        let report = self.report(
            policy,
            &observation,
            start_depth,
            steps,
            items_rewarded,
            outcome,
        );
        tracing::info!(
            "Episode finished: {} after {} steps with {} items{}",
            report.outcome,
            report.steps,
            report.items_rewarded,
            if report.descended { ", having descended" } else { ", without descending" }
        );
        Ok(report)
    }

    /// Plays `episodes` episodes with fresh agents, seeding episode `n` with
    /// the driver seed plus `n`.
    pub async fn run_episodes(
        &mut self,
        agent_config: &AgentConfig,
        episodes: u32,
    ) -> Result<Vec<EpisodeReport>> {
        let mut reports = Vec::with_capacity(episodes as usize);
        for episode in 0..episodes {
            let seed = self.config.episode_seed(episode);
            let mut agent = Agent::new(agent_config.clone().with_seed(seed));
            tracing::info!("Starting episode {}/{} (seed {})", episode + 1, episodes, seed);
            let report = self.run_episode(&mut agent).await.inspect_err(|err| {
                tracing::error!(
                    "Episode {} aborted ({} error): {}",
                    episode + 1,
                    err.severity().as_str(),
                    err
                );
            })?;
            reports.push(report);
        }
        Ok(reports)
    }

    fn report<P: DecisionPolicy>(
        &self,
        policy: &P,
        observation: &Observation,
        start_depth: u32,
        steps: u32,
        items_rewarded: u32,
        outcome: EpisodeOutcome,
    ) -> EpisodeReport {
        let state = policy.state();
        EpisodeReport {
            steps,
            items_collected: state.items_collected,
            items_rewarded,
            // A descent on the final step never reaches the policy.
            descended: state.descended || observation.depth > start_depth,
            final_depth: observation.depth,
            outcome,
            starving: outcome.is_fatal() && observation.hunger.is_starving(),
        }
    }
}

#[cfg(test)]
mod tests {
    use agent_core::{GridSnapshot, Position, ResourceMeter};
    use async_trait::async_trait;

    use super::*;
    use crate::api::StepResult;

    /// Loses one hit point per step without ever printing a message.
    struct Bleeding {
        hp: u32,
    }

    impl Bleeding {
        fn observe(&self) -> Observation {
            let grid = GridSnapshot::from_rows(&["..."]).unwrap();
            Observation::new(grid, Position::new(1, 0), 1).with_hp(ResourceMeter::new(self.hp, 3))
        }
    }

    #[async_trait]
    impl Environment for Bleeding {
        async fn reset(&mut self) -> Result<Observation> {
            self.hp = 3;
            Ok(self.observe())
        }

        async fn step(&mut self, _action: u32) -> Result<StepResult> {
            self.hp -= 1;
            Ok(StepResult {
                observation: self.observe(),
                reward: 0.0,
                terminated: false,
                truncated: false,
            })
        }
    }

    #[tokio::test]
    async fn silent_death_is_detected_from_hit_points() {
        let mut driver = EpisodeDriver::new(
            Bleeding { hp: 3 },
            ActionMap::nle_reduced(),
            DriverConfig::default(),
        );
        let mut agent = Agent::new(AgentConfig::default());

        let report = driver.run_episode(&mut agent).await.unwrap();

        assert_eq!(report.outcome, EpisodeOutcome::Died);
        assert_eq!(report.steps, 3);
        assert!(!report.starving);
    }

    #[test]
    fn recognises_death_messages() {
        assert!(is_death_message("You die from starvation."));
        assert!(is_death_message("You were killed by a jackal."));
        assert!(!is_death_message("You see here a scroll."));
        assert!(!is_death_message(""));
    }
}

//! Driver configuration with environment-variable overrides.
use std::env;
use std::time::Duration;

/// Settings for one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Ticks before the driver gives up on an episode.
    pub max_steps: u32,
    /// Pause between ticks, for watching a run.
    pub tick_delay: Duration,
    /// Base seed; episode `n` uses `seed + n`.
    pub seed: u64,
}

impl DriverConfig {
    pub const DEFAULT_MAX_STEPS: u32 = 1000;

    /// Defaults overridden by `AGENT_MAX_STEPS`, `AGENT_TICK_DELAY_MS` and
    /// `AGENT_SEED` when they are set and parse.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(max_steps) = read_env::<u32>("AGENT_MAX_STEPS") {
            config.max_steps = max_steps.max(1);
        }

        if let Some(delay_ms) = read_env::<u64>("AGENT_TICK_DELAY_MS") {
            config.tick_delay = Duration::from_millis(delay_ms);
        }

        if let Some(seed) = read_env::<u64>("AGENT_SEED") {
            config.seed = seed;
        }

        config
    }

    /// Seed for the episode with the given index.
    pub fn episode_seed(&self, episode: u32) -> u64 {
        self.seed.wrapping_add(u64::from(episode))
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_steps: Self::DEFAULT_MAX_STEPS,
            tick_delay: Duration::ZERO,
            seed: 0,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

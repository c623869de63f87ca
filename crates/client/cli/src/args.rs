use std::path::PathBuf;
use std::time::Duration;

use agent_core::{AgentConfig, FrontierOrder};
use clap::Parser;
use runtime::DriverConfig;

/// Run the rule-based agent through text dungeon episodes
#[derive(Parser)]
#[command(name = "dungeon-agent")]
#[command(about = "Evaluate the rule-based dungeon agent", long_about = None)]
#[command(version)]
pub struct Args {
    /// Number of episodes to play
    #[arg(short, long, default_value = "10")]
    pub episodes: u32,

    /// RON scenario file (defaults to the bundled two-level dungeon)
    #[arg(short, long, value_name = "FILE")]
    pub scenario: Option<PathBuf>,

    /// Steps per episode before giving up (overrides AGENT_MAX_STEPS)
    #[arg(long, value_name = "STEPS")]
    pub max_steps: Option<u32>,

    /// Base seed; episode n uses seed + n (overrides AGENT_SEED)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause between ticks in milliseconds (overrides AGENT_TICK_DELAY_MS)
    #[arg(long, value_name = "MS")]
    pub tick_delay_ms: Option<u64>,

    /// Frontier search order
    #[arg(long, value_enum, default_value = "bfs")]
    pub frontier: FrontierArg,

    /// Items to collect before heading for the stairs
    #[arg(long, default_value_t = AgentConfig::DEFAULT_DESCEND_ITEM_THRESHOLD)]
    pub descend_items: u32,

    /// Items that end the episode once the agent has descended
    #[arg(long, default_value_t = AgentConfig::DEFAULT_SUCCESS_ITEM_THRESHOLD)]
    pub success_items: u32,

    /// Output format for the final summary
    #[arg(short, long, value_enum, default_value = "summary")]
    pub format: OutputFormat,

    /// Also write logs to `agent.log` in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum FrontierArg {
    /// Nearest unseen tile first
    Bfs,
    /// Dive down the first corridor found
    Dfs,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable statistics
    Summary,
    /// Per-episode reports and statistics as JSON
    Json,
}

impl Args {
    /// Environment-derived driver settings with command-line overrides.
    pub fn driver_config(&self) -> DriverConfig {
        let mut config = DriverConfig::from_env();
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps.max(1);
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(delay_ms) = self.tick_delay_ms {
            config.tick_delay = Duration::from_millis(delay_ms);
        }
        config
    }

    pub fn agent_config(&self) -> AgentConfig {
        let order = match self.frontier {
            FrontierArg::Bfs => FrontierOrder::BreadthFirst,
            FrontierArg::Dfs => FrontierOrder::DepthFirst,
        };
        AgentConfig::default()
            .with_frontier_order(order)
            .with_item_thresholds(self.descend_items, self.success_items)
    }
}

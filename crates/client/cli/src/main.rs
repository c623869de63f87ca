//! Command-line evaluator for the rule-based dungeon agent.
mod args;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use runtime::{ActionMap, EpisodeDriver, EvaluationSummary, Scenario, TextDungeon};

use args::{Args, OutputFormat};

const DEFAULT_SCENARIO: &str = include_str!("../scenarios/default.ron");

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let _guard = logging::setup_logging(args.log_dir.as_deref())?;

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::from_ron_str(DEFAULT_SCENARIO).context("parsing bundled scenario")?,
    };

    let driver_config = args.driver_config();
    let agent_config = args.agent_config();
    tracing::info!(
        "Running {} episodes of '{}' (max {} steps, seed {})",
        args.episodes,
        scenario.name,
        driver_config.max_steps,
        driver_config.seed
    );

    let env = TextDungeon::new(scenario)?;
    let mut driver = EpisodeDriver::new(env, ActionMap::nle_reduced(), driver_config);
    let reports = driver.run_episodes(&agent_config, args.episodes).await?;
    let summary = EvaluationSummary::from_reports(&reports, agent_config.success_item_threshold);

    match args.format {
        OutputFormat::Summary => println!("{}", summary),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "episodes": reports,
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

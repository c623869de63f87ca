//! Aggregate statistics over a batch of episode reports.
use std::fmt;

use serde::Serialize;

use crate::driver::EpisodeReport;

/// Mean and population standard deviation of a sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Spread {
    pub mean: f64,
    pub std_dev: f64,
}

impl Spread {
    /// `None` for an empty sample.
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ± {:.2}", self.mean, self.std_dev)
    }
}

/// Evaluation results over N episodes.
///
/// Item counts are the reward-confirmed ones.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub episodes: usize,
    pub items: Spread,
    pub starved: usize,
    pub starvation_rate: f64,
    /// Over episodes that collected at least one item.
    pub steps_per_item: Option<Spread>,
    /// Episodes with at least `success_items` items.
    pub full_successes: usize,
    pub full_success_rate: f64,
    pub success_items: u32,
}

impl EvaluationSummary {
    pub fn from_reports(reports: &[EpisodeReport], success_items: u32) -> Self {
        let episodes = reports.len();
        let rate = |count: usize| {
            if episodes == 0 {
                0.0
            } else {
                count as f64 / episodes as f64
            }
        };

        let items: Vec<f64> = reports
            .iter()
            .map(|report| f64::from(report.items_rewarded))
            .collect();
        let steps_per_item: Vec<f64> = reports
            .iter()
            .filter(|report| report.items_rewarded > 0)
            .map(|report| f64::from(report.steps) / f64::from(report.items_rewarded))
            .collect();
        let starved = reports.iter().filter(|report| report.starving).count();
        let full_successes = reports
            .iter()
            .filter(|report| report.items_rewarded >= success_items)
            .count();

        Self {
            episodes,
            items: Spread::of(&items).unwrap_or_default(),
            starved,
            starvation_rate: rate(starved),
            steps_per_item: Spread::of(&steps_per_item),
            full_successes,
            full_success_rate: rate(full_successes),
            success_items,
        }
    }
}

impl fmt::Display for EvaluationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evaluation over {} episodes", self.episodes)?;
        writeln!(f, "Items collected:      {}", self.items)?;
        writeln!(
            f,
            "Starvation rate:      {}/{} ({:.0}%)",
            self.starved,
            self.episodes,
            self.starvation_rate * 100.0
        )?;
        match &self.steps_per_item {
            Some(spread) => writeln!(f, "Steps per item:       {}", spread)?,
            None => writeln!(f, "Steps per item:       n/a")?,
        }
        write!(
            f,
            "Full success (>= {}): {}/{} ({:.0}%)",
            self.success_items,
            self.full_successes,
            self.episodes,
            self.full_success_rate * 100.0
        )
    }
}

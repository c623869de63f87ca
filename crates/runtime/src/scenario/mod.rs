//! Scenario system for the text dungeon.
//!
//! A scenario is a stack of ASCII levels plus the survival rules the
//! simulator applies while the agent walks them. Scenarios are authored as
//! RON files:
//!
//! ```ron
//! (
//!     name: "two floors",
//!     levels: [
//!         ["|@.$|", "|..>|"],
//!         ["|.@%|"],
//!     ],
//!     hunger_interval: Some(200),
//!     step_limit: Some(1500),
//! )
//! ```
//!
//! Each level marks the agent's arrival tile with `@`.
mod dungeon;

use std::path::Path;

use agent_core::{GridSnapshot, HungerStatus, Position, grid::glyphs};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};

pub use dungeon::TextDungeon;

/// Declarative description of a text dungeon run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,

    /// Levels from the top down, each as equal-width text rows.
    pub levels: Vec<Vec<String>>,

    /// Steps between hunger worsening; `None` disables hunger.
    #[serde(default)]
    pub hunger_interval: Option<u32>,

    /// Steps after which the episode is truncated.
    #[serde(default)]
    pub step_limit: Option<u32>,

    #[serde(default)]
    pub starting_hunger: HungerStatus,

    #[serde(default = "Scenario::default_max_hp")]
    pub max_hp: u32,
}

impl Scenario {
    fn default_max_hp() -> u32 {
        12
    }

    /// Single-level scenario without hunger or step limit.
    pub fn single_level<S: Into<String>>(rows: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: String::new(),
            levels: vec![rows.into_iter().map(Into::into).collect()],
            hunger_interval: None,
            step_limit: None,
            starting_hunger: HungerStatus::default(),
            max_hp: Self::default_max_hp(),
        }
    }

    /// Parses a scenario from RON text.
    pub fn from_ron_str(content: &str) -> Result<Self> {
        let scenario: Scenario = ron::from_str(content)?;
        tracing::debug!(
            "Parsed scenario '{}' with {} levels",
            scenario.name,
            scenario.levels.len()
        );
        Ok(scenario)
    }

    /// Reads and parses a RON scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ScenarioIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    /// Splits every level into its terrain and the agent's arrival tile.
    pub(crate) fn layouts(&self) -> Result<Vec<LevelLayout>> {
        if self.levels.is_empty() {
            return Err(RuntimeError::InvalidScenario(
                "scenario has no levels".to_string(),
            ));
        }
        if self.hunger_interval == Some(0) {
            return Err(RuntimeError::InvalidScenario(
                "hunger_interval must be positive".to_string(),
            ));
        }
        self.levels
            .iter()
            .enumerate()
            .map(|(depth, rows)| LevelLayout::parse(depth, rows))
            .collect()
    }
}

/// One parsed level: terrain rows with the arrival marker removed.
#[derive(Clone, Debug)]
pub(crate) struct LevelLayout {
    pub(crate) rows: Vec<Vec<u8>>,
    pub(crate) start: Position,
}

impl LevelLayout {
    fn parse(depth: usize, rows: &[String]) -> Result<Self> {
        // Validates dimensions before the marker search.
        GridSnapshot::from_rows(rows)?;

        let mut rows: Vec<Vec<u8>> = rows.iter().map(|row| row.as_bytes().to_vec()).collect();
        let markers: Vec<Position> = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &ch)| ch == glyphs::PLAYER)
                    .map(move |(x, _)| Position::new(x as i32, y as i32))
            })
            .collect();
        let start = match markers.as_slice() {
            [start] => *start,
            [] => {
                return Err(RuntimeError::InvalidScenario(format!(
                    "level {} has no '@' start tile",
                    depth + 1
                )));
            }
            _ => {
                return Err(RuntimeError::InvalidScenario(format!(
                    "level {} has {} '@' start tiles",
                    depth + 1,
                    markers.len()
                )));
            }
        };

        rows[start.y as usize][start.x as usize] = glyphs::FLOOR;
        Ok(Self { rows, start })
    }
}

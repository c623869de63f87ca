use agent_core::{
    Action, GridSnapshot, HungerStatus, ItemKind, MapDimensions, Observation, Position,
    ResourceMeter, TileClass, grid::glyphs,
};
use async_trait::async_trait;

use super::{LevelLayout, Scenario};
use crate::api::{ActionMap, Environment, Result, RuntimeError, StepResult};

/// Deterministic ASCII dungeon implementing [`Environment`].
///
/// Walls and anything else unwalkable block movement. Picking up or eating an
/// item removes it from the map and pays a reward of 1. `Descend` on a `>`
/// moves to the next level's start tile. When hunger is enabled it worsens
/// every `hunger_interval` steps and the agent dies once it passes Fainted.
///
/// The agent's own tile is rendered as the terrain beneath it, so the agent
/// can see the item it stands on.
#[derive(Debug)]
pub struct TextDungeon {
    scenario: Scenario,
    layouts: Vec<LevelLayout>,
    actions: ActionMap,
    run: Option<Run>,
}

#[derive(Debug)]
struct Run {
    level: usize,
    rows: Vec<Vec<u8>>,
    position: Position,
    hunger: HungerStatus,
    hp: u32,
    steps: u32,
    done: bool,
}

impl TextDungeon {
    /// Validates every level of `scenario` and decodes actions with the
    /// reduced NetHack action map.
    pub fn new(scenario: Scenario) -> Result<Self> {
        Self::with_action_map(scenario, ActionMap::nle_reduced())
    }

    pub fn with_action_map(scenario: Scenario, actions: ActionMap) -> Result<Self> {
        let layouts = scenario.layouts()?;
        tracing::info!(
            "Text dungeon '{}' ready with {} levels",
            scenario.name,
            layouts.len()
        );
        Ok(Self {
            scenario,
            layouts,
            actions,
            run: None,
        })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    fn observe(&self, run: &Run, message: String) -> Result<Observation> {
        let height = run.rows.len() as u32;
        let width = run.rows.first().map_or(0, |row| row.len()) as u32;
        let chars: Vec<u8> = run.rows.concat();
        let glyphs = vec![0; chars.len()];
        let grid = GridSnapshot::new(MapDimensions::new(width, height), chars, glyphs)?;
        Ok(Observation::new(grid, run.position, run.level as u32 + 1)
            .with_hunger(run.hunger)
            .with_hp(ResourceMeter::new(run.hp, self.scenario.max_hp))
            .with_message(message))
    }

    fn start_level(&self, level: usize) -> Option<(Vec<Vec<u8>>, Position)> {
        self.layouts
            .get(level)
            .map(|layout| (layout.rows.clone(), layout.start))
    }
}

impl Run {
    fn tile(&self, position: Position) -> Option<u8> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.rows
            .get(position.y as usize)?
            .get(position.x as usize)
            .copied()
    }

    fn clear_tile(&mut self, position: Position) {
        if let Some(tile) = self
            .rows
            .get_mut(position.y as usize)
            .and_then(|row| row.get_mut(position.x as usize))
        {
            *tile = glyphs::FLOOR;
        }
    }
}

#[async_trait]
impl Environment for TextDungeon {
    async fn reset(&mut self) -> Result<Observation> {
        let (rows, position) = self
            .start_level(0)
            .ok_or_else(|| RuntimeError::InvalidScenario("scenario has no levels".to_string()))?;
        let run = Run {
            level: 0,
            rows,
            position,
            hunger: self.scenario.starting_hunger,
            hp: self.scenario.max_hp,
            steps: 0,
            done: false,
        };
        let observation = self.observe(&run, String::new())?;
        self.run = Some(run);
        Ok(observation)
    }

    async fn step(&mut self, index: u32) -> Result<StepResult> {
        let mut run = self.run.take().ok_or(RuntimeError::EpisodeOver)?;
        if run.done {
            self.run = Some(run);
            return Err(RuntimeError::EpisodeOver);
        }

        let action = self.actions.action_for(index).unwrap_or(Action::Wait);
        let mut reward = 0.0;
        let mut message = String::new();

        match action {
            Action::North | Action::South | Action::East | Action::West => {
                if let Some(direction) = action.direction() {
                    let target = run.position.step(direction);
                    let walkable = run
                        .tile(target)
                        .is_some_and(|ch| TileClass::from_char(ch).is_walkable());
                    if walkable {
                        run.position = target;
                    }
                }
            }
            Action::Pickup => {
                let item = run
                    .tile(run.position)
                    .and_then(ItemKind::from_char);
                match item {
                    Some(item) => {
                        run.clear_tile(run.position);
                        reward = 1.0;
                        message = format!("You pick up a {}.", item);
                    }
                    None => message = "There is nothing here to pick up.".to_string(),
                }
            }
            Action::Eat => {
                let item = run
                    .tile(run.position)
                    .and_then(ItemKind::from_char);
                match item {
                    Some(item) if item.is_food() => {
                        run.clear_tile(run.position);
                        run.hunger = HungerStatus::NotHungry;
                        reward = 1.0;
                        message = "This food is delicious!".to_string();
                    }
                    Some(_) => message = "You cannot eat that!".to_string(),
                    None => message = "You don't have anything to eat.".to_string(),
                }
            }
            Action::Descend => {
                let on_stairs = run.tile(run.position) == Some(glyphs::STAIRS_DOWN);
                match self.start_level(run.level + 1).filter(|_| on_stairs) {
                    Some((rows, position)) => {
                        run.level += 1;
                        run.rows = rows;
                        run.position = position;
                        tracing::debug!("Text dungeon moved to level {}", run.level + 1);
                    }
                    None => message = "You can't go down here.".to_string(),
                }
            }
            Action::Wait => {}
        }

        run.steps += 1;
        let mut terminated = false;
        let hunger_tick = self
            .scenario
            .hunger_interval
            .is_some_and(|interval| run.steps % interval == 0);
        if hunger_tick {
            if run.hunger >= HungerStatus::Fainted {
                run.hunger = HungerStatus::Starved;
                run.hp = 0;
                terminated = true;
                message = "You die from starvation.".to_string();
            } else {
                run.hunger = run.hunger.worsen();
            }
        }
        let truncated = !terminated
            && self
                .scenario
                .step_limit
                .is_some_and(|limit| run.steps >= limit);
        run.done = terminated || truncated;

        let observation = self.observe(&run, message)?;
        self.run = Some(run);
        Ok(StepResult {
            observation,
            reward,
            terminated,
            truncated,
        })
    }
}

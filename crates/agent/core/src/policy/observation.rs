use crate::grid::{GridSnapshot, Position};

/// Hunger ladder, ordered from sated to starved.
///
/// Discriminants follow the NetHack Learning Environment status codes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum HungerStatus {
    Satiated = 0,
    #[default]
    #[strum(serialize = "Not Hungry")]
    NotHungry = 1,
    Hungry = 2,
    Weak = 3,
    Fainting = 4,
    Fainted = 5,
    Starved = 6,
}

impl HungerStatus {
    pub fn from_code(code: u8) -> Option<Self> {
        let status = match code {
            0 => Self::Satiated,
            1 => Self::NotHungry,
            2 => Self::Hungry,
            3 => Self::Weak,
            4 => Self::Fainting,
            5 => Self::Fainted,
            6 => Self::Starved,
            _ => return None,
        };
        Some(status)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Hungry or worse: eating food takes priority over picking it up.
    pub fn wants_food(self) -> bool {
        self >= Self::Hungry
    }

    /// Weak or worse.
    pub fn is_starving(self) -> bool {
        self >= Self::Weak
    }

    /// Next step down the ladder; `Starved` stays put.
    pub fn worsen(self) -> Self {
        Self::from_code(self.code() + 1).unwrap_or(Self::Starved)
    }

    pub fn label(self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for HungerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A bounded resource such as hit points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

impl std::fmt::Display for ResourceMeter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

/// Everything the agent perceives in one tick.
///
/// The grid is replaced wholesale every tick; nothing in it is assumed to
/// persist between observations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub grid: GridSnapshot,
    pub position: Position,
    pub hp: ResourceMeter,
    pub hunger: HungerStatus,
    /// Dungeon level index, 1 on the first level.
    pub depth: u32,
    /// Top-line game message; empty when nothing was printed.
    pub message: String,
}

impl Observation {
    /// Observation with full health, no hunger and an empty message.
    pub fn new(grid: GridSnapshot, position: Position, depth: u32) -> Self {
        Self {
            grid,
            position,
            hp: ResourceMeter::new(1, 1),
            hunger: HungerStatus::default(),
            depth,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn with_hunger(mut self, hunger: HungerStatus) -> Self {
        self.hunger = hunger;
        self
    }

    #[must_use]
    pub fn with_hp(mut self, hp: ResourceMeter) -> Self {
        self.hp = hp;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hunger_codes_follow_ladder_order() {
        for code in 0..=6 {
            assert_eq!(HungerStatus::from_code(code).map(HungerStatus::code), Some(code));
        }
        assert_eq!(HungerStatus::from_code(7), None);
        assert!(HungerStatus::Weak > HungerStatus::Hungry);
    }

    #[test]
    fn food_gate_starts_at_hungry() {
        assert!(!HungerStatus::NotHungry.wants_food());
        assert!(HungerStatus::Hungry.wants_food());
        assert!(HungerStatus::Fainting.wants_food());
        assert!(!HungerStatus::Hungry.is_starving());
        assert!(HungerStatus::Weak.is_starving());
    }

    #[test]
    fn worsen_saturates_at_starved() {
        assert_eq!(HungerStatus::Satiated.worsen(), HungerStatus::NotHungry);
        assert_eq!(HungerStatus::Starved.worsen(), HungerStatus::Starved);
        assert_eq!(HungerStatus::NotHungry.to_string(), "Not Hungry");
    }
}

/// Character codes the agent recognises on the map.
pub mod glyphs {
    pub const BLANK: u8 = b' ';
    pub const FLOOR: u8 = b'.';
    pub const CORRIDOR: u8 = b'#';
    pub const OPEN_DOOR: u8 = b'+';
    pub const STAIRS_DOWN: u8 = b'>';
    pub const STAIRS_UP: u8 = b'<';
    pub const FOOD: u8 = b'%';
    pub const PLAYER: u8 = b'@';
}

/// Coarse classification of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileClass {
    /// Nothing drawn yet: unexplored or solid rock.
    Blank,
    Floor,
    Corridor,
    StairsDown,
    StairsUp,
    Item(ItemKind),
    /// Walls, monsters, fountains and anything else the agent cannot step on.
    Other,
}

impl TileClass {
    /// Classifies a character code.
    ///
    /// Item symbols take precedence over terrain, so an open door (`+`)
    /// reads as a spellbook. It stays walkable either way.
    pub fn from_char(ch: u8) -> Self {
        if let Some(kind) = ItemKind::from_char(ch) {
            return TileClass::Item(kind);
        }
        match ch {
            glyphs::BLANK => TileClass::Blank,
            glyphs::FLOOR => TileClass::Floor,
            glyphs::CORRIDOR => TileClass::Corridor,
            glyphs::STAIRS_DOWN => TileClass::StairsDown,
            glyphs::STAIRS_UP => TileClass::StairsUp,
            _ => TileClass::Other,
        }
    }

    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            TileClass::Floor
                | TileClass::Corridor
                | TileClass::StairsDown
                | TileClass::StairsUp
                | TileClass::Item(_)
        )
    }

    pub fn item(self) -> Option<ItemKind> {
        match self {
            TileClass::Item(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Object classes that can lie on the dungeon floor, keyed by map symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    #[strum(serialize = "gold piece")]
    Gold,
    #[strum(serialize = "food")]
    Food,
    #[strum(serialize = "potion")]
    Potion,
    #[strum(serialize = "scroll")]
    Scroll,
    #[strum(serialize = "wand")]
    Wand,
    #[strum(serialize = "ring")]
    Ring,
    #[strum(serialize = "spellbook")]
    Spellbook,
    #[strum(serialize = "amulet")]
    Amulet,
    #[strum(serialize = "tool")]
    Tool,
    #[strum(serialize = "armor")]
    Armor,
    #[strum(serialize = "weapon")]
    Weapon,
    #[strum(serialize = "gem")]
    Gem,
    #[strum(serialize = "rock/stone")]
    Rock,
}

impl ItemKind {
    pub fn from_char(ch: u8) -> Option<Self> {
        let kind = match ch {
            b'$' => ItemKind::Gold,
            glyphs::FOOD => ItemKind::Food,
            b'!' => ItemKind::Potion,
            b'?' => ItemKind::Scroll,
            b'/' => ItemKind::Wand,
            b'=' => ItemKind::Ring,
            b'+' => ItemKind::Spellbook,
            b'"' => ItemKind::Amulet,
            b'(' => ItemKind::Tool,
            b'[' | b']' => ItemKind::Armor,
            b')' => ItemKind::Weapon,
            b'*' => ItemKind::Gem,
            b',' => ItemKind::Rock,
            _ => return None,
        };
        Some(kind)
    }

    /// Human-readable name used in log lines.
    pub fn label(self) -> &'static str {
        self.into()
    }

    pub fn is_food(self) -> bool {
        matches!(self, ItemKind::Food)
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn terrain_symbols_classify_as_walkable() {
        for ch in [b'.', b'#', b'+', b'>', b'<'] {
            assert!(TileClass::from_char(ch).is_walkable(), "{}", ch as char);
        }
        for ch in [b' ', b'|', b'-', b'@', b'd'] {
            assert!(!TileClass::from_char(ch).is_walkable(), "{}", ch as char);
        }
    }

    #[test]
    fn door_symbol_doubles_as_spellbook() {
        assert_eq!(
            TileClass::from_char(b'+'),
            TileClass::Item(ItemKind::Spellbook)
        );
    }

    #[test]
    fn every_item_kind_has_a_label() {
        for kind in ItemKind::iter() {
            assert!(!kind.label().is_empty());
        }
        assert_eq!(ItemKind::Gold.label(), "gold piece");
        assert_eq!(ItemKind::Rock.to_string(), "rock/stone");
    }

    #[test]
    fn both_armor_brackets_map_to_armor() {
        assert_eq!(ItemKind::from_char(b'['), Some(ItemKind::Armor));
        assert_eq!(ItemKind::from_char(b']'), Some(ItemKind::Armor));
    }
}

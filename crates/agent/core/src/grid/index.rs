use super::{GridSnapshot, ItemKind, MapDimensions, Position, TileClass, glyphs};

/// Bounds-checked classification queries over one [`GridSnapshot`].
///
/// Pure and cheap to copy; every search holds one for the tick it runs in.
/// Out-of-bounds positions are never walkable and never hold items.
#[derive(Clone, Copy, Debug)]
pub struct GridIndex<'a> {
    grid: &'a GridSnapshot,
}

impl<'a> GridIndex<'a> {
    pub fn new(grid: &'a GridSnapshot) -> Self {
        Self { grid }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.grid.dimensions()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.grid.dimensions().contains(position)
    }

    /// Classifies the cell at `position`; out-of-bounds cells read as blank.
    pub fn classify(&self, position: Position) -> TileClass {
        self.grid
            .char_at(position)
            .map(TileClass::from_char)
            .unwrap_or(TileClass::Blank)
    }

    /// True for floor, corridor, open door, either staircase, or an item.
    pub fn walkable(&self, position: Position) -> bool {
        self.classify(position).is_walkable()
    }

    pub fn is_item(&self, position: Position) -> bool {
        self.item_at(position).is_some()
    }

    pub fn item_at(&self, position: Position) -> Option<ItemKind> {
        self.classify(position).item()
    }

    /// First down staircase in row-major scan order.
    pub fn find_stairs_down(&self) -> Option<Position> {
        self.dimensions()
            .positions()
            .find(|&position| self.grid.char_at(position) == Some(glyphs::STAIRS_DOWN))
    }

    /// Every walkable position in row-major scan order.
    pub fn walkable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.dimensions()
            .positions()
            .filter(move |&position| self.walkable(position))
    }
}

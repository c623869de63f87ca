//! Read-only views over the tick's character and glyph grids.
//!
//! A [`GridSnapshot`] is replaced wholesale by the environment every tick;
//! [`GridIndex`] answers the classification queries every search relies on.
mod index;
mod position;
mod snapshot;
mod tiles;

pub use index::GridIndex;
pub use position::{CardinalDirection, MapDimensions, Position};
pub use snapshot::GridSnapshot;
pub use tiles::{ItemKind, TileClass, glyphs};

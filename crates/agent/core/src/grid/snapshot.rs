use crate::error::GridError;

use super::{MapDimensions, Position};

/// Co-indexed character and glyph layers for a single tick.
///
/// Both layers are stored row-major. A snapshot is immutable for the duration
/// of one decision and replaced wholesale when the next observation arrives.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    dimensions: MapDimensions,
    chars: Vec<u8>,
    glyphs: Vec<u16>,
}

impl GridSnapshot {
    /// Builds a snapshot from flat row-major layers.
    pub fn new(
        dimensions: MapDimensions,
        chars: Vec<u8>,
        glyphs: Vec<u16>,
    ) -> Result<Self, GridError> {
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(GridError::EmptyDimensions {
                width: dimensions.width,
                height: dimensions.height,
            });
        }
        let expected = dimensions.area();
        if chars.len() != expected {
            return Err(GridError::LayerSizeMismatch {
                layer: "chars",
                expected,
                actual: chars.len(),
            });
        }
        if glyphs.len() != expected {
            return Err(GridError::LayerSizeMismatch {
                layer: "glyphs",
                expected,
                actual: glyphs.len(),
            });
        }
        Ok(Self {
            dimensions,
            chars,
            glyphs,
        })
    }

    /// Builds a snapshot from text rows with an all-zero glyph layer.
    ///
    /// Every row must have the same width.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        let mut chars = Vec::with_capacity(width * rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref().as_bytes();
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: index,
                    expected: width,
                    actual: row.len(),
                });
            }
            chars.extend_from_slice(row);
        }
        let dimensions = MapDimensions::new(width as u32, rows.len() as u32);
        let glyphs = vec![0; chars.len()];
        Self::new(dimensions, chars, glyphs)
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn char_at(&self, position: Position) -> Option<u8> {
        self.dimensions
            .offset(position)
            .map(|offset| self.chars[offset])
    }

    pub fn glyph_at(&self, position: Position) -> Option<u16> {
        self.dimensions
            .offset(position)
            .map(|offset| self.glyphs[offset])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = GridSnapshot::from_rows(&["...", ".."]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn new_rejects_mismatched_glyph_layer() {
        let err = GridSnapshot::new(MapDimensions::new(2, 2), vec![b'.'; 4], vec![0; 3])
            .unwrap_err();
        assert!(matches!(
            err,
            GridError::LayerSizeMismatch {
                layer: "glyphs",
                ..
            }
        ));
    }

    #[test]
    fn lookups_outside_bounds_return_none() {
        let grid = GridSnapshot::from_rows(&["ab", "cd"]).unwrap();
        assert_eq!(grid.char_at(Position::new(1, 1)), Some(b'd'));
        assert_eq!(grid.char_at(Position::new(2, 0)), None);
        assert_eq!(grid.glyph_at(Position::new(-1, 0)), None);
    }

    #[test]
    fn from_rows_reads_row_major() {
        let grid = GridSnapshot::from_rows(&["#.>", "..$"]).unwrap();
        assert_eq!(grid.char_at(Position::new(2, 0)), Some(b'>'));
        assert_eq!(grid.char_at(Position::new(2, 1)), Some(b'$'));
        assert_eq!(grid.glyph_at(Position::new(2, 1)), Some(0));
    }
}

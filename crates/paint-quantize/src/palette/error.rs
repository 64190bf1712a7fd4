//! Palette construction and lookup errors.

use std::fmt;

/// Why a palette could not be built or addressed.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// The accent row would exceed its ten cells
    TooManyAccents {
        /// Accents supplied
        count: usize,
        /// Cells in the accent row
        max: usize,
    },
    /// Accent equals a base color or an earlier accent
    DuplicateColor {
        /// Flat index of the repeated entry
        index: usize,
    },
    /// Coordinate outside the `rows x 10` grid
    OutOfBounds { row: usize, col: usize },
    /// Store key is not `row,col`
    InvalidKey(String),
    /// Builder settings contradict each other
    InvalidBuilder(String),
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::TooManyAccents { count, max } => write!(
                f,
                "{} accent colors requested but the accent row has {} cells",
                count, max
            ),
            PaletteError::DuplicateColor { index } => {
                write!(f, "palette entry {} repeats an earlier color", index)
            }
            PaletteError::OutOfBounds { row, col } => {
                write!(f, "no palette entry at row {} column {}", row, col)
            }
            PaletteError::InvalidKey(key) => {
                write!(f, "invalid palette key '{}' (expected 'row,col')", key)
            }
            PaletteError::InvalidBuilder(reason) => {
                write!(f, "invalid palette builder settings: {}", reason)
            }
        }
    }
}

impl std::error::Error for PaletteError {}

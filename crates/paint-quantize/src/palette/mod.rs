//! Palette types and utilities
//!
//! This module provides the fixed base palette, the palette grid with its
//! optional accent row, accent selection from an image, and the palette
//! error type.

mod builder;
mod error;
mod palette;

pub use builder::{color_frequencies, ColorCount, PaletteBuilder};
pub use error::PaletteError;
pub use palette::{
    base_colors, Palette, PaletteCoord, BASE_COLORS, BASE_ROWS, MAX_ACCENTS, PALETTE_COLUMNS,
};

//! The working palette: fixed base rows plus one optional accent row.
//!
//! The grid is exactly [`PALETTE_COLUMNS`] wide. A flat index maps to a
//! coordinate by `row = index / 10`, `col = index % 10`; the base rows are
//! always full, so this mapping is valid for every entry including a partly
//! filled accent row.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgb;

/// Width of every palette row.
pub const PALETTE_COLUMNS: usize = 10;

/// Capacity of the accent row.
pub const MAX_ACCENTS: usize = PALETTE_COLUMNS;

/// Number of fixed base rows.
pub const BASE_ROWS: usize = 2;

/// Process-wide base colors, identical in every run.
///
/// These are the twenty swatches of the classic desktop paint program's
/// color box, row by row as they appear on screen.
pub static BASE_COLORS: [[Rgb; PALETTE_COLUMNS]; BASE_ROWS] = [
    [
        Rgb::new(0, 0, 0),       // black
        Rgb::new(127, 127, 127), // gray-50%
        Rgb::new(136, 0, 21),    // dark red
        Rgb::new(237, 28, 36),   // red
        Rgb::new(255, 127, 39),  // orange
        Rgb::new(255, 242, 0),   // yellow
        Rgb::new(34, 177, 76),   // green
        Rgb::new(0, 162, 232),   // turquoise
        Rgb::new(63, 72, 204),   // indigo
        Rgb::new(163, 73, 164),  // purple
    ],
    [
        Rgb::new(255, 255, 255), // white
        Rgb::new(195, 195, 195), // gray-25%
        Rgb::new(185, 122, 87),  // brown
        Rgb::new(255, 174, 201), // rose
        Rgb::new(255, 201, 14),  // gold
        Rgb::new(239, 228, 176), // light yellow
        Rgb::new(181, 230, 29),  // lime
        Rgb::new(153, 217, 234), // light turquoise
        Rgb::new(112, 146, 190), // blue-gray
        Rgb::new(200, 191, 231), // lavender
    ],
];

/// Base colors flattened row-major.
pub fn base_colors() -> impl Iterator<Item = Rgb> {
    BASE_COLORS.iter().flat_map(|row| row.iter().copied())
}

/// Position of a color in the palette grid.
///
/// Serialized as the ASCII key `row,col` (see [`Display`](fmt::Display) and
/// [`FromStr`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PaletteCoord {
    pub row: u8,
    pub col: u8,
}

impl PaletteCoord {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Coordinate of a flat, row-major palette index.
    ///
    /// ```
    /// use paint_quantize::PaletteCoord;
    /// assert_eq!(PaletteCoord::from_flat(23), PaletteCoord::new(2, 3));
    /// ```
    #[inline]
    pub const fn from_flat(index: usize) -> Self {
        Self {
            row: (index / PALETTE_COLUMNS) as u8,
            col: (index % PALETTE_COLUMNS) as u8,
        }
    }

    /// Flat, row-major palette index of this coordinate.
    #[inline]
    pub const fn flat(self) -> usize {
        self.row as usize * PALETTE_COLUMNS + self.col as usize
    }
}

impl fmt::Display for PaletteCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for PaletteCoord {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PaletteError::InvalidKey(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row: u8 = row.parse().map_err(|_| invalid())?;
        let col: u8 = col.parse().map_err(|_| invalid())?;
        if col as usize >= PALETTE_COLUMNS {
            return Err(invalid());
        }
        Ok(Self { row, col })
    }
}

/// A 10-column palette grid with two base rows and an optional accent row.
///
/// # Example
///
/// ```
/// use paint_quantize::{Palette, PaletteCoord, Rgb};
///
/// let palette = Palette::with_accents(&[Rgb::new(12, 34, 56)]).unwrap();
/// assert_eq!(palette.rows(), 3);
/// assert_eq!(palette.len(), 21);
/// assert_eq!(palette.get(PaletteCoord::new(2, 0)).unwrap(), Rgb::new(12, 34, 56));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Base colors followed by accents, row-major.
    colors: Vec<Rgb>,
}

impl Palette {
    /// The base palette alone (two rows, no accents).
    pub fn base() -> Self {
        Self {
            colors: base_colors().collect(),
        }
    }

    /// Base palette plus an accent row.
    ///
    /// An empty `accents` slice yields the two-row base palette.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::TooManyAccents`] if more than [`MAX_ACCENTS`] are given
    /// - [`PaletteError::DuplicateColor`] if an accent repeats a base color or
    ///   an earlier accent
    pub fn with_accents(accents: &[Rgb]) -> Result<Self, PaletteError> {
        if accents.len() > MAX_ACCENTS {
            return Err(PaletteError::TooManyAccents {
                count: accents.len(),
                max: MAX_ACCENTS,
            });
        }

        let mut colors: Vec<Rgb> = base_colors().collect();
        let mut seen: HashSet<Rgb> = colors.iter().copied().collect();
        for &accent in accents {
            if !seen.insert(accent) {
                return Err(PaletteError::DuplicateColor {
                    index: colors.len(),
                });
            }
            colors.push(accent);
        }

        Ok(Self { colors })
    }

    /// Number of colors (20 to 30).
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; the base rows are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of grid rows: 2 without accents, 3 with.
    #[inline]
    pub fn rows(&self) -> usize {
        self.colors.len().div_ceil(PALETTE_COLUMNS)
    }

    /// Grid shape as `(columns, rows)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (PALETTE_COLUMNS, self.rows())
    }

    /// All colors, row-major.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// The accent row (possibly empty).
    #[inline]
    pub fn accents(&self) -> &[Rgb] {
        &self.colors[BASE_ROWS * PALETTE_COLUMNS..]
    }

    /// Colors of one grid row, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[Rgb]> {
        let start = row * PALETTE_COLUMNS;
        if start >= self.colors.len() {
            return None;
        }
        let end = (start + PALETTE_COLUMNS).min(self.colors.len());
        Some(&self.colors[start..end])
    }

    /// Color at a grid coordinate.
    ///
    /// # Errors
    ///
    /// [`PaletteError::OutOfBounds`] if the coordinate addresses no entry.
    pub fn get(&self, coord: PaletteCoord) -> Result<Rgb, PaletteError> {
        let out_of_bounds = PaletteError::OutOfBounds {
            row: coord.row as usize,
            col: coord.col as usize,
        };
        if coord.col as usize >= PALETTE_COLUMNS {
            return Err(out_of_bounds);
        }
        self.colors.get(coord.flat()).copied().ok_or(out_of_bounds)
    }

    /// Every valid coordinate in enumeration (row-major) order.
    pub fn coords(&self) -> impl Iterator<Item = PaletteCoord> + '_ {
        (0..self.colors.len()).map(PaletteCoord::from_flat)
    }

    /// Render the palette as a swatch grid of `scale`-pixel squares.
    ///
    /// Returns `(width, height, rgb_bytes)`; unused accent cells stay black.
    pub fn swatch(&self, scale: usize) -> (usize, usize, Vec<u8>) {
        let (cols, rows) = self.shape();
        let width = cols * scale;
        let height = rows * scale;
        let mut rgb = vec![0u8; width * height * 3];

        for (i, color) in self.colors.iter().enumerate() {
            let coord = PaletteCoord::from_flat(i);
            let x0 = coord.col as usize * scale;
            let y0 = coord.row as usize * scale;
            for y in y0..y0 + scale {
                for x in x0..x0 + scale {
                    let offset = (y * width + x) * 3;
                    rgb[offset..offset + 3].copy_from_slice(&color.to_bytes());
                }
            }
        }

        (width, height, rgb)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::base()
    }
}

impl fmt::Display for Palette {
    /// One line per grid row, colors as `#RRGGBB` separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            let line: Vec<String> = self
                .row(row)
                .unwrap_or_default()
                .iter()
                .map(Rgb::to_string)
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

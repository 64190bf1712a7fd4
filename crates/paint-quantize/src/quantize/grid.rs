//! The quantizer's output: one palette coordinate per pixel.

use crate::palette::{Palette, PaletteCoord, PaletteError};

/// Per-pixel palette coordinates with the source image's dimensions.
///
/// Row-major, like [`RgbImage`](crate::RgbImage). Every stored coordinate
/// addresses an entry of the palette the grid was quantized against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
    width: usize,
    height: usize,
    cells: Vec<PaletteCoord>,
}

impl IndexGrid {
    /// Wrap precomputed cells.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or `cells.len() != width * height`.
    pub fn new(width: usize, height: usize, cells: Vec<PaletteCoord>) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be non-zero ({}x{})",
            width,
            height
        );
        assert_eq!(
            cells.len(),
            width * height,
            "cell count ({}) must match width * height ({}x{})",
            cells.len(),
            width,
            height
        );
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a grid from rows of coordinates.
    ///
    /// Convenient for tests and small fixtures.
    ///
    /// # Panics
    ///
    /// Panics if rows are empty or of unequal length.
    pub fn from_rows(rows: &[Vec<PaletteCoord>]) -> Self {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        assert!(width > 0, "grid rows must not be empty");
        assert!(
            rows.iter().all(|row| row.len() == width),
            "grid rows must all have the same length"
        );
        let cells = rows.iter().flatten().copied().collect();
        Self::new(width, rows.len(), cells)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[PaletteCoord] {
        &self.cells
    }

    /// Cell at column `x` of row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<PaletteCoord> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// One grid row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[PaletteCoord] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[PaletteCoord]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Number of cells classified as `coord`.
    pub fn count(&self, coord: PaletteCoord) -> usize {
        self.cells.iter().filter(|&&c| c == coord).count()
    }

    /// Reverse-map every cell to its palette color.
    ///
    /// Returns `[R, G, B, ...]` bytes of length `width * height * 3`.
    ///
    /// # Errors
    ///
    /// [`PaletteError::OutOfBounds`] if a cell does not address `palette`.
    pub fn to_rgb(&self, palette: &Palette) -> Result<Vec<u8>, PaletteError> {
        let mut rgb = Vec::with_capacity(self.cells.len() * 3);
        for &coord in &self.cells {
            rgb.extend_from_slice(&palette.get(coord)?.to_bytes());
        }
        Ok(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    const A: PaletteCoord = PaletteCoord::new(0, 0);
    const B: PaletteCoord = PaletteCoord::new(1, 0);

    #[test]
    fn test_accessors() {
        let grid = IndexGrid::from_rows(&[vec![A, B, A], vec![B, B, A]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(1, 0), Some(B));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.row(1), &[B, B, A]);
        assert_eq!(grid.rows().len(), 2);
        assert_eq!(grid.count(A), 3);
        assert_eq!(grid.count(PaletteCoord::new(0, 5)), 0);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_ragged_rows_panic() {
        IndexGrid::from_rows(&[vec![A, B], vec![A]]);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_zero_width_panics() {
        IndexGrid::new(0, 3, Vec::new());
    }

    #[test]
    fn test_to_rgb_reverse_maps() {
        let grid = IndexGrid::from_rows(&[vec![A, B]]);
        let rgb = grid.to_rgb(&Palette::base()).unwrap();
        assert_eq!(rgb, vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_to_rgb_rejects_foreign_coord() {
        let accent = PaletteCoord::new(2, 0);
        let grid = IndexGrid::from_rows(&[vec![accent]]);
        assert_eq!(
            grid.to_rgb(&Palette::base()),
            Err(PaletteError::OutOfBounds { row: 2, col: 0 })
        );

        let palette = Palette::with_accents(&[Rgb::new(5, 6, 7)]).unwrap();
        assert_eq!(grid.to_rgb(&palette).unwrap(), vec![5, 6, 7]);
    }
}

//! Nearest-color quantization.
//!
//! Every pixel is classified as the palette coordinate whose color is
//! nearest under the configured metric. Ties go to the first coordinate in
//! enumeration order. Rows are processed in parallel; each worker writes only
//! its own output rows.

mod grid;

use std::fmt;

use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};
use tracing::debug;

use crate::cancel::CancelToken;
use crate::color::{Rgb, RgbImage};
use crate::metric::{ColorDistance, DeltaE, DistanceMetric, Euclidean, Redmean};
use crate::palette::{Palette, PaletteCoord};

pub use grid::IndexGrid;

/// Error type for quantization.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantizeError {
    /// The run was cancelled before every row was classified
    Cancelled,
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::Cancelled => write!(f, "quantization cancelled"),
        }
    }
}

impl std::error::Error for QuantizeError {}

/// Maps pixels onto palette coordinates.
///
/// # Example
///
/// ```
/// use paint_quantize::{DistanceMetric, Palette, PaletteCoord, Quantizer, Rgb, RgbImage};
///
/// let image = RgbImage::new(2, 1, vec![Rgb::new(250, 250, 250), Rgb::new(5, 5, 5)]).unwrap();
/// let grid = Quantizer::new(DistanceMetric::Redmean).quantize(&image, &Palette::base());
///
/// assert_eq!(grid.row(0), &[PaletteCoord::new(1, 0), PaletteCoord::new(0, 0)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quantizer {
    metric: DistanceMetric,
}

impl Quantizer {
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }

    #[inline]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Classify every pixel of `image`.
    pub fn quantize(&self, image: &RgbImage, palette: &Palette) -> IndexGrid {
        match self.quantize_with_cancel(image, palette, &CancelToken::new()) {
            Ok(grid) => grid,
            // A fresh token is never cancelled.
            Err(QuantizeError::Cancelled) => unreachable!(),
        }
    }

    /// Classify every pixel, polling `cancel` before each row.
    pub fn quantize_with_cancel(
        &self,
        image: &RgbImage,
        palette: &Palette,
        cancel: &CancelToken,
    ) -> Result<IndexGrid, QuantizeError> {
        debug!(
            width = image.width(),
            height = image.height(),
            colors = palette.len(),
            metric = %self.metric,
            "quantizing image"
        );
        let grid = match self.metric {
            DistanceMetric::Redmean => quantize_rows::<Redmean>(image, palette, cancel),
            DistanceMetric::Euclidean => quantize_rows::<Euclidean>(image, palette, cancel),
            DistanceMetric::DeltaE => quantize_rows::<DeltaE>(image, palette, cancel),
        }?;
        debug!("quantization finished");
        Ok(grid)
    }

    /// Nearest palette coordinate for a single color.
    pub fn nearest(&self, color: Rgb, palette: &Palette) -> PaletteCoord {
        match self.metric {
            DistanceMetric::Redmean => nearest_in::<Redmean>(&prepare::<Redmean>(palette), color),
            DistanceMetric::Euclidean => {
                nearest_in::<Euclidean>(&prepare::<Euclidean>(palette), color)
            }
            DistanceMetric::DeltaE => nearest_in::<DeltaE>(&prepare::<DeltaE>(palette), color),
        }
    }
}

fn prepare<M: ColorDistance>(palette: &Palette) -> Vec<M::Point> {
    palette.colors().iter().map(|&c| M::prepare(c)).collect()
}

/// First coordinate with the smallest distance.
#[inline]
fn nearest_in<M: ColorDistance>(points: &[M::Point], color: Rgb) -> PaletteCoord {
    let pixel = M::prepare(color);
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (i, point) in points.iter().enumerate() {
        let d = M::between(&pixel, point);
        if d < best_distance {
            best = i;
            best_distance = d;
            if d == 0 {
                break;
            }
        }
    }
    PaletteCoord::from_flat(best)
}

fn quantize_rows<M: ColorDistance>(
    image: &RgbImage,
    palette: &Palette,
    cancel: &CancelToken,
) -> Result<IndexGrid, QuantizeError> {
    let points = prepare::<M>(palette);
    let width = image.width();
    let mut cells = vec![PaletteCoord::default(); width * image.height()];

    cells
        .par_chunks_mut(width)
        .zip(image.pixels().par_chunks(width))
        .try_for_each(|(out, row)| {
            if cancel.is_cancelled() {
                return Err(QuantizeError::Cancelled);
            }
            // Neighbouring pixels often repeat; reuse the last answer.
            let mut last: Option<(Rgb, PaletteCoord)> = None;
            for (cell, &pixel) in out.iter_mut().zip(row) {
                *cell = match last {
                    Some((color, coord)) if color == pixel => coord,
                    _ => {
                        let coord = nearest_in::<M>(&points, pixel);
                        last = Some((pixel, coord));
                        coord
                    }
                };
            }
            Ok(())
        })?;

    Ok(IndexGrid::new(width, image.height(), cells))
}

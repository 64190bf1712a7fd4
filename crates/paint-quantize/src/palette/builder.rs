//! Image-driven accent selection.
//!
//! [`PaletteBuilder`] derives up to ten accent colors from an image's most
//! frequent colors, keeping only those perceptually distinct from the base
//! palette and from each other.

use std::collections::HashMap;

use tracing::debug;

use super::error::PaletteError;
use super::palette::{base_colors, Palette, MAX_ACCENTS};
use crate::color::{RgbImage, Rgb};
use crate::metric::{ColorDistance, DeltaE, DistanceMetric, Euclidean, Redmean};

/// One entry of an image color histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    pub color: Rgb,
    /// Number of pixels with this color.
    pub count: usize,
    /// Row-major index of the first pixel with this color.
    pub first_seen: usize,
}

/// Count every distinct color and return the `limit` most frequent.
///
/// Ordered by count descending; equal counts keep first-appearance order so
/// the result is deterministic.
pub fn color_frequencies(pixels: &[Rgb], limit: usize) -> Vec<ColorCount> {
    let mut counts: HashMap<Rgb, (usize, usize)> = HashMap::new();
    for (i, &color) in pixels.iter().enumerate() {
        counts.entry(color).or_insert((0, i)).0 += 1;
    }

    let mut entries: Vec<ColorCount> = counts
        .into_iter()
        .map(|(color, (count, first_seen))| ColorCount {
            color,
            count,
            first_seen,
        })
        .collect();

    let by_frequency = |a: &ColorCount, b: &ColorCount| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    };

    if limit == 0 {
        return Vec::new();
    }
    if entries.len() > limit {
        // Partial selection first, the full sort only touches the survivors.
        entries.select_nth_unstable_by(limit - 1, by_frequency);
        entries.truncate(limit);
    }
    entries.sort_unstable_by(by_frequency);
    entries
}

/// Accent-palette builder.
///
/// Thresholds live on the chosen metric's own scale; when not set
/// explicitly they come from [`DistanceMetric::default_distinctiveness`]
/// and [`DistanceMetric::default_candidate_pool`].
///
/// # Example
///
/// ```
/// use paint_quantize::{DistanceMetric, PaletteBuilder, Rgb, RgbImage};
///
/// let image = RgbImage::filled(4, 4, Rgb::new(12, 200, 90)).unwrap();
/// let palette = PaletteBuilder::new(DistanceMetric::Redmean)
///     .accent_count(5)
///     .build(&image)
///     .unwrap();
///
/// // The dominant color never becomes an accent.
/// assert!(palette.accents().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteBuilder {
    metric: DistanceMetric,
    distinctiveness: u32,
    candidate_pool: usize,
    accent_count: usize,
}

impl PaletteBuilder {
    /// Builder with the metric's canonical thresholds and ten accents.
    pub fn new(metric: DistanceMetric) -> Self {
        Self {
            metric,
            distinctiveness: metric.default_distinctiveness(),
            candidate_pool: metric.default_candidate_pool(),
            accent_count: MAX_ACCENTS,
        }
    }

    /// Minimum distance an accent must keep from every accepted color.
    #[inline]
    pub fn distinctiveness(mut self, threshold: u32) -> Self {
        self.distinctiveness = threshold;
        self
    }

    /// Number of most-frequent colors examined.
    #[inline]
    pub fn candidate_pool(mut self, size: usize) -> Self {
        self.candidate_pool = size;
        self
    }

    /// Target number of accents (at most 10).
    #[inline]
    pub fn accent_count(mut self, count: usize) -> Self {
        self.accent_count = count;
        self
    }

    #[inline]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Check the settings without touching an image.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::TooManyAccents`] if the accent target exceeds 10
    /// - [`PaletteError::InvalidBuilder`] if the candidate pool does not
    ///   exceed the accent target
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.accent_count > MAX_ACCENTS {
            return Err(PaletteError::TooManyAccents {
                count: self.accent_count,
                max: MAX_ACCENTS,
            });
        }
        if self.candidate_pool <= self.accent_count {
            return Err(PaletteError::InvalidBuilder(format!(
                "candidate pool {} must exceed accent count {}",
                self.candidate_pool, self.accent_count
            )));
        }
        Ok(())
    }

    /// Select accent colors for `image`.
    ///
    /// Fewer accents than requested is normal for images with few distinct
    /// colors.
    pub fn select_accents(&self, image: &RgbImage) -> Result<Vec<Rgb>, PaletteError> {
        self.validate()?;
        let candidates = color_frequencies(image.pixels(), self.candidate_pool);
        debug!(
            distinct = candidates.len(),
            pool = self.candidate_pool,
            metric = %self.metric,
            "ranked candidate colors"
        );

        let accents = match self.metric {
            DistanceMetric::Redmean => self.pick::<Redmean>(&candidates),
            DistanceMetric::Euclidean => self.pick::<Euclidean>(&candidates),
            DistanceMetric::DeltaE => self.pick::<DeltaE>(&candidates),
        };
        debug!(accepted = accents.len(), target = self.accent_count, "selected accents");
        Ok(accents)
    }

    /// Build the working palette for `image`.
    pub fn build(&self, image: &RgbImage) -> Result<Palette, PaletteError> {
        let accents = self.select_accents(image)?;
        Palette::with_accents(&accents)
    }

    /// Greedy scan over candidates in frequency order.
    ///
    /// The distinct set starts with the base palette and the dominant image
    /// color; the dominant color is never emitted as an accent.
    fn pick<M: ColorDistance>(&self, candidates: &[ColorCount]) -> Vec<Rgb> {
        let mut distinct: Vec<M::Point> = base_colors().map(M::prepare).collect();
        let mut accents = Vec::with_capacity(self.accent_count);

        let mut rest = candidates.iter();
        if let Some(dominant) = rest.next() {
            distinct.push(M::prepare(dominant.color));
        }

        for candidate in rest {
            if accents.len() >= self.accent_count {
                break;
            }
            let point = M::prepare(candidate.color);
            let is_distinct = distinct
                .iter()
                .all(|accepted| M::between(&point, accepted) > self.distinctiveness);
            if is_distinct {
                distinct.push(point);
                accents.push(candidate.color);
            }
        }

        accents
    }
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self::new(DistanceMetric::default())
    }
}

//! Distance kernels, one zero-sized type per metric.
//!
//! Hot loops are generic over [`ColorDistance`] so the metric is resolved
//! once, at monomorphization, rather than matched per comparison.

use crate::color::{Lab, Rgb};

/// A perceptual color distance.
///
/// `prepare` converts a color into whatever representation the metric
/// compares; it is called once per palette entry and once per pixel, never
/// per comparison. `between` must be symmetric and return 0 for identical
/// points.
pub trait ColorDistance: Send + Sync + 'static {
    /// Precomputed representation of one color.
    type Point: Copy + Send + Sync;

    fn prepare(color: Rgb) -> Self::Point;

    /// Integer distance, truncated toward zero.
    fn between(a: &Self::Point, b: &Self::Point) -> u32;

    #[inline]
    fn distance(a: Rgb, b: Rgb) -> u32 {
        Self::between(&Self::prepare(a), &Self::prepare(b))
    }
}

/// Red-weighted low-cost approximation (compuphase "redmean").
pub struct Redmean;

/// Unweighted Euclidean distance in RGB.
pub struct Euclidean;

/// CIE76 delta E: Euclidean distance in L*a*b*.
pub struct DeltaE;

impl ColorDistance for Redmean {
    type Point = Rgb;

    #[inline]
    fn prepare(color: Rgb) -> Rgb {
        color
    }

    #[inline]
    fn between(a: &Rgb, b: &Rgb) -> u32 {
        let mean_red = (a.red as f64 + b.red as f64) / 2.0;
        let dr = a.red as f64 - b.red as f64;
        let dg = a.green as f64 - b.green as f64;
        let db = a.blue as f64 - b.blue as f64;
        ((512.0 + mean_red) * dr * dr + 4.0 * dg * dg + (767.0 - mean_red) * db * db).sqrt() as u32
    }
}

impl ColorDistance for Euclidean {
    type Point = Rgb;

    #[inline]
    fn prepare(color: Rgb) -> Rgb {
        color
    }

    #[inline]
    fn between(a: &Rgb, b: &Rgb) -> u32 {
        let dr = a.red as i32 - b.red as i32;
        let dg = a.green as i32 - b.green as i32;
        let db = a.blue as i32 - b.blue as i32;
        ((dr * dr + dg * dg + db * db) as f64).sqrt() as u32
    }
}

impl ColorDistance for DeltaE {
    type Point = Lab;

    #[inline]
    fn prepare(color: Rgb) -> Lab {
        Lab::from(color)
    }

    #[inline]
    fn between(a: &Lab, b: &Lab) -> u32 {
        a.delta_e(*b) as u32
    }
}

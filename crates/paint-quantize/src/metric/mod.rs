//! Perceptual color distance metrics
//!
//! Three interchangeable variants are selected once at configuration time
//! through [`DistanceMetric`]. Per-pixel code never matches on the enum; it
//! is instantiated for one of the [`ColorDistance`] kernels instead.
//!
//! | Variant | Formula |
//! |---------|---------|
//! | `redmean` | `sqrt((512 + r̄)·dr² + 4·dg² + (767 − r̄)·db²)` |
//! | `euclidean` | `sqrt(dr² + dg² + db²)` |
//! | `deltaE` | Euclidean distance in CIE L*a*b* |
//!
//! All distances are truncated to non-negative integers, symmetric, and
//! zero for identical colors.

mod kernels;

use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;

pub use kernels::{ColorDistance, DeltaE, Euclidean, Redmean};

/// Error type for metric selection.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricError {
    /// Selector does not name a supported metric
    Unknown(String),
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricError::Unknown(name) => write!(
                f,
                "unknown distance metric '{}' (expected redmean, euclidean or deltaE)",
                name
            ),
        }
    }
}

impl std::error::Error for MetricError {}

/// Distance metric selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceMetric {
    /// Red-weighted RGB approximation. Cheap and the historical default.
    #[default]
    Redmean,
    /// Plain Euclidean distance in RGB.
    Euclidean,
    /// CIE76 delta E in L*a*b*.
    DeltaE,
}

impl DistanceMetric {
    /// All variants in declaration order.
    pub const ALL: [DistanceMetric; 3] = [
        DistanceMetric::Redmean,
        DistanceMetric::Euclidean,
        DistanceMetric::DeltaE,
    ];

    /// Distance between two colors.
    ///
    /// Convenience for one-off comparisons. Loops over many pixels should go
    /// through a [`ColorDistance`] kernel.
    ///
    /// ```
    /// use paint_quantize::{DistanceMetric, Rgb};
    ///
    /// let d = DistanceMetric::Euclidean.distance(Rgb::new(3, 4, 0), Rgb::new(0, 0, 0));
    /// assert_eq!(d, 5);
    /// ```
    #[inline]
    pub fn distance(self, a: Rgb, b: Rgb) -> u32 {
        match self {
            DistanceMetric::Redmean => Redmean::distance(a, b),
            DistanceMetric::Euclidean => Euclidean::distance(a, b),
            DistanceMetric::DeltaE => DeltaE::distance(a, b),
        }
    }

    /// `true` when `distance(a, b) < threshold` (strict).
    #[inline]
    pub fn is_near(self, a: Rgb, b: Rgb, threshold: u32) -> bool {
        self.distance(a, b) < threshold
    }

    /// Canonical distinctiveness threshold for accent selection.
    ///
    /// Each metric lives on its own scale: redmean spans roughly 0..9100,
    /// euclidean 0..441, deltaE 0..100.
    pub fn default_distinctiveness(self) -> u32 {
        match self {
            DistanceMetric::Redmean => 250,
            DistanceMetric::Euclidean => 50,
            DistanceMetric::DeltaE => 10,
        }
    }

    /// Canonical candidate-pool size for accent selection.
    pub fn default_candidate_pool(self) -> usize {
        250
    }

    /// Configuration name of the metric.
    pub fn name(self) -> &'static str {
        match self {
            DistanceMetric::Redmean => "redmean",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::DeltaE => "deltaE",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = MetricError;

    /// Parse a metric selector. Case-insensitive; `delta_e` and `delta-e`
    /// are accepted for deltaE.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redmean" => Ok(DistanceMetric::Redmean),
            "euclidean" => Ok(DistanceMetric::Euclidean),
            "deltae" | "delta_e" | "delta-e" => Ok(DistanceMetric::DeltaE),
            _ => Err(MetricError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic spread of colors covering the cube corners and interior.
    fn sample_colors() -> Vec<Rgb> {
        let mut colors = Vec::new();
        for r in (0..=255u16).step_by(51) {
            for g in (0..=255u16).step_by(85) {
                for b in (0..=255u16).step_by(51) {
                    colors.push(Rgb::new(r as u8, g as u8, b as u8));
                }
            }
        }
        colors.push(Rgb::new(237, 28, 36));
        colors.push(Rgb::new(1, 2, 3));
        colors
    }

    #[test]
    fn test_symmetry_and_identity_all_metrics() {
        let colors = sample_colors();
        for metric in DistanceMetric::ALL {
            for &a in &colors {
                assert_eq!(metric.distance(a, a), 0, "{metric}: d({a},{a}) != 0");
                for &b in &colors {
                    assert_eq!(
                        metric.distance(a, b),
                        metric.distance(b, a),
                        "{metric}: d({a},{b}) not symmetric"
                    );
                }
            }
        }
    }

    #[test]
    fn test_is_near_is_strict() {
        let a = Rgb::new(3, 4, 0);
        let b = Rgb::new(0, 0, 0);
        let metric = DistanceMetric::Euclidean;
        assert!(!metric.is_near(a, b, 5), "distance 5 is not < 5");
        assert!(metric.is_near(a, b, 6));

        let colors = sample_colors();
        for metric in DistanceMetric::ALL {
            for &a in colors.iter().take(12) {
                for &b in &colors {
                    for t in [0, 1, 10, 50, 250, 7000] {
                        assert_eq!(metric.is_near(a, b, t), metric.distance(a, b) < t);
                    }
                }
            }
        }
    }

    #[test]
    fn test_parse_metric_names() {
        assert_eq!("redmean".parse::<DistanceMetric>(), Ok(DistanceMetric::Redmean));
        assert_eq!("Euclidean".parse::<DistanceMetric>(), Ok(DistanceMetric::Euclidean));
        assert_eq!("deltaE".parse::<DistanceMetric>(), Ok(DistanceMetric::DeltaE));
        assert_eq!("delta_e".parse::<DistanceMetric>(), Ok(DistanceMetric::DeltaE));
    }

    #[test]
    fn test_parse_unknown_metric() {
        let err = "manhattan".parse::<DistanceMetric>().unwrap_err();
        assert_eq!(err, MetricError::Unknown("manhattan".to_string()));
        assert!(err.to_string().contains("manhattan"));
    }

    #[test]
    fn test_name_round_trips_through_parse() {
        for metric in DistanceMetric::ALL {
            assert_eq!(metric.name().parse::<DistanceMetric>(), Ok(metric));
        }
    }
}

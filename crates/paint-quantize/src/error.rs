//! Unified error type for the paint-quantize public API.
//!
//! [`RedrawError`] wraps every error type of the crate into a single enum
//! for convenient `?` propagation in application code.

use std::fmt;

use crate::color::ImageError;
use crate::instructions::{CompileError, ParseInstructionError, StoreError};
use crate::metric::MetricError;
use crate::palette::PaletteError;
use crate::quantize::QuantizeError;

/// Unified error type for the paint-quantize public API.
///
/// # Example
///
/// ```
/// use paint_quantize::{DistanceMetric, Palette, RedrawError, Rgb};
///
/// fn accent_palette(metric: &str, accents: &[Rgb]) -> Result<Palette, RedrawError> {
///     let _metric: DistanceMetric = metric.parse()?;
///     Ok(Palette::with_accents(accents)?)
/// }
///
/// let teal = Rgb::new(0, 90, 90);
/// assert!(accent_palette("redmean", &[teal]).is_ok());
/// assert!(accent_palette("manhattan", &[teal]).is_err());
/// assert!(matches!(
///     accent_palette("redmean", &[teal, teal]),
///     Err(RedrawError::Palette(_))
/// ));
/// ```
#[derive(Debug)]
pub enum RedrawError {
    /// Unknown distance metric selector
    Metric(MetricError),
    /// Pixel buffer does not match its dimensions
    Image(ImageError),
    /// Palette validation or lookup error
    Palette(PaletteError),
    /// Quantization was cancelled
    Quantize(QuantizeError),
    /// Compilation was cancelled or the store rejected a write
    Compile(CompileError),
    /// Instruction store failure outside compilation
    Store(StoreError),
    /// Stored instruction sequence could not be decoded
    ParseInstruction(ParseInstructionError),
}

impl fmt::Display for RedrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedrawError::Metric(err) => write!(f, "metric error: {}", err),
            RedrawError::Image(err) => write!(f, "image error: {}", err),
            RedrawError::Palette(err) => write!(f, "palette error: {}", err),
            RedrawError::Quantize(err) => write!(f, "quantize error: {}", err),
            RedrawError::Compile(err) => write!(f, "compile error: {}", err),
            RedrawError::Store(err) => write!(f, "store error: {}", err),
            RedrawError::ParseInstruction(err) => write!(f, "instruction error: {}", err),
        }
    }
}

impl std::error::Error for RedrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RedrawError::Metric(err) => Some(err),
            RedrawError::Image(err) => Some(err),
            RedrawError::Palette(err) => Some(err),
            RedrawError::Quantize(err) => Some(err),
            RedrawError::Compile(err) => Some(err),
            RedrawError::Store(err) => Some(err),
            RedrawError::ParseInstruction(err) => Some(err),
        }
    }
}

impl RedrawError {
    /// `true` if the error stems from a cancelled run.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            RedrawError::Quantize(QuantizeError::Cancelled)
                | RedrawError::Compile(CompileError::Cancelled)
        )
    }
}

macro_rules! impl_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for RedrawError {
                fn from(err: $source) -> Self {
                    RedrawError::$variant(err)
                }
            }
        )*
    };
}

impl_from! {
    MetricError => Metric,
    ImageError => Image,
    PaletteError => Palette,
    QuantizeError => Quantize,
    CompileError => Compile,
    StoreError => Store,
    ParseInstructionError => ParseInstruction,
}

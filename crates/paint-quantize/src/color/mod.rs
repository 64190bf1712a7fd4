//! Color types and the decoded pixel buffer
//!
//! - [`Rgb`]: 8-bit sRGB value type used everywhere in the pipeline
//! - [`Lab`]: CIE L*a*b*, only needed by the deltaE metric
//! - [`RgbImage`]: row-major pixel buffer with validated dimensions

mod image;
mod lab;
mod rgb;

pub use image::{ImageError, RgbImage};
pub use lab::Lab;
pub use rgb::Rgb;

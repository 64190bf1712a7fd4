#![allow(clippy::module_inception)]

//! paint-quantize: fixed-palette quantization and draw-instruction compilation
//!
//! This library turns an RGB image into per-color run-length drawing
//! instructions for a paint program whose color box is a fixed 10-column
//! grid. The grid holds two rows of base colors plus an optional row of up
//! to ten image-derived accents.
//!
//! # Quick Start
//!
//! ```
//! use paint_quantize::{
//!     CancelToken, DistanceMetric, DrawOrderPlanner, InstructionCompiler, MemoryStore,
//!     PaletteBuilder, Quantizer, Rgb, RgbImage,
//! };
//!
//! let image = RgbImage::new(
//!     2,
//!     2,
//!     vec![
//!         Rgb::new(237, 28, 36),
//!         Rgb::new(237, 28, 36),
//!         Rgb::new(63, 72, 204),
//!         Rgb::new(34, 177, 76),
//!     ],
//! )
//! .unwrap();
//!
//! let metric = DistanceMetric::Redmean;
//! let palette = PaletteBuilder::new(metric).build(&image).unwrap();
//! let grid = Quantizer::new(metric).quantize(&image, &palette);
//!
//! let mut store = MemoryStore::new();
//! InstructionCompiler::new()
//!     .compile_into(&grid, &palette, &mut store, &CancelToken::new())
//!     .unwrap();
//!
//! let order = DrawOrderPlanner::new().plan(&store).unwrap();
//! assert_eq!(order[0].to_string(), "0,3");
//! ```
//!
//! # Pipeline
//!
//! 1. [`PaletteBuilder`] ranks the image's colors by frequency and keeps the
//!    ones distinct from the base palette as accents.
//! 2. [`Quantizer`] maps every pixel to its nearest palette coordinate,
//!    producing an [`IndexGrid`].
//! 3. [`InstructionCompiler`] turns each coordinate's cells into maximal
//!    horizontal runs and writes them to an [`InstructionStore`].
//! 4. [`DrawOrderPlanner`] orders the stored keys by run count.
//!
//! # Distance Metrics
//!
//! [`DistanceMetric`] selects redmean (default), Euclidean RGB or CIE76
//! delta E. The choice is made once; per-pixel loops are monomorphized over
//! the matching [`ColorDistance`] kernel. Distinctiveness thresholds are on
//! each metric's own scale, see
//! [`DistanceMetric::default_distinctiveness`].

pub mod cancel;
pub mod color;
pub mod error;
pub mod instructions;
pub mod metric;
pub mod order;
pub mod palette;
pub mod quantize;

#[cfg(test)]
mod domain_tests;

pub use cancel::CancelToken;
pub use color::{ImageError, Lab, Rgb, RgbImage};
pub use error::RedrawError;
pub use instructions::{
    compile_color, CompileError, CompileSummary, CompiledColor, Instruction, InstructionCompiler,
    InstructionStore, MemoryStore, ParseInstructionError, StoreError,
};
pub use metric::{ColorDistance, DistanceMetric, MetricError};
pub use order::{DrawOrderPlanner, PlannedColor};
pub use palette::{
    Palette, PaletteBuilder, PaletteCoord, PaletteError, BASE_COLORS, MAX_ACCENTS,
    PALETTE_COLUMNS,
};
pub use quantize::{IndexGrid, QuantizeError, Quantizer};

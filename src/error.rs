use std::path::PathBuf;

use paint_quantize::{
    CompileError, ImageError, MetricError, PaletteError, QuantizeError, StoreError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid metric: {0}")]
    Metric(#[from] MetricError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Unsupported PNG format: {color:?} at {depth:?}")]
    UnsupportedFormat {
        color: png::ColorType,
        depth: png::BitDepth,
    },

    #[error("Invalid image: {0}")]
    Image(#[from] ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image error: {0}")]
    Image(#[from] ImageIoError),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Run cancelled")]
    Cancelled,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<QuantizeError> for PipelineError {
    fn from(e: QuantizeError) -> Self {
        match e {
            QuantizeError::Cancelled => PipelineError::Cancelled,
        }
    }
}

impl From<CompileError> for PipelineError {
    fn from(e: CompileError) -> Self {
        match e {
            CompileError::Cancelled => PipelineError::Cancelled,
            CompileError::Store(e) => PipelineError::Store(e),
        }
    }
}

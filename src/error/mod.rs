//! Error types for the image quality analyzer.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, QualityError>;

/// Main error type for the image quality analyzer.
#[derive(Error, Debug)]
pub enum QualityError {
    /// The two grids passed to a metric have different dimensions.
    #[error("Dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        /// Width of the first grid.
        left_width: usize,
        /// Height of the first grid.
        left_height: usize,
        /// Width of the second grid.
        right_width: usize,
        /// Height of the second grid.
        right_height: usize,
    },

    /// Grid is smaller than the SSIM window in at least one dimension.
    #[error("Image too small: {width}x{height} is smaller than the {window}x{window} SSIM window")]
    ImageTooSmall {
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
        /// SSIM window side length.
        window: usize,
    },

    /// A precondition on an input value was violated.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A computed value is NaN or an unexpected infinity.
    #[error("Numeric fault: {0}")]
    NumericFault(String),

    /// Input file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Image decoding or encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for QualityError {
    fn from(err: toml::de::Error) -> Self {
        QualityError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for QualityError {
    fn from(err: toml::ser::Error) -> Self {
        QualityError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for QualityError {
    fn from(err: serde_json::Error) -> Self {
        QualityError::Serialization(err.to_string())
    }
}

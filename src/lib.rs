//! Image Compression Quality Analyzer
//!
//! Objective quality metrics for evaluating a lossy image codec: compare an
//! original image with its re-encoded version and quantify the distortion
//! against the size savings.
//!
//! # Features
//!
//! - **MSE / PSNR**: Pixel-level fidelity, with PSNR = infinity for identical images
//! - **SSIM**: Windowed structural similarity (7x7 uniform window)
//! - **Size metrics**: Compression ratio and bits-per-pixel
//! - **Reporting**: Text table, results banner, JSON and a three-panel heat-map figure
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use imgqa::{ImageComparator, PixelGrid, SizeInfo};
//!
//! let original = PixelGrid::new(16, 16, vec![128; 256])?;
//! let compressed = PixelGrid::new(16, 16, vec![130; 256])?;
//! let sizes = SizeInfo::new(65_000, 4_200, original.pixel_count());
//!
//! let result = ImageComparator::new().compare(&original, &compressed, &sizes)?;
//! println!("PSNR: {:.2} dB, SSIM: {:.4}", result.psnr, result.ssim);
//! ```
//!
//! The metric engine in [`metrics`] is pure: it never touches the filesystem.
//! Decoding lives in [`loader`], presentation in [`report`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod report;

// Re-export commonly used types
pub use config::{AnalysisConfig, LoaderConfig, ReportConfig, ResizeFilter};
pub use error::{QualityError, Result};
pub use loader::{load_grayscale, load_pair, ImagePair};
pub use metrics::{
    compute_mse, compute_psnr, compute_size_metrics, compute_ssim, ImageComparator,
    MetricResult, SizeInfo, SizeMetrics, SsimConfig,
};

/// Immutable 8-bit grayscale pixel grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Create a grid from row-major samples.
    ///
    /// Fails with [`QualityError::InvalidInput`] if either dimension is zero
    /// or the sample count does not equal `width * height`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(QualityError::InvalidInput(format!(
                "grid dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }

        let expected = width.checked_mul(height).ok_or_else(|| {
            QualityError::InvalidInput(format!("grid {}x{} overflows usize", width, height))
        })?;
        if data.len() != expected {
            return Err(QualityError::InvalidInput(format!(
                "pixel data size mismatch: expected {} samples, got {}",
                expected,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a grid filled with a single value.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self> {
        Self::new(width, height, vec![value; width.saturating_mul(height)])
    }

    /// Create a grid by evaluating `f(x, y)` for every position.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> u8,
    {
        let mut data = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(width, height, data)
    }

    /// Grid width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of samples.
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Sample at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.data[y * self.width + x]
    }

    /// Row-major samples.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the grid, returning the row-major samples.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// Library version information.
pub mod version {
    /// Library version string.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Library name.
    pub const NAME: &str = env!("CARGO_PKG_NAME");

    /// Get full version string.
    pub fn full_version() -> String {
        format!("{} {}", NAME, VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_grid_new() {
        let grid = PixelGrid::new(4, 2, (0..8).collect()).unwrap();
        assert_eq!(grid.dimensions(), (4, 2));
        assert_eq!(grid.pixel_count(), 8);
        assert_eq!(grid.get(3, 1), 7);
    }

    #[test]
    fn test_pixel_grid_size_mismatch() {
        let err = PixelGrid::new(4, 4, vec![0; 10]).unwrap_err();
        assert!(matches!(err, QualityError::InvalidInput(_)));
    }

    #[test]
    fn test_pixel_grid_zero_dimensions() {
        assert!(matches!(
            PixelGrid::new(0, 4, Vec::new()),
            Err(QualityError::InvalidInput(_))
        ));
        assert!(matches!(
            PixelGrid::filled(4, 0, 1),
            Err(QualityError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_pixel_grid_from_fn() {
        let grid = PixelGrid::from_fn(3, 3, |x, y| (y * 3 + x) as u8).unwrap();
        assert_eq!(grid.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(grid.get(1, 2), 7);
    }

    #[test]
    fn test_version() {
        assert!(version::full_version().starts_with("imgqa "));
    }
}

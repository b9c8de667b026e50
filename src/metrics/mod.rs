//! Quality metrics for lossy image compression.
//!
//! This module is the metric engine. Every function is a pure computation
//! over in-memory [`PixelGrid`]s:
//! - **MSE / PSNR**: Pixel-level fidelity
//! - **SSIM** (Structural Similarity Index): Windowed perceptual similarity
//! - **Size metrics**: Compression ratio and bits-per-pixel
//!
//! # Example
//!
//! ```rust,ignore
//! use imgqa::metrics::{compute_mse, compute_psnr, compute_ssim};
//!
//! let mse = compute_mse(&original, &compressed)?;
//! println!("PSNR: {:.2} dB", compute_psnr(mse)?);
//! println!("SSIM: {:.4}", compute_ssim(&original, &compressed, 255.0)?);
//! ```

mod comparator;
mod psnr;
mod size;
mod ssim;

pub use comparator::{ErrorStatistics, ImageComparator, MetricResult};
pub use psnr::{compute_mse, compute_psnr, psnr_rating, psnr_with_peak, MAX_PIXEL_VALUE};
pub use size::{compute_size_metrics, SizeInfo, SizeMetrics};
pub use ssim::{calculate_ssim, compute_ssim, ssim_rating, SsimConfig, SsimResult};

use crate::error::{QualityError, Result};
use crate::PixelGrid;

/// Validate that two grids can be compared.
pub(crate) fn validate_dimensions(left: &PixelGrid, right: &PixelGrid) -> Result<()> {
    if left.dimensions() != right.dimensions() {
        return Err(QualityError::DimensionMismatch {
            left_width: left.width(),
            left_height: left.height(),
            right_width: right.width(),
            right_height: right.height(),
        });
    }
    Ok(())
}

/// Per-pixel absolute difference `|a - b|`, row-major.
pub fn difference_map(left: &PixelGrid, right: &PixelGrid) -> Result<Vec<u8>> {
    validate_dimensions(left, right)?;
    Ok(left
        .as_slice()
        .iter()
        .zip(right.as_slice())
        .map(|(&a, &b)| a.abs_diff(b))
        .collect())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimensions_matching() {
        let a = PixelGrid::filled(64, 64, 128).unwrap();
        let b = PixelGrid::filled(64, 64, 100).unwrap();
        assert!(validate_dimensions(&a, &b).is_ok());
    }

    #[test]
    fn test_validate_dimensions_mismatch() {
        let a = PixelGrid::filled(64, 64, 128).unwrap();
        let b = PixelGrid::filled(32, 64, 128).unwrap();
        match validate_dimensions(&a, &b) {
            Err(QualityError::DimensionMismatch {
                left_width,
                right_width,
                ..
            }) => {
                assert_eq!(left_width, 64);
                assert_eq!(right_width, 32);
            }
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_difference_map() {
        let a = PixelGrid::new(2, 2, vec![0, 10, 200, 255]).unwrap();
        let b = PixelGrid::new(2, 2, vec![5, 10, 100, 0]).unwrap();
        assert_eq!(difference_map(&a, &b).unwrap(), vec![5, 0, 100, 255]);
    }
}

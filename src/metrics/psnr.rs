//! MSE and PSNR (Peak Signal-to-Noise Ratio) calculation.
//!
//! PSNR is a common metric for measuring the quality of lossy compression.
//! Higher values indicate better quality (less distortion).
//!
//! - Identical images: PSNR = infinity (MSE = 0)
//! - High quality: PSNR > 40 dB
//! - Good quality: PSNR 30-40 dB
//! - Acceptable: PSNR 20-30 dB

use crate::error::{QualityError, Result};
use crate::PixelGrid;

use super::validate_dimensions;

/// Maximum sample value of an 8-bit grayscale image.
pub const MAX_PIXEL_VALUE: f64 = 255.0;

/// Calculate the Mean Squared Error between two grids.
///
/// Squared differences are accumulated in `f64`, so the result is exact for
/// any 8-bit grid that fits in memory.
///
/// # Errors
///
/// Returns [`QualityError::DimensionMismatch`] if the grids differ in size.
///
/// # Example
///
/// ```rust,ignore
/// use imgqa::metrics::compute_mse;
///
/// let mse = compute_mse(&original, &compressed)?;
/// println!("MSE: {:.4}", mse);
/// ```
pub fn compute_mse(original: &PixelGrid, compressed: &PixelGrid) -> Result<f64> {
    validate_dimensions(original, compressed)?;

    let sum: f64 = original
        .as_slice()
        .iter()
        .zip(compressed.as_slice())
        .map(|(&o, &c)| {
            let diff = o as f64 - c as f64;
            diff * diff
        })
        .sum();

    Ok(sum / original.pixel_count() as f64)
}

/// Calculate PSNR in decibels for an 8-bit image from its MSE.
///
/// Returns `f64::INFINITY` when `mse == 0` (no measurable distortion).
///
/// # Errors
///
/// Returns [`QualityError::InvalidInput`] if `mse` is negative or not finite.
pub fn compute_psnr(mse: f64) -> Result<f64> {
    psnr_with_peak(mse, MAX_PIXEL_VALUE)
}

/// Calculate PSNR for an arbitrary peak value: `20 * log10(peak / sqrt(mse))`.
pub fn psnr_with_peak(mse: f64, peak: f64) -> Result<f64> {
    if !mse.is_finite() || mse < 0.0 {
        return Err(QualityError::InvalidInput(format!(
            "MSE must be a finite non-negative number, got {}",
            mse
        )));
    }
    if !peak.is_finite() || peak <= 0.0 {
        return Err(QualityError::InvalidInput(format!(
            "peak value must be positive, got {}",
            peak
        )));
    }

    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }

    Ok(20.0 * (peak / mse.sqrt()).log10())
}

/// Get a quality rating based on a PSNR value.
pub fn psnr_rating(psnr_db: f64) -> &'static str {
    if psnr_db.is_infinite() {
        "Lossless (identical)"
    } else if psnr_db > 50.0 {
        "Excellent"
    } else if psnr_db > 40.0 {
        "Very Good"
    } else if psnr_db > 30.0 {
        "Good"
    } else if psnr_db > 20.0 {
        "Fair"
    } else {
        "Poor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::strategies::grid_pair;
    use proptest::prelude::*;

    #[test]
    fn test_mse_identical_grids() {
        let grid = PixelGrid::from_fn(64, 64, |x, y| ((x * 7 + y * 3) % 256) as u8).unwrap();
        assert_eq!(compute_mse(&grid, &grid).unwrap(), 0.0);
    }

    #[test]
    fn test_mse_constant_offset() {
        let a = PixelGrid::filled(64, 64, 100).unwrap();
        let b = PixelGrid::filled(64, 64, 110).unwrap();
        // (100-110)^2 = 100
        assert_eq!(compute_mse(&a, &b).unwrap(), 100.0);
    }

    #[test]
    fn test_mse_offset_on_textured_grid() {
        let a = PixelGrid::from_fn(16, 16, |x, y| (x * 8 + y) as u8).unwrap();
        let b = PixelGrid::from_fn(16, 16, |x, y| (x * 8 + y + 3) as u8).unwrap();
        assert_eq!(compute_mse(&a, &b).unwrap(), 9.0);
    }

    #[test]
    fn test_mse_symmetric() {
        let a = PixelGrid::from_fn(13, 9, |x, y| (x * 19 + y * 5) as u8).unwrap();
        let b = PixelGrid::from_fn(13, 9, |x, y| (x * 3 + y * 29) as u8).unwrap();
        assert_eq!(compute_mse(&a, &b).unwrap(), compute_mse(&b, &a).unwrap());
    }

    proptest! {
        #[test]
        fn prop_mse_identity((a, _b) in grid_pair(1..24)) {
            prop_assert_eq!(compute_mse(&a, &a).unwrap(), 0.0);
        }

        #[test]
        fn prop_mse_symmetric((a, b) in grid_pair(1..24)) {
            prop_assert_eq!(compute_mse(&a, &b).unwrap(), compute_mse(&b, &a).unwrap());
        }

        #[test]
        fn prop_mse_bounded((a, b) in grid_pair(1..24)) {
            let mse = compute_mse(&a, &b).unwrap();
            prop_assert!((0.0..=65025.0).contains(&mse));
            prop_assert_eq!(mse == 0.0, a == b);
        }
    }

    #[test]
    fn test_mse_full_range() {
        let black = PixelGrid::filled(16, 16, 0).unwrap();
        let white = PixelGrid::filled(16, 16, 255).unwrap();
        assert_eq!(compute_mse(&black, &white).unwrap(), 65025.0);
    }

    #[test]
    fn test_mse_dimension_mismatch() {
        let a = PixelGrid::filled(8, 8, 0).unwrap();
        let b = PixelGrid::filled(8, 9, 0).unwrap();
        assert!(matches!(
            compute_mse(&a, &b),
            Err(QualityError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_psnr_zero_mse_is_infinite() {
        let psnr = compute_psnr(0.0).unwrap();
        assert!(psnr.is_infinite() && psnr > 0.0);
    }

    #[test]
    fn test_psnr_known_values() {
        assert_eq!(compute_psnr(65025.0).unwrap(), 0.0);
        // 20 * log10(255 / 10) ≈ 28.13 dB
        let psnr = compute_psnr(100.0).unwrap();
        assert!((psnr - 28.1308).abs() < 1e-3);
    }

    #[test]
    fn test_psnr_rejects_invalid_mse() {
        assert!(matches!(compute_psnr(-1.0), Err(QualityError::InvalidInput(_))));
        assert!(matches!(compute_psnr(f64::NAN), Err(QualityError::InvalidInput(_))));
        assert!(matches!(
            compute_psnr(f64::INFINITY),
            Err(QualityError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_psnr_with_peak() {
        // 12-bit peak
        let psnr = psnr_with_peak(1.0, 4095.0).unwrap();
        assert!((psnr - 20.0 * 4095f64.log10()).abs() < 1e-9);
        assert!(psnr_with_peak(1.0, 0.0).is_err());
    }

    #[test]
    fn test_psnr_ratings() {
        assert_eq!(psnr_rating(f64::INFINITY), "Lossless (identical)");
        assert_eq!(psnr_rating(55.0), "Excellent");
        assert_eq!(psnr_rating(35.0), "Good");
        assert_eq!(psnr_rating(15.0), "Poor");
    }
}

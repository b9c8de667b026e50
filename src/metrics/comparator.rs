//! Image comparator for complete quality analysis.
//!
//! Combines MSE/PSNR, SSIM and the size-derived metrics into a single
//! validated [`MetricResult`].

use serde::Serialize;

use crate::error::{QualityError, Result};
use crate::PixelGrid;

use super::{
    calculate_ssim, compute_mse, compute_psnr, psnr_rating, ssim_rating, validate_dimensions,
    SizeInfo, SizeMetrics, SsimConfig,
};

/// Aggregated quality metrics for one image pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricResult {
    /// Mean Squared Error (0.0 for identical images).
    pub mse: f64,
    /// PSNR in decibels; `f64::INFINITY` for identical images.
    pub psnr: f64,
    /// Mean SSIM.
    pub ssim: f64,
    /// Original size divided by compressed size.
    pub compression_ratio: f64,
    /// Compressed bits per pixel.
    pub bits_per_pixel: f64,
}

impl MetricResult {
    /// Assemble a result, rejecting NaN and unexpected infinities.
    ///
    /// Only `psnr` may be infinite, and only positively.
    ///
    /// # Errors
    ///
    /// Returns [`QualityError::NumericFault`] naming the first offending field.
    pub fn new(mse: f64, psnr: f64, ssim: f64, size: SizeMetrics) -> Result<Self> {
        let fields = [
            ("mse", mse, false),
            ("psnr", psnr, true),
            ("ssim", ssim, false),
            ("compression_ratio", size.compression_ratio, false),
            ("bits_per_pixel", size.bits_per_pixel, false),
        ];

        for (name, value, infinity_allowed) in fields {
            if value.is_nan() {
                return Err(QualityError::NumericFault(format!("{} is NaN", name)));
            }
            let allowed = value.is_finite() || (infinity_allowed && value == f64::INFINITY);
            if !allowed {
                return Err(QualityError::NumericFault(format!(
                    "{} is not finite ({})",
                    name, value
                )));
            }
        }

        Ok(Self {
            mse,
            psnr,
            ssim,
            compression_ratio: size.compression_ratio,
            bits_per_pixel: size.bits_per_pixel,
        })
    }

    /// Check if the images are identical (no distortion).
    pub fn is_lossless(&self) -> bool {
        self.mse == 0.0
    }

    /// Get an overall quality summary.
    pub fn overall_quality(&self) -> &'static str {
        if self.is_lossless() {
            return "Lossless (identical)";
        }

        // Weight SSIM more heavily as it's more perceptually relevant
        if self.ssim >= 0.99 && self.psnr >= 45.0 {
            "Excellent"
        } else if self.ssim >= 0.95 && self.psnr >= 40.0 {
            "Very Good"
        } else if self.ssim >= 0.90 && self.psnr >= 35.0 {
            "Good"
        } else if self.ssim >= 0.80 && self.psnr >= 30.0 {
            "Acceptable"
        } else if self.ssim >= 0.60 {
            "Fair"
        } else {
            "Poor"
        }
    }

    /// PSNR quality rating.
    pub fn psnr_rating(&self) -> &'static str {
        psnr_rating(self.psnr)
    }

    /// SSIM quality rating.
    pub fn ssim_rating(&self) -> &'static str {
        ssim_rating(self.ssim)
    }
}

/// Absolute error statistics between two grids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorStatistics {
    /// Maximum absolute difference between any two pixels.
    pub max_error: u8,
    /// Mean absolute difference between pixels.
    pub mean_error: f64,
    /// Number of pixels that differ.
    pub diff_pixel_count: usize,
    /// Percentage of pixels that differ (0-100).
    pub diff_pixels_percent: f64,
    /// Total number of pixels compared.
    pub total_pixels: usize,
}

/// Utility for comparing original and compressed images.
#[derive(Debug, Clone, Default)]
pub struct ImageComparator {
    /// SSIM configuration.
    ssim_config: SsimConfig,
}

impl ImageComparator {
    /// Create a new image comparator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a comparator with custom SSIM configuration.
    pub fn with_ssim_config(ssim_config: SsimConfig) -> Self {
        Self { ssim_config }
    }

    /// SSIM configuration in use.
    pub fn ssim_config(&self) -> &SsimConfig {
        &self.ssim_config
    }

    /// Compare two grids and aggregate all metrics.
    ///
    /// # Errors
    ///
    /// Propagates the engine errors: dimension mismatch, image smaller than
    /// the SSIM window, zero pixel count, and NaN/infinite results.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use imgqa::{ImageComparator, SizeInfo};
    ///
    /// let sizes = SizeInfo::new(orig_bytes, comp_bytes, original.pixel_count());
    /// let result = ImageComparator::new().compare(&original, &compressed, &sizes)?;
    /// println!("SSIM: {:.4}", result.ssim);
    /// ```
    pub fn compare(
        &self,
        original: &PixelGrid,
        compressed: &PixelGrid,
        sizes: &SizeInfo,
    ) -> Result<MetricResult> {
        let mse = compute_mse(original, compressed)?;
        let psnr = compute_psnr(mse)?;
        let ssim = calculate_ssim(original, compressed, &self.ssim_config)?.ssim;
        let size = sizes.metrics()?;

        log::debug!(
            "Metrics: mse={:.4} psnr={:.2} ssim={:.4} ratio={:.2} bpp={:.3}",
            mse,
            psnr,
            ssim,
            size.compression_ratio,
            size.bits_per_pixel
        );

        MetricResult::new(mse, psnr, ssim, size)
    }

    /// Calculate absolute error statistics.
    pub fn error_statistics(
        &self,
        original: &PixelGrid,
        compressed: &PixelGrid,
    ) -> Result<ErrorStatistics> {
        validate_dimensions(original, compressed)?;

        let mut max_error = 0u8;
        let mut sum_abs_error = 0.0;
        let mut diff_count = 0usize;

        for (&o, &c) in original.as_slice().iter().zip(compressed.as_slice()) {
            let diff = o.abs_diff(c);
            if diff > 0 {
                diff_count += 1;
            }
            max_error = max_error.max(diff);
            sum_abs_error += diff as f64;
        }

        let total = original.pixel_count();
        let n = total as f64;
        Ok(ErrorStatistics {
            max_error,
            mean_error: sum_abs_error / n,
            diff_pixel_count: diff_count,
            diff_pixels_percent: (diff_count as f64 / n) * 100.0,
            total_pixels: total,
        })
    }

    /// Check if two grids are identical.
    pub fn is_identical(&self, original: &PixelGrid, compressed: &PixelGrid) -> bool {
        original == compressed
    }
}

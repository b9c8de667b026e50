//! Size-derived metrics: compression ratio and bits-per-pixel.

use serde::{Deserialize, Serialize};

use crate::error::{QualityError, Result};

/// Byte sizes of the two source files plus the image pixel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeInfo {
    /// Original file size in bytes.
    pub original_bytes: u64,
    /// Compressed file size in bytes.
    pub compressed_bytes: u64,
    /// Number of pixels in the compared image.
    pub pixel_count: usize,
}

impl SizeInfo {
    /// Create a new size record.
    pub fn new(original_bytes: u64, compressed_bytes: u64, pixel_count: usize) -> Self {
        Self {
            original_bytes,
            compressed_bytes,
            pixel_count,
        }
    }

    /// Compute the size-derived metrics for this record.
    pub fn metrics(&self) -> Result<SizeMetrics> {
        compute_size_metrics(self.original_bytes, self.compressed_bytes, self.pixel_count)
    }

    /// Space savings as a percentage of the original size.
    pub fn space_savings_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            (1.0 - (self.compressed_bytes as f64 / self.original_bytes as f64)) * 100.0
        }
    }
}

/// Compression ratio and bits-per-pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeMetrics {
    /// Original size divided by compressed size (0 for an empty compressed file).
    pub compression_ratio: f64,
    /// Compressed size in bits divided by pixel count.
    pub bits_per_pixel: f64,
}

/// Calculate compression ratio and bits-per-pixel.
///
/// An empty compressed file yields a compression ratio of `0`, not an error.
///
/// # Errors
///
/// Returns [`QualityError::InvalidInput`] if `pixel_count` is zero.
pub fn compute_size_metrics(
    original_bytes: u64,
    compressed_bytes: u64,
    pixel_count: usize,
) -> Result<SizeMetrics> {
    if pixel_count == 0 {
        return Err(QualityError::InvalidInput(
            "pixel count must be positive to compute bits per pixel".into(),
        ));
    }

    let compression_ratio = if compressed_bytes > 0 {
        original_bytes as f64 / compressed_bytes as f64
    } else {
        0.0
    };
    let bits_per_pixel = (compressed_bytes as f64 * 8.0) / pixel_count as f64;

    Ok(SizeMetrics {
        compression_ratio,
        bits_per_pixel,
    })
}

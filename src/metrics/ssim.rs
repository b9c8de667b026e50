//! SSIM (Structural Similarity Index) calculation.
//!
//! SSIM is a perceptual metric that measures structural similarity between images.
//! It considers luminance, contrast, and structure, making it more aligned with
//! human visual perception than PSNR.
//!
//! Local statistics come from a square **uniform** window (7x7 by default)
//! slid over every position where it fits entirely inside the image. No
//! padding is applied, so the SSIM map is `window_size - 1` smaller than the
//! image in each dimension. Variances and covariance use the sample
//! normalisation `1 / (N - 1)` unless `sample_covariance` is disabled.
//!
//! - SSIM = 1.0: Identical images
//! - SSIM > 0.95: Excellent quality (nearly imperceptible difference)
//! - SSIM > 0.90: Good quality
//! - SSIM > 0.80: Acceptable quality

use serde::{Deserialize, Serialize};

use crate::error::{QualityError, Result};
use crate::PixelGrid;

use super::validate_dimensions;

/// Configuration for SSIM calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SsimConfig {
    /// Side of the square window for local statistics (default: 7).
    /// Must be odd and at least 3.
    pub window_size: usize,

    /// K1 constant for luminance comparison (default: 0.01).
    pub k1: f64,

    /// K2 constant for contrast/structure comparison (default: 0.03).
    pub k2: f64,

    /// Dynamic range `L` of the samples (default: 255).
    pub dynamic_range: f64,

    /// Normalise local (co)variances by `N - 1` instead of `N` (default: true).
    pub sample_covariance: bool,

    /// Whether to generate a spatial SSIM map.
    #[serde(skip)]
    pub generate_map: bool,
}

impl Default for SsimConfig {
    fn default() -> Self {
        Self {
            window_size: 7,
            k1: 0.01,
            k2: 0.03,
            dynamic_range: 255.0,
            sample_covariance: true,
            generate_map: false,
        }
    }
}

impl SsimConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set window size.
    pub fn window_size(mut self, size: usize) -> Self {
        self.window_size = size;
        self
    }

    /// Set the dynamic range `L`.
    pub fn dynamic_range(mut self, range: f64) -> Self {
        self.dynamic_range = range;
        self
    }

    /// Choose between sample (`N - 1`) and population (`N`) normalisation.
    pub fn sample_covariance(mut self, enabled: bool) -> Self {
        self.sample_covariance = enabled;
        self
    }

    /// Enable SSIM map generation.
    pub fn with_map(mut self) -> Self {
        self.generate_map = true;
        self
    }

    /// Check that the configuration describes a usable window and constants.
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 3 || self.window_size % 2 == 0 {
            return Err(QualityError::InvalidInput(format!(
                "SSIM window size must be odd and at least 3, got {}",
                self.window_size
            )));
        }
        if !self.dynamic_range.is_finite() || self.dynamic_range <= 0.0 {
            return Err(QualityError::InvalidInput(format!(
                "dynamic range must be positive, got {}",
                self.dynamic_range
            )));
        }
        for (name, k) in [("k1", self.k1), ("k2", self.k2)] {
            if !k.is_finite() || k <= 0.0 {
                return Err(QualityError::InvalidInput(format!(
                    "{} must be positive, got {}",
                    name, k
                )));
            }
        }
        Ok(())
    }

    /// `C1 = (k1 * L)^2`.
    pub fn c1(&self) -> f64 {
        (self.k1 * self.dynamic_range).powi(2)
    }

    /// `C2 = (k2 * L)^2`.
    pub fn c2(&self) -> f64 {
        (self.k2 * self.dynamic_range).powi(2)
    }
}

/// Result of SSIM calculation.
#[derive(Debug, Clone)]
pub struct SsimResult {
    /// Mean SSIM over all window positions.
    pub ssim: f64,

    /// SSIM map showing local similarity across the image, row-major.
    /// Only populated if `config.generate_map` is true.
    pub ssim_map: Option<Vec<f64>>,

    /// Map dimensions (width, height) if map is generated.
    pub map_dimensions: Option<(usize, usize)>,
}

impl SsimResult {
    /// Check if images are structurally identical.
    pub fn is_identical(&self) -> bool {
        (self.ssim - 1.0).abs() < f64::EPSILON
    }

    /// Get a quality rating based on SSIM value.
    pub fn quality_rating(&self) -> &'static str {
        ssim_rating(self.ssim)
    }
}

impl std::fmt::Display for SsimResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SSIM: {:.4} ({})", self.ssim, self.quality_rating())
    }
}

/// Get a quality rating based on an SSIM value.
pub fn ssim_rating(ssim: f64) -> &'static str {
    if ssim >= 0.999 {
        "Excellent (visually lossless)"
    } else if ssim >= 0.95 {
        "Very Good"
    } else if ssim >= 0.90 {
        "Good"
    } else if ssim >= 0.80 {
        "Fair"
    } else if ssim >= 0.60 {
        "Poor"
    } else {
        "Very Poor"
    }
}

/// Calculate mean SSIM with the default 7x7 uniform window.
///
/// # Errors
///
/// - [`QualityError::DimensionMismatch`] if the grids differ in size
/// - [`QualityError::ImageTooSmall`] if a grid is smaller than the window
/// - [`QualityError::InvalidInput`] if `dynamic_range` is not positive
pub fn compute_ssim(original: &PixelGrid, compressed: &PixelGrid, dynamic_range: f64) -> Result<f64> {
    let config = SsimConfig::default().dynamic_range(dynamic_range);
    Ok(calculate_ssim(original, compressed, &config)?.ssim)
}

/// Calculate SSIM between original and compressed grids.
///
/// # Example
///
/// ```rust,ignore
/// use imgqa::metrics::{calculate_ssim, SsimConfig};
///
/// let config = SsimConfig::default().with_map();
/// let result = calculate_ssim(&original, &compressed, &config)?;
/// println!("SSIM: {:.4}", result.ssim);
/// ```
pub fn calculate_ssim(
    original: &PixelGrid,
    compressed: &PixelGrid,
    config: &SsimConfig,
) -> Result<SsimResult> {
    config.validate()?;
    validate_dimensions(original, compressed)?;

    let (width, height) = original.dimensions();
    let window = config.window_size;
    if width < window || height < window {
        return Err(QualityError::ImageTooSmall {
            width,
            height,
            window,
        });
    }

    let original_pixels = to_f64(original);
    let compressed_pixels = to_f64(compressed);
    let constants = WindowConstants::from_config(config);

    let map_width = width - window + 1;
    let map_height = height - window + 1;
    let mut ssim_map = config
        .generate_map
        .then(|| Vec::with_capacity(map_width * map_height));
    let mut total = 0.0;

    // Sliding window
    for y in 0..map_height {
        for x in 0..map_width {
            let value = window_ssim(
                &original_pixels,
                &compressed_pixels,
                width,
                x,
                y,
                &constants,
            );
            total += value;
            if let Some(map) = ssim_map.as_mut() {
                map.push(value);
            }
        }
    }

    let ssim = total / (map_width * map_height) as f64;
    log::debug!(
        "SSIM over {} windows ({}x{}): {:.6}",
        map_width * map_height,
        window,
        window,
        ssim
    );

    let map_dimensions = ssim_map.as_ref().map(|_| (map_width, map_height));
    Ok(SsimResult {
        ssim,
        ssim_map,
        map_dimensions,
    })
}

/// Values shared by every window evaluation.
struct WindowConstants {
    size: usize,
    count: f64,
    norm: f64,
    c1: f64,
    c2: f64,
}

impl WindowConstants {
    fn from_config(config: &SsimConfig) -> Self {
        let count = (config.window_size * config.window_size) as f64;
        Self {
            size: config.window_size,
            count,
            norm: if config.sample_covariance {
                count - 1.0
            } else {
                count
            },
            c1: config.c1(),
            c2: config.c2(),
        }
    }
}

fn to_f64(grid: &PixelGrid) -> Vec<f64> {
    grid.as_slice().iter().map(|&v| v as f64).collect()
}

/// SSIM of the window whose top-left corner is `(x, y)`.
fn window_ssim(
    original: &[f64],
    compressed: &[f64],
    width: usize,
    x: usize,
    y: usize,
    k: &WindowConstants,
) -> f64 {
    let rows = || (y..y + k.size).map(move |row| row * width + x);

    let mut orig_sum = 0.0;
    let mut comp_sum = 0.0;
    for start in rows() {
        orig_sum += original[start..start + k.size].iter().sum::<f64>();
        comp_sum += compressed[start..start + k.size].iter().sum::<f64>();
    }
    let mu_x = orig_sum / k.count;
    let mu_y = comp_sum / k.count;

    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;
    for start in rows() {
        let o = &original[start..start + k.size];
        let c = &compressed[start..start + k.size];
        for (&ov, &cv) in o.iter().zip(c) {
            let dx = ov - mu_x;
            let dy = cv - mu_y;
            var_x += dx * dx;
            var_y += dy * dy;
            cov_xy += dx * dy;
        }
    }
    let var_x = var_x / k.norm;
    let var_y = var_y / k.norm;
    let cov_xy = cov_xy / k.norm;

    ((2.0 * mu_x * mu_y + k.c1) * (2.0 * cov_xy + k.c2))
        / ((mu_x * mu_x + mu_y * mu_y + k.c1) * (var_x + var_y + k.c2))
}

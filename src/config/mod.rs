//! Configuration for an analysis run.
//!
//! Settings can be loaded from a TOML file; every section and key is
//! optional and falls back to its default:
//!
//! ```toml
//! [ssim]
//! window_size = 7
//! k1 = 0.01
//! k2 = 0.03
//! dynamic_range = 255.0
//! sample_covariance = true
//!
//! [loader]
//! resize_filter = "catmull-rom"
//!
//! [report]
//! figure_path = "analysis_result.png"
//! render_figure = true
//! json = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::SsimConfig;

/// Default output path for the comparison figure.
pub const DEFAULT_FIGURE_PATH: &str = "analysis_result.png";

/// Resampling filter used when the original must be resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Nearest neighbour
    Nearest,
    /// Bilinear
    Triangle,
    /// Bicubic
    #[default]
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3
    Lanczos3,
}

impl ResizeFilter {
    /// Corresponding `image` crate filter.
    pub fn filter_type(self) -> image::imageops::FilterType {
        use image::imageops::FilterType;

        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Loader settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoaderConfig {
    /// Filter for resizing the original to the compressed image's dimensions.
    pub resize_filter: ResizeFilter,
}

/// Reporter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Where the three-panel figure is written.
    pub figure_path: PathBuf,
    /// Whether to render the figure at all.
    pub render_figure: bool,
    /// Print the results as JSON instead of the text table.
    pub json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            figure_path: PathBuf::from(DEFAULT_FIGURE_PATH),
            render_figure: true,
            json: false,
        }
    }
}

/// Complete configuration for an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// SSIM window and constants.
    pub ssim: SsimConfig,
    /// Image loading.
    pub loader: LoaderConfig,
    /// Output.
    pub report: ReportConfig,
}

impl AnalysisConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(text)?;
        config.ssim.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QualityError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.ssim.window_size, 7);
        assert_eq!(config.ssim.dynamic_range, 255.0);
        assert_eq!(config.loader.resize_filter, ResizeFilter::CatmullRom);
        assert_eq!(config.report.figure_path, PathBuf::from("analysis_result.png"));
        assert!(config.report.render_figure);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AnalysisConfig::default();
        config.ssim.window_size = 11;
        config.loader.resize_filter = ResizeFilter::Lanczos3;
        config.report.json = true;

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("resize_filter = \"lanczos3\""));
        assert_eq!(AnalysisConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_toml() {
        let config = AnalysisConfig::from_toml_str("[ssim]\nwindow_size = 9\n").unwrap();
        assert_eq!(config.ssim.window_size, 9);
        assert_eq!(config.ssim.k1, 0.01);
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AnalysisConfig::from_toml_str("[ssim\nwindow_size = 9"),
            Err(QualityError::Config(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("[ssim]\nwindow_size = 8\n"),
            Err(QualityError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\nfigure_path = \"out.png\"\nrender_figure = false").unwrap();

        let config = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.report.figure_path, PathBuf::from("out.png"));
        assert!(!config.report.render_figure);
    }

    #[test]
    fn test_filter_mapping() {
        assert_eq!(
            ResizeFilter::Nearest.filter_type(),
            image::imageops::FilterType::Nearest
        );
    }
}

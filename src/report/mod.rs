//! Result presentation: text table, one-line banner, JSON and the figure.

mod figure;

pub use figure::{figure_dimensions, jet, render_figure, save_figure};

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::loader::ImagePair;
use crate::metrics::{ErrorStatistics, MetricResult, SizeInfo};

const RULE: &str = "--------------------------------------------------";

/// Everything reported for one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Original file path.
    pub original: PathBuf,
    /// Compressed file path.
    pub compressed: PathBuf,
    /// Compared width in pixels.
    pub width: usize,
    /// Compared height in pixels.
    pub height: usize,
    /// Whether the original was resized before comparison.
    pub resized: bool,
    /// File sizes.
    pub sizes: SizeInfo,
    /// Space savings as a percentage of the original size.
    pub space_savings_percent: f64,
    /// Quality metrics.
    pub metrics: MetricResult,
    /// Absolute error statistics.
    pub errors: ErrorStatistics,
}

impl AnalysisReport {
    /// Assemble a report for a loaded pair.
    pub fn new(pair: &ImagePair, metrics: MetricResult, errors: ErrorStatistics) -> Self {
        Self {
            original: pair.original_path.clone(),
            compressed: pair.compressed_path.clone(),
            width: pair.compressed.width(),
            height: pair.compressed.height(),
            resized: pair.resized,
            sizes: pair.sizes,
            space_savings_percent: pair.sizes.space_savings_percent(),
            metrics,
            errors,
        }
    }
}

/// Format the results table.
pub fn format_table(metrics: &MetricResult, sizes: &SizeInfo) -> String {
    let lines = [
        RULE.to_string(),
        "ANALYSIS RESULTS".to_string(),
        RULE.to_string(),
        format!("File Size Orig : {} bytes", sizes.original_bytes),
        format!("File Size Comp : {} bytes", sizes.compressed_bytes),
        format!("Comp. Ratio    : {:.2} : 1", metrics.compression_ratio),
        format!("Bits Per Pixel : {:.3} bpp", metrics.bits_per_pixel),
        RULE.to_string(),
        format!("MSE            : {:.4}", metrics.mse),
        format!("PSNR           : {:.2} dB", metrics.psnr),
        format!("SSIM           : {:.4}", metrics.ssim),
        RULE.to_string(),
    ];
    lines.join("\n")
}

/// One-line summary of all metrics.
pub fn banner(metrics: &MetricResult) -> String {
    format!(
        "MSE: {:.2}  |  PSNR: {:.2} dB  |  SSIM: {:.4}  |  CR: {:.1}:1  |  BPP: {:.3}",
        metrics.mse, metrics.psnr, metrics.ssim, metrics.compression_ratio, metrics.bits_per_pixel
    )
}

/// Serialize a report as pretty-printed JSON. Infinite PSNR becomes `null`.
pub fn to_json(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Print the table, quality ratings and banner to stdout.
pub fn print_report(report: &AnalysisReport) {
    println!("{}", format_table(&report.metrics, &report.sizes));
    println!(
        "Quality        : {} (PSNR: {}, SSIM: {})",
        report.metrics.overall_quality(),
        report.metrics.psnr_rating(),
        report.metrics.ssim_rating()
    );
    println!(
        "Max Abs Error  : {} ({:.2}% of pixels differ)",
        report.errors.max_error, report.errors.diff_pixels_percent
    );
    if report.resized {
        println!("Note           : original was resized to {}x{}", report.width, report.height);
    }
    println!("{}", RULE);
    println!("{}", banner(&report.metrics));
}

//! Command-line interface for the image quality analyzer.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{AnalysisConfig, ResizeFilter};
use crate::error::Result;
use crate::loader::load_pair;
use crate::metrics::ImageComparator;
use crate::report::{print_report, save_figure, to_json, AnalysisReport};
use crate::version;

/// Image Compression Quality Analyzer
///
/// Compares an original image with its lossily re-encoded version and
/// reports MSE, PSNR, SSIM, compression ratio and bits-per-pixel.
#[derive(Parser, Debug)]
#[command(name = "imgqa")]
#[command(author = "Image Codec Team")]
#[command(version)]
#[command(about = "Objective quality metrics for lossy image compression")]
#[command(long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare an original image with its compressed version
    Analyze {
        /// Path to the original image
        original: PathBuf,

        /// Path to the compressed image
        compressed: PathBuf,

        /// Path to save the comparison figure
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// SSIM window size (odd, >= 3)
        #[arg(short, long)]
        window_size: Option<usize>,

        /// Filter used when the original must be resized
        #[arg(long, value_enum)]
        resize_filter: Option<FilterArg>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Skip rendering the comparison figure
        #[arg(long)]
        no_figure: bool,
    },

    /// Print the default configuration as TOML
    Config,
}

/// Resize filter argument.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FilterArg {
    /// Nearest neighbour
    Nearest,
    /// Bilinear
    Triangle,
    /// Bicubic (default)
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos, window 3
    Lanczos3,
}

impl From<FilterArg> for ResizeFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Nearest => ResizeFilter::Nearest,
            FilterArg::Triangle => ResizeFilter::Triangle,
            FilterArg::CatmullRom => ResizeFilter::CatmullRom,
            FilterArg::Gaussian => ResizeFilter::Gaussian,
            FilterArg::Lanczos3 => ResizeFilter::Lanczos3,
        }
    }
}

/// Options of the `analyze` subcommand.
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Original image path.
    pub original: PathBuf,
    /// Compressed image path.
    pub compressed: PathBuf,
    /// Figure output path override.
    pub output: Option<PathBuf>,
    /// Configuration file.
    pub config: Option<PathBuf>,
    /// SSIM window size override.
    pub window_size: Option<usize>,
    /// Resize filter override.
    pub resize_filter: Option<ResizeFilter>,
    /// Force JSON output.
    pub json: bool,
    /// Disable figure rendering.
    pub no_figure: bool,
}

impl AnalyzeArgs {
    /// Resolve the effective configuration: file (or defaults), then flags.
    pub fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(size) = self.window_size {
            config.ssim.window_size = size;
        }
        if let Some(filter) = self.resize_filter {
            config.loader.resize_filter = filter;
        }
        if let Some(ref output) = self.output {
            config.report.figure_path = output.clone();
        }
        if self.json {
            config.report.json = true;
        }
        if self.no_figure {
            config.report.render_figure = false;
        }

        config.ssim.validate()?;
        Ok(config)
    }
}

/// Run the CLI application.
pub fn run(cli: Cli) -> Result<()> {
    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    } else if !cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
    }
    log::debug!("{}", version::full_version());

    match cli.command {
        Commands::Analyze {
            original,
            compressed,
            output,
            config,
            window_size,
            resize_filter,
            json,
            no_figure,
        } => {
            let args = AnalyzeArgs {
                original,
                compressed,
                output,
                config,
                window_size,
                resize_filter: resize_filter.map(Into::into),
                json,
                no_figure,
            };
            let config = args.resolve_config()?;
            let report = run_analyze(&args, &config)?;
            if !cli.quiet {
                emit(&report, config.report.json)?;
            }
            Ok(())
        }
        Commands::Config => run_config(),
    }
}

/// Run the analysis: load, measure, optionally render the figure.
pub fn run_analyze(args: &AnalyzeArgs, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let pair = load_pair(&args.original, &args.compressed, &config.loader)?;

    let comparator = ImageComparator::with_ssim_config(config.ssim.clone());
    let metrics = comparator.compare(&pair.original, &pair.compressed, &pair.sizes)?;
    let errors = comparator.error_statistics(&pair.original, &pair.compressed)?;

    if config.report.render_figure {
        save_figure(&pair.original, &pair.compressed, &config.report.figure_path)?;
    }

    Ok(AnalysisReport::new(&pair, metrics, errors))
}

fn emit(report: &AnalysisReport, json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(report)?);
    } else {
        print_report(report);
    }
    Ok(())
}

/// Run config command.
fn run_config() -> Result<()> {
    print!("{}", default_config_toml()?);
    Ok(())
}

/// Default configuration as TOML, headed by a version comment.
fn default_config_toml() -> Result<String> {
    Ok(format!(
        "# {} default configuration\n{}",
        version::full_version(),
        AnalysisConfig::default().to_toml_string()?
    ))
}

//! Image Compression Quality Analyzer CLI
//!
//! Compares an original image against its lossily re-encoded version and
//! reports MSE, PSNR, SSIM, compression ratio and bits-per-pixel.

use clap::Parser;
use imgqa::cli::{run, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

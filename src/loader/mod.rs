//! Image loading.
//!
//! Decodes the original and compressed files into 8-bit grayscale
//! [`PixelGrid`]s and records their file sizes. Colour is reduced with the
//! Rec.601 luma weights in 16-bit fixed point. When the dimensions differ
//! the original is resized to match the compressed image; the metric
//! engine itself never resizes.

use std::path::{Path, PathBuf};

use image::{imageops, GrayImage, Luma, Rgb};

use crate::config::LoaderConfig;
use crate::error::{QualityError, Result};
use crate::metrics::SizeInfo;
use crate::PixelGrid;

/// A decoded original/compressed pair ready for comparison.
#[derive(Debug, Clone)]
pub struct ImagePair {
    /// Original image, resized to the compressed dimensions if needed.
    pub original: PixelGrid,
    /// Compressed image.
    pub compressed: PixelGrid,
    /// File sizes and pixel count.
    pub sizes: SizeInfo,
    /// Whether the original had to be resized.
    pub resized: bool,
    /// Original file path.
    pub original_path: PathBuf,
    /// Compressed file path.
    pub compressed_path: PathBuf,
}

/// Fail with [`QualityError::NotFound`] unless `path` is an existing file.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(QualityError::NotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Decode an image file and convert it to 8-bit grayscale.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<PixelGrid> {
    let path = path.as_ref();
    ensure_exists(path)?;
    let luma = decode_luma(path)?;
    to_grid(luma)
}

/// Load an original/compressed pair.
///
/// # Errors
///
/// - [`QualityError::NotFound`] if either file is missing
/// - [`QualityError::Image`] if a file cannot be decoded
pub fn load_pair<P, Q>(original: P, compressed: Q, config: &LoaderConfig) -> Result<ImagePair>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let original_path = original.as_ref();
    let compressed_path = compressed.as_ref();
    ensure_exists(original_path)?;
    ensure_exists(compressed_path)?;

    log::info!("Loading images...");
    let mut original_luma = decode_luma(original_path)?;
    let compressed_luma = decode_luma(compressed_path)?;

    let resized = original_luma.dimensions() != compressed_luma.dimensions();
    if resized {
        let (ow, oh) = original_luma.dimensions();
        let (cw, ch) = compressed_luma.dimensions();
        log::warn!(
            "Dimensions do not match ({}x{} vs {}x{}); resizing original to match compressed",
            ow,
            oh,
            cw,
            ch
        );
        original_luma =
            imageops::resize(&original_luma, cw, ch, config.resize_filter.filter_type());
    }

    let original_bytes = std::fs::metadata(original_path)?.len();
    let compressed_bytes = std::fs::metadata(compressed_path)?.len();

    let original = to_grid(original_luma)?;
    let compressed = to_grid(compressed_luma)?;
    let sizes = SizeInfo::new(original_bytes, compressed_bytes, compressed.pixel_count());

    log::debug!(
        "Loaded {}x{} pair: {} / {} bytes",
        compressed.width(),
        compressed.height(),
        original_bytes,
        compressed_bytes
    );

    Ok(ImagePair {
        original,
        compressed,
        sizes,
        resized,
        original_path: original_path.to_path_buf(),
        compressed_path: compressed_path.to_path_buf(),
    })
}

fn decode_luma(path: &Path) -> Result<GrayImage> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(GrayImage::from_fn(width, height, |x, y| {
        Luma([rec601_luma(*rgb.get_pixel(x, y))])
    }))
}

/// Rec.601 luma, `(299 R + 587 G + 114 B) / 1000` in 16-bit fixed point.
///
/// The weights sum to 65536, so neutral gray maps to itself.
fn rec601_luma(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    let sum = r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000;
    (sum >> 16) as u8
}

fn to_grid(luma: GrayImage) -> Result<PixelGrid> {
    let (width, height) = luma.dimensions();
    PixelGrid::new(width as usize, height as usize, luma.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResizeFilter;
    use image::RgbImage;
    use tempfile::TempDir;

    fn write_gray(dir: &TempDir, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
        let path = dir.path().join(name);
        GrayImage::from_pixel(width, height, Luma([value]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_load_grayscale_png() {
        let dir = TempDir::new().unwrap();
        let path = write_gray(&dir, "gray.png", 12, 8, 77);

        let grid = load_grayscale(&path).unwrap();
        assert_eq!(grid.dimensions(), (12, 8));
        assert!(grid.as_slice().iter().all(|&v| v == 77));
    }

    #[test]
    fn test_load_color_converts_to_luma() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("color.bmp");
        RgbImage::from_pixel(4, 4, Rgb([200, 200, 200]))
            .save(&path)
            .unwrap();

        let grid = load_grayscale(&path).unwrap();
        assert_eq!(grid.dimensions(), (4, 4));
        assert_eq!(grid.get(0, 0), 200);
    }

    #[test]
    fn test_load_color_uses_rec601_weights() {
        let dir = TempDir::new().unwrap();
        let expected = [
            ("red.bmp", Rgb([255, 0, 0]), 76),
            ("green.bmp", Rgb([0, 255, 0]), 150),
            ("blue.bmp", Rgb([0, 0, 255]), 29),
            ("mixed.bmp", Rgb([10, 200, 30]), 124),
        ];

        for (name, colour, luma) in expected {
            let path = dir.path().join(name);
            RgbImage::from_pixel(8, 8, colour).save(&path).unwrap();

            let grid = load_grayscale(&path).unwrap();
            assert!(
                grid.as_slice().iter().all(|&v| v == luma),
                "{} should load as {}",
                name,
                luma
            );
        }
    }

    #[test]
    fn test_rec601_luma_preserves_gray() {
        for v in 0..=255u8 {
            assert_eq!(rec601_luma(Rgb([v, v, v])), v);
        }
    }

    #[test]
    fn test_load_pair_same_size() {
        let dir = TempDir::new().unwrap();
        let original = write_gray(&dir, "orig.png", 16, 16, 128);
        let compressed = write_gray(&dir, "comp.png", 16, 16, 128);

        let pair = load_pair(&original, &compressed, &LoaderConfig::default()).unwrap();
        assert!(!pair.resized);
        assert_eq!(pair.original, pair.compressed);
        assert_eq!(pair.sizes.pixel_count, 256);
        assert_eq!(
            pair.sizes.original_bytes,
            std::fs::metadata(&original).unwrap().len()
        );
        assert_eq!(
            pair.sizes.compressed_bytes,
            std::fs::metadata(&compressed).unwrap().len()
        );
    }

    #[test]
    fn test_load_pair_resizes_original() {
        let dir = TempDir::new().unwrap();
        let original = write_gray(&dir, "orig.png", 32, 24, 90);
        let compressed = write_gray(&dir, "comp.png", 16, 12, 90);

        let config = LoaderConfig {
            resize_filter: ResizeFilter::Nearest,
        };
        let pair = load_pair(&original, &compressed, &config).unwrap();
        assert!(pair.resized);
        assert_eq!(pair.original.dimensions(), (16, 12));
        assert_eq!(pair.compressed.dimensions(), (16, 12));
        assert!(pair.original.as_slice().iter().all(|&v| v == 90));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let existing = write_gray(&dir, "a.png", 8, 8, 0);
        let missing = dir.path().join("missing.png");

        match load_pair(&existing, &missing, &LoaderConfig::default()) {
            Err(QualityError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_undecodable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(load_grayscale(&path), Err(QualityError::Image(_))));
    }
}

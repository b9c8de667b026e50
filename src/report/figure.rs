//! Three-panel comparison figure.
//!
//! Layout, left to right: original, compressed, absolute-difference
//! heat-map, colorbar. The heat-map is normalised to the largest difference
//! in the pair and mapped through a jet colormap.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::Result;
use crate::metrics::difference_map;
use crate::PixelGrid;

/// Blank border around the figure and between panels.
pub const MARGIN: u32 = 16;
/// Width of the colorbar strip.
pub const COLORBAR_WIDTH: u32 = 16;
/// Gap between the heat-map and the colorbar.
pub const COLORBAR_GAP: u32 = 8;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Map `t` in `[0, 1]` to a jet colour (dark blue → cyan → yellow → dark red).
pub fn jet(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let channel = |offset: f64| {
        let v = (1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0);
        (v * 255.0).round() as u8
    };
    Rgb([channel(3.0), channel(2.0), channel(1.0)])
}

/// Figure dimensions for a `width` x `height` image pair.
pub fn figure_dimensions(width: u32, height: u32) -> (u32, u32) {
    (
        3 * width + 4 * MARGIN + COLORBAR_GAP + COLORBAR_WIDTH,
        height + 2 * MARGIN,
    )
}

/// Render the comparison figure.
pub fn render_figure(original: &PixelGrid, compressed: &PixelGrid) -> Result<RgbImage> {
    let diff = difference_map(original, compressed)?;
    let width = original.width() as u32;
    let height = original.height() as u32;

    let (fig_width, fig_height) = figure_dimensions(width, height);
    let mut figure = RgbImage::from_pixel(fig_width, fig_height, BACKGROUND);

    let panel_x = |index: u32| MARGIN + index * (width + MARGIN);

    blit_gray(&mut figure, original, panel_x(0), MARGIN);
    blit_gray(&mut figure, compressed, panel_x(1), MARGIN);

    let max_diff = diff.iter().copied().max().unwrap_or(0);
    let scale = if max_diff == 0 { 0.0 } else { 1.0 / max_diff as f64 };
    let heat_x = panel_x(2);
    for (i, &d) in diff.iter().enumerate() {
        let x = (i % original.width()) as u32;
        let y = (i / original.width()) as u32;
        figure.put_pixel(heat_x + x, MARGIN + y, jet(d as f64 * scale));
    }

    // Colorbar, maximum at the top.
    let bar_x = heat_x + width + COLORBAR_GAP;
    for y in 0..height {
        let t = if height > 1 {
            1.0 - y as f64 / (height - 1) as f64
        } else {
            1.0
        };
        let colour = jet(t);
        for x in 0..COLORBAR_WIDTH {
            figure.put_pixel(bar_x + x, MARGIN + y, colour);
        }
    }

    log::debug!(
        "Rendered {}x{} figure, max abs error {}",
        fig_width,
        fig_height,
        max_diff
    );
    Ok(figure)
}

/// Render the figure and write it to `path`; the format follows the extension.
pub fn save_figure<P: AsRef<Path>>(
    original: &PixelGrid,
    compressed: &PixelGrid,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let figure = render_figure(original, compressed)?;
    log::info!("Saving plot to '{}'...", path.display());
    figure.save(path)?;
    Ok(())
}

fn blit_gray(figure: &mut RgbImage, grid: &PixelGrid, left: u32, top: u32) {
    for (i, &v) in grid.as_slice().iter().enumerate() {
        let x = (i % grid.width()) as u32;
        let y = (i / grid.width()) as u32;
        figure.put_pixel(left + x, top + y, Rgb([v, v, v]));
    }
}

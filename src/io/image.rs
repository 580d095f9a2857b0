//! PNG export of pattern layers and the correlation stem plot

use crate::analysis::correlation::CorrelationRow;
use crate::io::configuration::{MAX_IMAGE_PIXELS, PLOT_HEIGHT, PLOT_MARGIN, PLOT_WIDTH};
use crate::io::error::{DotSpaceError, Result, WithPath, invalid_parameter};
use image::{GrayImage, Luma, Rgb, RgbImage};
use ndarray::Array2;
use std::path::Path;

const DOT: Luma<u8> = Luma([0]);
const SPACE: Luma<u8> = Luma([255]);

const PLOT_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const PLOT_AXIS: Rgb<u8> = Rgb([160, 160, 160]);
const PLOT_STEM: Rgb<u8> = Rgb([31, 119, 180]);

/// Refuse layer renders above `MAX_IMAGE_PIXELS`
///
/// # Errors
///
/// Returns an error if `rows x cols` cells at `scale` pixels per side exceed the limit
pub fn check_image_budget(rows: usize, cols: usize, scale: u32) -> Result<()> {
    let scale = u64::from(scale.max(1));
    let pixels = (rows as u64 * scale).saturating_mul(cols as u64 * scale);
    if pixels > MAX_IMAGE_PIXELS {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!(
                "a {rows}x{cols} layer would render {pixels} pixels (limit {MAX_IMAGE_PIXELS}); use a smaller scale"
            ),
        ));
    }
    Ok(())
}

/// Render a binary layer: dots black, spaces white, `scale` pixels per cell
///
/// Any non-zero cell counts as a dot, so boolean masks render the same way
/// once mapped to 0/1.
pub fn render_layer(layer: &Array2<u8>, scale: u32) -> GrayImage {
    let scale = scale.max(1);
    let (rows, cols) = layer.dim();
    GrayImage::from_fn(cols as u32 * scale, rows as u32 * scale, |x, y| {
        let cell = layer
            .get(((y / scale) as usize, (x / scale) as usize))
            .copied()
            .unwrap_or(0);
        if cell == 0 { SPACE } else { DOT }
    })
}

/// Render a defect mask with the same palette as layers
pub fn render_mask(mask: &Array2<bool>, scale: u32) -> GrayImage {
    render_layer(&mask.mapv(u8::from), scale)
}

/// Draw `rho` against distance as vertical stems from the zero line
///
/// Bins without a defined `rho` are left out. The vertical axis spans -1 to 1.
pub fn render_correlation_plot(rows: &[CorrelationRow]) -> RgbImage {
    let mut img = RgbImage::from_pixel(PLOT_WIDTH, PLOT_HEIGHT, PLOT_BACKGROUND);

    let left = PLOT_MARGIN;
    let right = PLOT_WIDTH - PLOT_MARGIN;
    let top = PLOT_MARGIN;
    let bottom = PLOT_HEIGHT - PLOT_MARGIN;
    let zero_y = (top + bottom) / 2;

    let max_distance = rows
        .iter()
        .filter(|row| row.rho.is_some())
        .map(|row| row.distance)
        .fold(0.0_f64, f64::max);

    let to_x = |distance: f64| -> u32 {
        if max_distance > 0.0 {
            left + ((distance / max_distance) * f64::from(right - left)).round() as u32
        } else {
            left
        }
    };
    let to_y = |rho: f64| -> u32 {
        let half = f64::from(bottom - top) / 2.0;
        (f64::from(zero_y) - rho.clamp(-1.0, 1.0) * half).round() as u32
    };

    for x in left..=right {
        img.put_pixel(x, zero_y, PLOT_AXIS);
    }
    for y in top..=bottom {
        img.put_pixel(left, y, PLOT_AXIS);
    }

    for row in rows {
        let Some(rho) = row.rho else {
            continue;
        };
        let x = to_x(row.distance);
        let end = to_y(rho);
        for y in zero_y.min(end)..=zero_y.max(end) {
            img.put_pixel(x, y, PLOT_STEM);
        }
    }

    img
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
        }
    }
    Ok(())
}

fn save_png<P, C>(img: &image::ImageBuffer<P, C>, path: &Path) -> Result<()>
where
    P: image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
    C: std::ops::Deref<Target = [P::Subpixel]>,
{
    ensure_parent(path)?;
    img.save(path).map_err(|source| DotSpaceError::ImageExport {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a binary layer as PNG
///
/// # Errors
///
/// Returns an error if:
/// - The layer has no cells
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layer_png(layer: &Array2<u8>, scale: u32, path: &Path) -> Result<()> {
    if layer.is_empty() {
        return Err(invalid_parameter(
            "layer",
            &"0x0",
            &"cannot export an empty layer",
        ));
    }
    save_png(&render_layer(layer, scale), path)
}

/// Save a defect mask as PNG
///
/// # Errors
///
/// Returns an error if the mask has no cells or the image cannot be saved
pub fn export_mask_png(mask: &Array2<bool>, scale: u32, path: &Path) -> Result<()> {
    if mask.is_empty() {
        return Err(invalid_parameter(
            "mask",
            &"0x0",
            &"cannot export an empty mask",
        ));
    }
    save_png(&render_mask(mask, scale), path)
}

/// Save the correlation stem plot as PNG
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image cannot be saved
pub fn export_correlation_plot(rows: &[CorrelationRow], path: &Path) -> Result<()> {
    save_png(&render_correlation_plot(rows), path)
}

//! Image → pixel-block grid.
//!
//! The image is cut into square blocks of `block` pixels; each block is
//! averaged into one grid cell with channel values in [0, 1]. Partial blocks
//! along the right and bottom edges are dropped.

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::{Rgb, RgbImage};
use litho_mesh::PixelGrid;

/// Block grid derived from the requested print size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockLayout {
    /// Edge length of one block in source pixels.
    pub block_px: u32,
    pub rows: usize,
    pub cols: usize,
}

impl BlockLayout {
    /// Fits `floor(width_mm / resolution_mm)` blocks across the image.
    pub fn for_print(image_width: u32, image_height: u32, width_mm: f64, resolution_mm: f64) -> Result<Self> {
        if !(width_mm > 0.0 && resolution_mm > 0.0) {
            bail!("width ({width_mm}) and resolution ({resolution_mm}) must be positive");
        }
        let n_blocks = (width_mm / resolution_mm).floor();
        if n_blocks < 1.0 {
            bail!("resolution {resolution_mm}mm is coarser than the print width {width_mm}mm");
        }

        let block_px = ((image_width as f64 / n_blocks).floor() as u32).max(1);
        let layout = Self {
            block_px,
            rows: (image_height / block_px) as usize,
            cols: (image_width / block_px) as usize,
        };
        if layout.rows == 0 || layout.cols == 0 {
            bail!("image {image_width}x{image_height} is smaller than one {block_px}px block");
        }
        Ok(layout)
    }
}

/// Loads `path` as 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).with_context(|| format!("failed to open image {}", path.display()))?;
    Ok(img.to_rgb8())
}

/// Averages every block of `img` into one grid cell.
pub fn pixelate(img: &RgbImage, layout: &BlockLayout) -> Result<PixelGrid> {
    let block = layout.block_px;
    let samples = f64::from(block * block) * 255.0;
    let mut data = Vec::with_capacity(layout.rows * layout.cols * 3);

    for row in 0..layout.rows as u32 {
        for col in 0..layout.cols as u32 {
            let mut sum = [0u64; 3];
            for y in row * block..(row + 1) * block {
                for x in col * block..(col + 1) * block {
                    let Rgb(px) = *img.get_pixel(x, y);
                    for (acc, v) in sum.iter_mut().zip(px) {
                        *acc += u64::from(v);
                    }
                }
            }
            data.extend(sum.map(|s| s as f64 / samples));
        }
    }

    Ok(PixelGrid::new(layout.rows, layout.cols, 3, data)?)
}

/// Renders `grid` back at source resolution, each cell filling its block.
pub fn preview(grid: &PixelGrid, block_px: u32) -> RgbImage {
    let width = grid.cols() as u32 * block_px;
    let height = grid.rows() as u32 * block_px;
    RgbImage::from_fn(width, height, |x, y| {
        let px = grid.pixel((y / block_px) as usize, (x / block_px) as usize);
        Rgb([0, 1, 2].map(|i| (px[i] * 255.0).round().clamp(0.0, 255.0) as u8))
    })
}

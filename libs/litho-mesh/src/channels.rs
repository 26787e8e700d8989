//! # Channel Extraction
//!
//! Converts a pixelated RGB grid into per-layer thickness maps: one each for
//! cyan, yellow and magenta ink plus an intensity map that drives the clear
//! cap and the white backing layer.
//!
//! ## Strategies
//!
//! - **Linear**: ink density is the inverted channel value, darkness is the
//!   inverted mean brightness
//! - **Luminance**: channels are decoded from sRGB to linear light first,
//!   the gray component shared by all three inks is moved out of CMY and the
//!   darkness comes from Rec. 709 luminance

use serde::{Deserialize, Serialize};

use crate::error::{LithoError, LithoResult};
use crate::height_map::HeightMap;
use crate::settings::LuminanceConfig;

/// Rec. 709 luminance weights for linear RGB.
const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// A rows × cols × channels grid of pixel-block values in [0, 1].
///
/// # Example
///
/// ```rust
/// use litho_mesh::PixelGrid;
///
/// let grid = PixelGrid::new(1, 2, 3, vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
/// assert_eq!(grid.pixel(0, 1), &[0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    rows: usize,
    cols: usize,
    channels: usize,
    data: Vec<f64>,
}

impl PixelGrid {
    /// Wraps a row-major, channel-interleaved buffer.
    pub fn new(rows: usize, cols: usize, channels: usize, data: Vec<f64>) -> LithoResult<Self> {
        if data.len() != rows * cols * channels {
            return Err(LithoError::invalid_input(format!(
                "pixel grid of shape {rows}x{cols}x{channels} needs {} values, got {}",
                rows * cols * channels,
                data.len()
            )));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(LithoError::invalid_input("pixel grid contains non-finite values"));
        }
        Ok(Self {
            rows,
            cols,
            channels,
            data,
        })
    }

    /// A grid where every block has the same value.
    pub fn uniform(rows: usize, cols: usize, pixel: &[f64]) -> LithoResult<Self> {
        let data = pixel.iter().copied().cycle().take(rows * cols * pixel.len()).collect();
        Self::new(rows, cols, pixel.len(), data)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Channel values of block `(r, c)`.
    #[inline]
    pub fn pixel(&self, r: usize, c: usize) -> &[f64] {
        let start = (r * self.cols + c) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Blocks in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.channels.max(1))
    }
}

/// Thickness maps (mm) for every color-driven layer.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityChannels {
    pub cyan: HeightMap,
    pub yellow: HeightMap,
    pub magenta: HeightMap,
    /// Darkness map used by the clear cap and the white backing layer.
    pub intensity_map: HeightMap,
}

/// Produces layer thickness maps from a pixel grid.
pub trait ChannelExtractor {
    fn extract(&self, grid: &PixelGrid, targets: &LuminanceConfig) -> LithoResult<IntensityChannels>;
}

/// Channel extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCorrection {
    #[default]
    Luminance,
    Linear,
}

impl ColorCorrection {
    /// The extractor implementing this strategy.
    pub fn extractor(self) -> &'static dyn ChannelExtractor {
        match self {
            ColorCorrection::Luminance => &LuminanceExtractor,
            ColorCorrection::Linear => &LinearExtractor,
        }
    }
}

/// Inverts RGB straight into ink density.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearExtractor;

impl ChannelExtractor for LinearExtractor {
    fn extract(&self, grid: &PixelGrid, targets: &LuminanceConfig) -> LithoResult<IntensityChannels> {
        extract_with(grid, targets, |[r, g, b]| {
            let brightness = (r + g + b) / 3.0;
            ([1.0 - r, 1.0 - b, 1.0 - g], 1.0 - brightness)
        })
    }
}

/// Works in linear light and removes the shared gray component from CMY.
#[derive(Debug, Clone, Copy, Default)]
pub struct LuminanceExtractor;

impl ChannelExtractor for LuminanceExtractor {
    fn extract(&self, grid: &PixelGrid, targets: &LuminanceConfig) -> LithoResult<IntensityChannels> {
        extract_with(grid, targets, |rgb| {
            let linear = rgb.map(srgb_to_linear);
            let [ink_c, ink_m, ink_y] = linear.map(|v| 1.0 - v);
            let gray = ink_c.min(ink_m).min(ink_y);
            let luminance: f64 = linear.iter().zip(LUMA_WEIGHTS).map(|(v, w)| v * w).sum();
            ([ink_c - gray, ink_y - gray, ink_m - gray], 1.0 - luminance)
        })
    }
}

/// Decodes one sRGB-encoded channel to linear light.
///
/// # Example
///
/// ```rust
/// use litho_mesh::channels::srgb_to_linear;
///
/// assert_eq!(srgb_to_linear(0.0), 0.0);
/// assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-12);
/// assert!(srgb_to_linear(0.5) < 0.5);
/// ```
pub fn srgb_to_linear(value: f64) -> f64 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Runs `densities` on every clamped RGB block and scales the results.
///
/// `densities` returns `([cyan, yellow, magenta], darkness)`, each in [0, 1].
fn extract_with(
    grid: &PixelGrid,
    targets: &LuminanceConfig,
    densities: impl Fn([f64; 3]) -> ([f64; 3], f64),
) -> LithoResult<IntensityChannels> {
    if grid.channels() != 3 {
        return Err(LithoError::invalid_input(format!(
            "image must be CYM/3-channel, got {} channels",
            grid.channels()
        )));
    }

    let len = grid.rows() * grid.cols();
    let mut cyan = Vec::with_capacity(len);
    let mut yellow = Vec::with_capacity(len);
    let mut magenta = Vec::with_capacity(len);
    let mut intensity = Vec::with_capacity(len);

    for pixel in grid.pixels() {
        let rgb = [pixel[0], pixel[1], pixel[2]].map(|v| v.clamp(0.0, 1.0));
        let ([c, y, m], darkness) = densities(rgb);
        cyan.push(c.max(0.0) * targets.cym_target_thickness);
        yellow.push(y.max(0.0) * targets.cym_target_thickness);
        magenta.push(m.max(0.0) * targets.cym_target_thickness);
        intensity.push(darkness.max(0.0) * targets.white_target_thickness);
    }

    Ok(IntensityChannels {
        cyan: HeightMap::from_vec(grid.rows(), grid.cols(), cyan)?,
        yellow: HeightMap::from_vec(grid.rows(), grid.cols(), yellow)?,
        magenta: HeightMap::from_vec(grid.rows(), grid.cols(), magenta)?,
        intensity_map: HeightMap::from_vec(grid.rows(), grid.cols(), intensity)?,
    })
}

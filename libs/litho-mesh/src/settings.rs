//! # Stack Settings
//!
//! Physical parameters for one run. Defaults come from
//! [`config::constants`].

use config::constants::{
    DEFAULT_BASE_HEIGHT_MM, DEFAULT_CYM_TARGET_THICKNESS_MM, DEFAULT_HEIGHT_STEP_MM,
    DEFAULT_INTENSITY_MIN_HEIGHT_MM, DEFAULT_PIXEL_SIZE_MM, DEFAULT_WHITE_TARGET_THICKNESS_MM,
};
use serde::{Deserialize, Serialize};

use crate::channels::ColorCorrection;
use crate::error::{LithoError, LithoResult};
use crate::filament::FilamentAssignment;

/// Target thicknesses handed to channel extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuminanceConfig {
    /// Thickness of a fully saturated cyan, magenta or yellow cell.
    pub cym_target_thickness: f64,
    /// Thickness of a fully dark cell in the white intensity layer.
    pub white_target_thickness: f64,
}

impl Default for LuminanceConfig {
    fn default() -> Self {
        Self {
            cym_target_thickness: DEFAULT_CYM_TARGET_THICKNESS_MM,
            white_target_thickness: DEFAULT_WHITE_TARGET_THICKNESS_MM,
        }
    }
}

/// Configuration for building a layer stack.
///
/// # Example
///
/// ```rust
/// use litho_mesh::StlConfig;
///
/// let config = StlConfig { pixel_size: 0.5, ..StlConfig::default() };
/// assert!(config.validate().is_ok());
///
/// let broken = StlConfig { pixel_size: 0.0, ..StlConfig::default() };
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StlConfig {
    /// Edge length of one pixel block (mm).
    pub pixel_size: f64,
    /// Thickness of the white base slab (mm).
    pub base_height: f64,
    /// Thickness floor of the white intensity layer (mm).
    pub intensity_min_height: f64,
    /// Quantization step for layer thickness (mm), 0 disables it.
    pub height_step_mm: f64,
    /// Mirror the model along x so it prints face up.
    pub face_up: bool,
    pub luminance_config: LuminanceConfig,
    pub color_correction: ColorCorrection,
    /// Material metadata per role. Never read by the mesher.
    #[serde(default)]
    pub filament_library: FilamentAssignment,
}

impl Default for StlConfig {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE_MM,
            base_height: DEFAULT_BASE_HEIGHT_MM,
            intensity_min_height: DEFAULT_INTENSITY_MIN_HEIGHT_MM,
            height_step_mm: DEFAULT_HEIGHT_STEP_MM,
            face_up: false,
            luminance_config: LuminanceConfig::default(),
            color_correction: ColorCorrection::Luminance,
            filament_library: FilamentAssignment::new(),
        }
    }
}

impl StlConfig {
    /// Rejects non-positive cell size and negative or non-finite heights.
    pub fn validate(&self) -> LithoResult<()> {
        check_pixel_size(self.pixel_size)?;
        check_height("base_height", self.base_height)?;
        check_height("intensity_min_height", self.intensity_min_height)?;
        check_height("height_step_mm", self.height_step_mm)?;
        check_height(
            "cym_target_thickness",
            self.luminance_config.cym_target_thickness,
        )?;
        check_height(
            "white_target_thickness",
            self.luminance_config.white_target_thickness,
        )?;
        Ok(())
    }
}

pub(crate) fn check_pixel_size(pixel_size: f64) -> LithoResult<()> {
    if !pixel_size.is_finite() || pixel_size <= 0.0 {
        return Err(LithoError::configuration(format!(
            "pixel_size must be positive, got {pixel_size}"
        )));
    }
    Ok(())
}

pub(crate) fn check_height(name: &str, value: f64) -> LithoResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LithoError::configuration(format!(
            "{name} must be a non-negative length, got {value}"
        )));
    }
    Ok(())
}

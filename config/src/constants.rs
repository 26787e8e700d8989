//! # Configuration Constants
//!
//! Centralized constants for the lithophane pipeline. Physical defaults for
//! the printed stack and numeric tolerances used by the mesher are defined
//! here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Physical Defaults**: Cell size, base slab and layer thicknesses (mm)
//! - **Geometry**: Box topology and degenerate-normal fallback
//! - **Output**: STL header text

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(0.1 + 0.2, 0.3));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// PHYSICAL DEFAULTS (millimetres)
// =============================================================================

/// Default physical edge length of one pixel block.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_PIXEL_SIZE_MM, DEFAULT_PRINT_WIDTH_MM};
///
/// let blocks = (DEFAULT_PRINT_WIDTH_MM / DEFAULT_PIXEL_SIZE_MM) as usize;
/// assert_eq!(blocks, 125);
/// ```
pub const DEFAULT_PIXEL_SIZE_MM: f64 = 0.4;

/// Default width of the finished print.
pub const DEFAULT_PRINT_WIDTH_MM: f64 = 50.0;

/// Thickness of the white base slab every color layer is stacked on.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_BASE_HEIGHT_MM;
/// assert!(DEFAULT_BASE_HEIGHT_MM > 0.0);
/// ```
pub const DEFAULT_BASE_HEIGHT_MM: f64 = 0.2;

/// Minimum thickness of the white intensity layer in every cell.
///
/// Only white layers enforce a floor; color and clear layers use zero.
pub const DEFAULT_INTENSITY_MIN_HEIGHT_MM: f64 = 0.2;

/// Quantization step applied to layer thickness.
///
/// Usually matches the slicer layer height so every cell prints as a whole
/// number of layers.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_HEIGHT_STEP_MM;
///
/// let quantized = (0.26_f64 / DEFAULT_HEIGHT_STEP_MM).round() * DEFAULT_HEIGHT_STEP_MM;
/// assert!((quantized - 0.3).abs() < 1e-12);
/// ```
pub const DEFAULT_HEIGHT_STEP_MM: f64 = 0.1;

/// Target thickness of a fully saturated cyan, magenta or yellow cell.
pub const DEFAULT_CYM_TARGET_THICKNESS_MM: f64 = 0.07;

/// Target thickness of a fully dark cell in the white intensity layer.
pub const DEFAULT_WHITE_TARGET_THICKNESS_MM: f64 = 0.16;

// =============================================================================
// GEOMETRY CONSTANTS
// =============================================================================

/// Corner count of one extruded cell box.
pub const BOX_VERTEX_COUNT: usize = 8;

/// Triangle count of one extruded cell box (two per side, six sides).
///
/// # Example
///
/// ```rust
/// use config::constants::BOX_FACE_COUNT;
///
/// let (rows, cols) = (2, 2);
/// assert_eq!(rows * cols * BOX_FACE_COUNT, 48);
/// ```
pub const BOX_FACE_COUNT: usize = 12;

/// Normal assigned to zero-area triangles.
///
/// Collapsed boxes (zero thickness) produce side faces with no area; they
/// keep this upward normal instead of failing.
pub const DEGENERATE_NORMAL: [f64; 3] = [0.0, 0.0, 1.0];

// =============================================================================
// OUTPUT CONSTANTS
// =============================================================================

/// Text written at the start of the 80-byte binary STL header.
pub const STL_HEADER_TEXT: &str = "Binary STL generated by lithophane";

/// File extension for persisted layer meshes.
pub const STL_EXTENSION: &str = "stl";

/// Default output directory for layer meshes.
pub const DEFAULT_STL_OUTPUT_DIR: &str = "stl-output";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

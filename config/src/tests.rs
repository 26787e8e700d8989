//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

// =============================================================================
// PHYSICAL DEFAULT TESTS
// =============================================================================

#[test]
fn test_pixel_size_is_positive() {
    assert!(DEFAULT_PIXEL_SIZE_MM > 0.0);
}

#[test]
fn test_print_width_holds_at_least_one_block() {
    assert!(DEFAULT_PRINT_WIDTH_MM >= DEFAULT_PIXEL_SIZE_MM);
}

#[test]
fn test_heights_are_non_negative() {
    assert!(DEFAULT_BASE_HEIGHT_MM >= 0.0);
    assert!(DEFAULT_INTENSITY_MIN_HEIGHT_MM >= 0.0);
    assert!(DEFAULT_CYM_TARGET_THICKNESS_MM >= 0.0);
    assert!(DEFAULT_WHITE_TARGET_THICKNESS_MM >= 0.0);
}

#[test]
fn test_height_step_is_non_negative() {
    // Zero disables quantization, negative is never valid
    assert!(DEFAULT_HEIGHT_STEP_MM >= 0.0);
}

// =============================================================================
// GEOMETRY TESTS
// =============================================================================

#[test]
fn test_box_topology() {
    assert_eq!(BOX_VERTEX_COUNT, 8);
    assert_eq!(BOX_FACE_COUNT, 2 * 6);
}

#[test]
fn test_degenerate_normal_is_unit_up() {
    assert_eq!(DEGENERATE_NORMAL, [0.0, 0.0, 1.0]);
}

// =============================================================================
// OUTPUT TESTS
// =============================================================================

#[test]
fn test_stl_header_fits() {
    // Binary STL headers are exactly 80 bytes
    assert!(STL_HEADER_TEXT.len() <= 80);
    assert!(!STL_HEADER_TEXT.starts_with("solid"));
}

// =============================================================================
// APPROX_EQUAL TESTS
// =============================================================================

#[test]
fn test_approx_equal_same_values() {
    assert!(approx_equal(0.5, 0.5));
}

#[test]
fn test_approx_equal_within_epsilon() {
    assert!(approx_equal(0.1 + 0.2, 0.3));
}

#[test]
fn test_approx_equal_different_values() {
    assert!(!approx_equal(0.2, 0.16));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(-1e-12));
    assert!(!approx_zero(DEFAULT_HEIGHT_STEP_MM));
}

//! # Layer Mesher Tests
//!
//! Height threading, box topology, normals and mirroring.

use super::*;
use crate::error::LithoError;
use approx::assert_relative_eq;
use config::constants::BOX_VERTEX_COUNT;

fn distinct_corners(faces: &[Triangle]) -> Vec<DVec3> {
    let mut corners: Vec<DVec3> = Vec::new();
    for v in faces.iter().flat_map(|t| t.vertices) {
        if !corners.contains(&v) {
            corners.push(v);
        }
    }
    corners
}

// =============================================================================
// DELTA AND CUMULATIVE HEIGHTS
// =============================================================================

#[test]
fn test_uniform_grid_end_to_end() {
    let heights = HeightMap::filled(2, 2, 0.5);
    let below = HeightMap::zeros(2, 2);
    let (mesh, above) = build_layer(&heights, &LayerParams::new(0.1, 1.0), Some(&below)).unwrap();

    for &h in above.values() {
        assert_relative_eq!(h, 0.5, epsilon = 1e-12);
    }
    assert_eq!(mesh.face_count(), 4 * 12);
    for v in mesh.vertices() {
        assert!(v.z == 0.0 || (v.z - 0.5).abs() < 1e-12, "unexpected z {}", v.z);
    }
}

#[test]
fn test_missing_cumulative_defaults_to_zero() {
    let heights = HeightMap::filled(3, 2, 0.3);
    let with_zeros = build_layer(&heights, &LayerParams::new(0.1, 0.4), Some(&HeightMap::zeros(3, 2))).unwrap();
    let without = build_layer(&heights, &LayerParams::new(0.1, 0.4), None).unwrap();
    assert_eq!(with_zeros, without);
}

#[test]
fn test_quantization_applied_to_delta() {
    let heights = HeightMap::from_rows(vec![vec![0.04, 0.07, 0.16]]).unwrap();
    let (_, above) = build_layer(&heights, &LayerParams::new(0.1, 1.0), None).unwrap();
    assert_eq!(above.get(0, 0), 0.0);
    assert_relative_eq!(above.get(0, 1), 0.1, epsilon = 1e-12);
    assert_relative_eq!(above.get(0, 2), 0.2, epsilon = 1e-12);
}

#[test]
fn test_zero_step_disables_quantization() {
    let heights = HeightMap::from_rows(vec![vec![0.037, 0.123]]).unwrap();
    let (_, above) = build_layer(&heights, &LayerParams::new(0.0, 1.0), None).unwrap();
    assert_eq!(above.values(), &[0.037, 0.123]);
}

#[test]
fn test_white_floor_clamps_zero_heights() {
    let heights = HeightMap::zeros(2, 2);
    for step in [0.0, 0.1, 0.3] {
        let params = LayerParams::new(step, 1.0).with_min_height(0.16);
        let (_, above) = build_layer(&heights, &params, None).unwrap();
        for &h in above.values() {
            assert_eq!(h, 0.16, "step {step}");
        }
    }
}

#[test]
fn test_delta_is_added_to_cumulative() {
    let heights = HeightMap::from_rows(vec![vec![0.1, 0.2], vec![0.3, 0.0]]).unwrap();
    let below = HeightMap::from_rows(vec![vec![0.2, 0.4], vec![0.0, 1.0]]).unwrap();
    let (_, above) = build_layer(&heights, &LayerParams::new(0.1, 1.0), Some(&below)).unwrap();

    let delta = layer_delta(&heights, &below, &LayerParams::new(0.1, 1.0));
    for i in 0..above.len() {
        assert_eq!(above.values()[i], below.values()[i] + delta.values()[i]);
    }
}

#[test]
fn test_height_monotonicity() {
    let heights = HeightMap::from_rows(vec![vec![0.0, 0.04, 0.26], vec![1.3, 0.05, 0.0]]).unwrap();
    let below = HeightMap::from_rows(vec![vec![0.2, 0.9, 0.3], vec![0.0, 0.1, 2.5]]).unwrap();

    for (min_height, flat_top) in [(0.0, false), (0.2, false), (0.0, true), (0.16, true)] {
        let params = LayerParams::new(0.1, 0.4)
            .with_min_height(min_height)
            .with_flat_top(flat_top);
        let (_, above) = build_layer(&heights, &params, Some(&below)).unwrap();
        for (a, b) in above.values().iter().zip(below.values()) {
            assert!(a >= b, "cumulative dropped from {b} to {a}");
        }
    }
}

#[test]
fn test_flat_top_levels_every_column() {
    let heights = HeightMap::from_rows(vec![vec![5.0, 0.0], vec![0.3, 9.0]]).unwrap();
    let below = HeightMap::from_rows(vec![vec![0.2, 0.5], vec![0.9, 0.3]]).unwrap();
    let params = LayerParams::new(0.1, 1.0).with_flat_top(true).with_min_height(0.1);

    let (mesh, above) = build_layer(&heights, &params, Some(&below)).unwrap();

    for &h in above.values() {
        assert_relative_eq!(h, 1.0, epsilon = 1e-12);
    }
    let (_, max) = mesh.bounding_box();
    assert_relative_eq!(max.z, 1.0, epsilon = 1e-12);
}

#[test]
fn test_flat_top_ignores_height_map() {
    let below = HeightMap::from_rows(vec![vec![0.2, 0.7]]).unwrap();
    let params = LayerParams::new(0.1, 1.0).with_flat_top(true);
    let a = build_layer(&HeightMap::zeros(1, 2), &params, Some(&below)).unwrap();
    let b = build_layer(&HeightMap::filled(1, 2, 3.0), &params, Some(&below)).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// BOX TOPOLOGY
// =============================================================================

#[test]
fn test_each_cell_is_a_closed_box() {
    let heights = HeightMap::from_rows(vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]]).unwrap();
    let (mesh, _) = build_layer(&heights, &LayerParams::new(0.1, 0.5), None).unwrap();

    assert_eq!(mesh.face_count(), 6 * BOX_FACE_COUNT);
    for cell in mesh.triangles().chunks(BOX_FACE_COUNT) {
        assert_eq!(distinct_corners(cell).len(), BOX_VERTEX_COUNT);
    }
}

#[test]
fn test_cell_footprint() {
    let heights = HeightMap::filled(2, 3, 0.2);
    let below = HeightMap::filled(2, 3, 0.2);
    let (mesh, _) = build_layer(&heights, &LayerParams::new(0.1, 0.4), Some(&below)).unwrap();

    // Cell (row 1, col 2) is the last box
    let last = &mesh.triangles()[5 * BOX_FACE_COUNT..];
    let (mut min, mut max) = (DVec3::splat(f64::MAX), DVec3::splat(f64::MIN));
    for v in last.iter().flat_map(|t| t.vertices) {
        min = min.min(v);
        max = max.max(v);
    }
    assert_relative_eq!(min.x, 0.8, epsilon = 1e-12);
    assert_relative_eq!(max.x, 1.2, epsilon = 1e-12);
    assert_relative_eq!(min.y, 0.4, epsilon = 1e-12);
    assert_relative_eq!(max.y, 0.8, epsilon = 1e-12);
    assert_relative_eq!(min.z, 0.2, epsilon = 1e-12);
    assert_relative_eq!(max.z, 0.4, epsilon = 1e-12);
}

#[test]
fn test_zero_height_box_keeps_face_count() {
    let heights = HeightMap::zeros(1, 1);
    let below = HeightMap::filled(1, 1, 0.6);
    let (mesh, above) = build_layer(&heights, &LayerParams::new(0.1, 1.0), Some(&below)).unwrap();

    assert_eq!(above.get(0, 0), 0.6);
    assert_eq!(mesh.face_count(), BOX_FACE_COUNT);
    // Top and bottom rings coincide
    assert_eq!(distinct_corners(mesh.triangles()).len(), 4);
    // The four sides collapse to zero area
    assert_eq!(mesh.degenerate_count(), 8);
}

#[test]
fn test_empty_grid() {
    let (mesh, above) = build_layer(&HeightMap::zeros(0, 0), &LayerParams::new(0.1, 1.0), None).unwrap();
    assert!(mesh.is_empty());
    assert!(above.is_empty());
}

// =============================================================================
// NORMALS
// =============================================================================

#[test]
fn test_normals_unit_or_default() {
    let heights = HeightMap::from_rows(vec![vec![0.0, 0.3], vec![0.5, 0.0]]).unwrap();
    let (mesh, _) = build_layer(&heights, &LayerParams::new(0.1, 0.4), None).unwrap();

    for tri in mesh.triangles() {
        if tri.is_degenerate() {
            assert_eq!(tri.normal, DVec3::new(0.0, 0.0, 1.0));
        } else {
            assert_relative_eq!(tri.normal.length(), 1.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_normals_point_outward() {
    let heights = HeightMap::filled(1, 1, 1.0);
    let (mesh, _) = build_layer(&heights, &LayerParams::new(0.0, 1.0), None).unwrap();
    let center = DVec3::splat(0.5);

    for tri in mesh.triangles() {
        let centroid = (tri.vertices[0] + tri.vertices[1] + tri.vertices[2]) / 3.0;
        assert!(tri.normal.dot(centroid - center) > 0.0, "inward normal {:?}", tri.normal);
    }
}

// =============================================================================
// MIRRORING
// =============================================================================

#[test]
fn test_mirror_reflects_x() {
    let heights = HeightMap::from_rows(vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]]).unwrap();
    let params = LayerParams::new(0.1, 0.4);
    let total_width = 3.0 * 0.4;

    let (plain, plain_above) = build_layer(&heights, &params, None).unwrap();
    let (mirrored, mirrored_above) = build_layer(&heights, &params.with_mirror_x(true), None).unwrap();

    assert_eq!(plain_above, mirrored_above);
    assert_eq!(plain.face_count(), mirrored.face_count());
    assert_eq!(plain.vertex_count(), mirrored.vertex_count());

    let reflect = |v: DVec3| DVec3::new(total_width - v.x, v.y, v.z);
    for (p, m) in plain.triangles().iter().zip(mirrored.triangles()) {
        assert_eq!(m.vertices[0], reflect(p.vertices[0]));
        assert_eq!(m.vertices[1], reflect(p.vertices[2]));
        assert_eq!(m.vertices[2], reflect(p.vertices[1]));
    }
}

#[test]
fn test_mirror_keeps_normals_outward() {
    let heights = HeightMap::filled(1, 2, 1.0);
    let params = LayerParams::new(0.0, 1.0).with_mirror_x(true);
    let (mesh, _) = build_layer(&heights, &params, None).unwrap();

    for (cell, center) in mesh
        .triangles()
        .chunks(BOX_FACE_COUNT)
        .zip([DVec3::new(1.5, 0.5, 0.5), DVec3::new(0.5, 0.5, 0.5)])
    {
        for tri in cell {
            let centroid = (tri.vertices[0] + tri.vertices[1] + tri.vertices[2]) / 3.0;
            assert!(tri.normal.dot(centroid - center) > 0.0);
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_rejects_non_positive_pixel_size() {
    let heights = HeightMap::filled(1, 1, 0.1);
    for pixel_size in [0.0, -0.4, f64::NAN] {
        let err = build_layer(&heights, &LayerParams::new(0.1, pixel_size), None).unwrap_err();
        assert!(matches!(err, LithoError::Configuration { .. }));
    }
}

#[test]
fn test_rejects_negative_heights() {
    let heights = HeightMap::from_rows(vec![vec![0.1, -0.2]]).unwrap();
    let err = build_layer(&heights, &LayerParams::new(0.1, 1.0), None).unwrap_err();
    assert!(matches!(err, LithoError::Configuration { .. }));

    let heights = HeightMap::filled(1, 2, 0.1);
    let below = HeightMap::from_rows(vec![vec![0.0, -1.0]]).unwrap();
    let err = build_layer(&heights, &LayerParams::new(0.1, 1.0), Some(&below)).unwrap_err();
    assert!(matches!(err, LithoError::Configuration { .. }));

    let params = LayerParams::new(0.1, 1.0).with_min_height(-0.1);
    assert!(build_layer(&heights, &params, None).is_err());

    assert!(build_layer(&heights, &LayerParams::new(-0.1, 1.0), None).is_err());
}

#[test]
fn test_rejects_shape_mismatch() {
    let heights = HeightMap::filled(2, 2, 0.1);
    let below = HeightMap::zeros(2, 3);
    let err = build_layer(&heights, &LayerParams::new(0.1, 1.0), Some(&below)).unwrap_err();
    assert!(matches!(err, LithoError::InvalidInput { .. }));
}

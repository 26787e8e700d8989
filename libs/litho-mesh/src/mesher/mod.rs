//! # Layer Mesher
//!
//! Turns one layer's height map into a solid made of one extruded box per
//! pixel block, stacked on the cumulative height of the layers below.
//!
//! ## Algorithm
//!
//! ```text
//! delta      = flat_top ? max(below) + min_height - below
//!                       : max(quantize(height_map), min_height)
//! cumulative = below + delta
//! cell (r, c) → box [c, c+1] × [r, r+1] × [below, cumulative]   (× pixel_size)
//! ```
//!
//! Boxes are independent: adjacent cells share no vertices and coincident
//! internal walls are kept. Every box contributes exactly 12 triangles, so
//! cells are written in parallel into disjoint chunks of the output buffer.

#[cfg(test)]
mod tests;

use std::borrow::Cow;

use config::constants::BOX_FACE_COUNT;
use glam::DVec3;
use rayon::prelude::*;
use tracing::debug;

use crate::error::LithoResult;
use crate::height_map::{quantize, HeightMap};
use crate::layer::LayerSpec;
use crate::mesh::{Mesh, Triangle};
use crate::settings::{check_height, check_pixel_size};

/// Box corner indices for the two triangles of each side.
///
/// Corners 0-3 are the bottom ring and 4-7 the top ring, counter-clockwise
/// seen from above starting at `(x0, y0)`. Winding is counter-clockwise seen
/// from outside so normals point outward.
#[rustfmt::skip]
const FACE_TEMPLATE: [[usize; 3]; BOX_FACE_COUNT] = [
    [0, 2, 1], [0, 3, 2], // bottom
    [4, 5, 6], [4, 6, 7], // top
    [0, 1, 5], [0, 5, 4], // front (y = y0)
    [2, 3, 7], [2, 7, 6], // back (y = y1)
    [0, 4, 7], [0, 7, 3], // left (x = x0)
    [1, 2, 6], [1, 6, 5], // right (x = x1)
];

/// Parameters for meshing one layer.
///
/// # Example
///
/// ```rust
/// use litho_mesh::{build_layer, HeightMap, LayerParams};
///
/// let heights = HeightMap::filled(2, 2, 0.5);
/// let (mesh, cumulative) = build_layer(&heights, &LayerParams::new(0.1, 1.0), None).unwrap();
/// assert_eq!(mesh.face_count(), 48);
/// assert!((cumulative.get(1, 1) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerParams {
    /// Thickness quantization step, 0 disables quantization.
    pub quant_step: f64,
    /// Edge length of one cell.
    pub pixel_size: f64,
    /// Floor applied to this layer's delta (or the cap above the tallest
    /// column in flat-top mode).
    pub min_height: f64,
    /// Extrude every cell to one shared absolute height.
    pub flat_top: bool,
    /// Reflect x about the grid width (face-up printing).
    pub mirror_x: bool,
}

impl LayerParams {
    /// Plain layer: no floor, no flat top, no mirroring.
    pub fn new(quant_step: f64, pixel_size: f64) -> Self {
        Self {
            quant_step,
            pixel_size,
            min_height: 0.0,
            flat_top: false,
            mirror_x: false,
        }
    }

    /// Parameters for a layer role.
    pub fn from_spec(spec: &LayerSpec, pixel_size: f64, mirror_x: bool) -> Self {
        Self {
            quant_step: spec.quant_step,
            pixel_size,
            min_height: spec.min_height,
            flat_top: spec.flat_top,
            mirror_x,
        }
    }

    pub fn with_min_height(mut self, min_height: f64) -> Self {
        self.min_height = min_height;
        self
    }

    pub fn with_flat_top(mut self, flat_top: bool) -> Self {
        self.flat_top = flat_top;
        self
    }

    pub fn with_mirror_x(mut self, mirror_x: bool) -> Self {
        self.mirror_x = mirror_x;
        self
    }

    fn validate(&self) -> LithoResult<()> {
        check_pixel_size(self.pixel_size)?;
        check_height("quant_step", self.quant_step)?;
        check_height("min_height", self.min_height)
    }
}

/// Thickness this layer adds to every cell.
///
/// In flat-top mode the height map is ignored and every column is raised to
/// `max(cumulative_in) + min_height`. Otherwise the height map is quantized
/// and clamped to the floor.
pub fn layer_delta(height_map: &HeightMap, cumulative_in: &HeightMap, params: &LayerParams) -> HeightMap {
    if params.flat_top {
        let max_height = cumulative_in.max() + params.min_height;
        cumulative_in.map(|below| max_height - below)
    } else {
        height_map.map(|h| quantize(h, params.quant_step).max(params.min_height))
    }
}

/// Meshes one layer on top of `cumulative_in` (all zeros when `None`).
///
/// Returns the layer solid and the new cumulative height map to thread into
/// the next layer.
///
/// # Errors
///
/// - [`LithoError::Configuration`](crate::LithoError::Configuration) for a
///   non-positive cell size, negative step or floor, or negative and
///   non-finite heights
/// - [`LithoError::InvalidInput`](crate::LithoError::InvalidInput) when
///   `cumulative_in` has a different shape than `height_map`
pub fn build_layer(
    height_map: &HeightMap,
    params: &LayerParams,
    cumulative_in: Option<&HeightMap>,
) -> LithoResult<(Mesh, HeightMap)> {
    params.validate()?;
    height_map.ensure_non_negative("height map")?;

    let below = match cumulative_in {
        Some(below) => {
            height_map.ensure_same_shape(below)?;
            below.ensure_non_negative("cumulative heights")?;
            Cow::Borrowed(below)
        }
        None => Cow::Owned(HeightMap::zeros(height_map.rows(), height_map.cols())),
    };

    let delta = layer_delta(height_map, &below, params);
    let above = below.add(&delta)?;

    let cols = height_map.cols();
    let total_width = cols as f64 * params.pixel_size;
    let mut triangles = vec![Triangle::default(); height_map.len() * BOX_FACE_COUNT];
    triangles
        .par_chunks_mut(BOX_FACE_COUNT)
        .enumerate()
        .for_each(|(idx, faces)| {
            let (row, col) = (idx / cols, idx % cols);
            let corners = cell_corners(
                row,
                col,
                below.values()[idx],
                above.values()[idx],
                params.pixel_size,
            );
            write_box(faces, &corners, params.mirror_x.then_some(total_width));
        });

    let mesh = Mesh::from_triangles(triangles);
    debug!(
        rows = height_map.rows(),
        cols,
        faces = mesh.face_count(),
        degenerate = mesh.degenerate_count(),
        "meshed layer"
    );

    Ok((mesh, above))
}

/// The 8 corners of cell `(row, col)` between `bottom` and `top`.
fn cell_corners(row: usize, col: usize, bottom: f64, top: f64, pixel_size: f64) -> [DVec3; 8] {
    let x0 = col as f64 * pixel_size;
    let x1 = (col + 1) as f64 * pixel_size;
    let y0 = row as f64 * pixel_size;
    let y1 = (row + 1) as f64 * pixel_size;

    [
        DVec3::new(x0, y0, bottom),
        DVec3::new(x1, y0, bottom),
        DVec3::new(x1, y1, bottom),
        DVec3::new(x0, y1, bottom),
        DVec3::new(x0, y0, top),
        DVec3::new(x1, y0, top),
        DVec3::new(x1, y1, top),
        DVec3::new(x0, y1, top),
    ]
}

/// Writes the 12 triangles of one box into `faces`.
///
/// With `mirror_width` set, x becomes `width - x` and the last two corners of
/// every triangle swap so the reflected box keeps outward normals.
fn write_box(faces: &mut [Triangle], corners: &[DVec3; 8], mirror_width: Option<f64>) {
    let corners = match mirror_width {
        Some(width) => corners.map(|v| DVec3::new(width - v.x, v.y, v.z)),
        None => *corners,
    };

    for (face, [a, b, c]) in faces.iter_mut().zip(FACE_TEMPLATE) {
        *face = if mirror_width.is_some() {
            Triangle::new(corners[a], corners[c], corners[b])
        } else {
            Triangle::new(corners[a], corners[b], corners[c])
        };
    }
}

//! # Base Plate
//!
//! The constant-height white slab at the bottom of the stack.

use crate::error::LithoResult;
use crate::height_map::HeightMap;
use crate::mesh::Mesh;
use crate::mesher::{build_layer, LayerParams};
use crate::settings::StlConfig;

/// Builds the base slab for a `rows × cols` grid.
///
/// Every cell is `config.base_height` thick, starts at z = 0 and has no
/// floor and no flat top. The returned cumulative heights seed the first
/// color layer.
///
/// # Example
///
/// ```rust
/// use litho_mesh::{build_base, StlConfig};
///
/// let (mesh, heights) = build_base(3, 4, &StlConfig::default()).unwrap();
/// assert_eq!(mesh.face_count(), 3 * 4 * 12);
/// assert_eq!(heights.shape(), (3, 4));
/// ```
pub fn build_base(rows: usize, cols: usize, config: &StlConfig) -> LithoResult<(Mesh, HeightMap)> {
    let height_map = HeightMap::filled(rows, cols, config.base_height);
    let params = LayerParams::new(config.height_step_mm, config.pixel_size).with_mirror_x(config.face_up);

    build_layer(&height_map, &params, Some(&HeightMap::zeros(rows, cols)))
}

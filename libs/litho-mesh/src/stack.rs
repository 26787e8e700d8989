//! # Stack Assembly
//!
//! Builds every layer of the print in a fixed bottom-to-top order, threading
//! each layer's cumulative heights into the next:
//!
//! ```text
//! base → cyan → yellow → magenta → clear (flat top) → white (intensity, floored)
//! ```
//!
//! Any failure aborts the whole build, so a returned collection always holds
//! all six layers.

use tracing::info;

use crate::base::build_base;
use crate::channels::{ChannelExtractor, PixelGrid};
use crate::collection::MeshCollection;
use crate::error::{LithoError, LithoResult};
use crate::height_map::HeightMap;
use crate::layer::{LayerSpec, StackLayer};
use crate::mesher::{build_layer, LayerParams};
use crate::settings::StlConfig;

/// Builds all layer meshes for `grid` using the extractor selected by
/// `config.color_correction`.
///
/// # Errors
///
/// - [`LithoError::InvalidInput`] if the grid is empty or not 3-channel
/// - [`LithoError::Configuration`] if `config` fails validation
///
/// # Example
///
/// ```rust
/// use litho_mesh::{build_stack, PixelGrid, StlConfig};
///
/// let grid = PixelGrid::uniform(2, 2, &[0.2, 0.5, 0.8]).unwrap();
/// let collection = build_stack(&grid, &StlConfig::default()).unwrap();
/// assert_eq!(collection.len(), 6);
/// ```
pub fn build_stack(grid: &PixelGrid, config: &StlConfig) -> LithoResult<MeshCollection> {
    build_stack_with(grid, config, config.color_correction.extractor())
}

/// Same as [`build_stack`] with an explicit channel extractor.
pub fn build_stack_with(
    grid: &PixelGrid,
    config: &StlConfig,
    extractor: &dyn ChannelExtractor,
) -> LithoResult<MeshCollection> {
    if grid.channels() != 3 {
        return Err(LithoError::invalid_input(format!(
            "image must be CYM/3-channel, got {} channels",
            grid.channels()
        )));
    }
    if grid.rows() == 0 || grid.cols() == 0 {
        return Err(LithoError::invalid_input("pixel grid is empty"));
    }
    config.validate()?;

    let channels = extractor.extract(grid, &config.luminance_config)?;
    let (rows, cols) = (grid.rows(), grid.cols());

    let mut meshes = Vec::with_capacity(StackLayer::ORDER.len());
    let mut cumulative = HeightMap::zeros(rows, cols);

    for layer in StackLayer::ORDER {
        let layer_type = layer.layer_type();
        match config.filament_library.get(&layer_type) {
            Some(filament) => info!(layer = layer.name(), filament = %filament.name, "creating stl: {}.stl", layer.name()),
            None => info!(layer = layer.name(), "creating stl: {}.stl", layer.name()),
        }

        let (mesh, next) = match layer {
            StackLayer::Base => build_base(rows, cols, config)?,
            _ => {
                let height_map = match layer {
                    StackLayer::Cyan => &channels.cyan,
                    StackLayer::Yellow => &channels.yellow,
                    StackLayer::Magenta => &channels.magenta,
                    _ => &channels.intensity_map,
                };
                let spec = LayerSpec::for_layer(layer_type, config);
                let params = LayerParams::from_spec(&spec, config.pixel_size, config.face_up);
                build_layer(height_map, &params, Some(&cumulative))?
            }
        };

        cumulative = next;
        meshes.push((layer.name().to_string(), mesh));
    }

    info!(top = cumulative.max(), "stack complete");
    Ok(MeshCollection::new(meshes))
}

//! # Litho Mesh
//!
//! Geometry engine for multi-color (CMY + white) lithophanes.
//! Turns a pixelated image into a stack of layer solids, one per filament,
//! each printed on top of the previous one.
//!
//! ## Architecture
//!
//! ```text
//! PixelGrid → ChannelExtractor → IntensityChannels
//!       ↓
//! build_base → build_layer × 5 (cumulative heights threaded through)
//!       ↓
//! MeshCollection → save_to_folder (one STL per layer)
//! ```
//!
//! Every grid cell becomes an independent axis-aligned box of 12 triangles
//! whose footprint is `pixel_size` square and whose height is the layer's
//! quantized thickness for that cell.
//!
//! ## Usage
//!
//! ```rust
//! use litho_mesh::{build_stack, PixelGrid, StlConfig};
//!
//! let grid = PixelGrid::uniform(4, 4, &[0.9, 0.4, 0.1]).unwrap();
//! let layers = build_stack(&grid, &StlConfig::default()).unwrap();
//! assert_eq!(layers.names().next(), Some("white_base_mesh"));
//! ```

pub mod base;
pub mod channels;
pub mod collection;
pub mod error;
pub mod filament;
pub mod height_map;
pub mod layer;
pub mod mesh;
pub mod mesher;
pub mod settings;
pub mod stack;
pub mod stl;

pub use base::build_base;
pub use channels::{
    ChannelExtractor, ColorCorrection, IntensityChannels, LinearExtractor, LuminanceExtractor, PixelGrid,
};
pub use collection::MeshCollection;
pub use error::{LithoError, LithoResult};
pub use filament::{Filament, FilamentAssignment, FilamentLibrary};
pub use height_map::HeightMap;
pub use layer::{LayerSpec, LayerType, StackLayer};
pub use mesh::{Mesh, Triangle};
pub use mesher::{build_layer, layer_delta, LayerParams};
pub use settings::{LuminanceConfig, StlConfig};
pub use stack::{build_stack, build_stack_with};
pub use stl::{save_stl, StlFormat};

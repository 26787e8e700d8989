//! # Layer Roles
//!
//! Color roles, their meshing policy, and the fixed order in which the
//! stack is printed.

use serde::{Deserialize, Serialize};

use crate::settings::StlConfig;

/// Material role of one printed layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Cyan,
    Magenta,
    Yellow,
    White,
    /// Transparent structural cap.
    Clear,
}

impl LayerType {
    /// Lower-case role name.
    pub fn as_str(self) -> &'static str {
        match self {
            LayerType::Cyan => "cyan",
            LayerType::Magenta => "magenta",
            LayerType::Yellow => "yellow",
            LayerType::White => "white",
            LayerType::Clear => "clear",
        }
    }
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meshing policy for a layer role.
///
/// Only white layers enforce a non-zero thickness floor and only the clear
/// layer is extruded to a flat top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSpec {
    pub layer_type: LayerType,
    /// Minimum thickness applied to every cell's delta.
    pub min_height: f64,
    /// Extrude every cell up to one shared absolute height.
    pub flat_top: bool,
    /// Thickness quantization step, 0 disables quantization.
    pub quant_step: f64,
}

impl LayerSpec {
    /// Derives the policy for `layer_type` from the run configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use litho_mesh::{LayerSpec, LayerType, StlConfig};
    ///
    /// let config = StlConfig::default();
    /// let white = LayerSpec::for_layer(LayerType::White, &config);
    /// assert_eq!(white.min_height, config.intensity_min_height);
    ///
    /// let clear = LayerSpec::for_layer(LayerType::Clear, &config);
    /// assert!(clear.flat_top);
    /// assert_eq!(clear.min_height, 0.0);
    /// ```
    pub fn for_layer(layer_type: LayerType, config: &StlConfig) -> Self {
        Self {
            layer_type,
            min_height: if layer_type == LayerType::White {
                config.intensity_min_height
            } else {
                0.0
            },
            flat_top: layer_type == LayerType::Clear,
            quant_step: config.height_step_mm,
        }
    }
}

/// One slot of the printed stack, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackLayer {
    /// Constant-height white slab every color layer sits on.
    Base,
    Cyan,
    Yellow,
    Magenta,
    /// Flat-top transparent cap.
    Clear,
    /// White backing layer driven by the intensity map.
    WhiteIntensity,
}

impl StackLayer {
    /// Print order. Each layer's heights are relative to the ones before it.
    pub const ORDER: [StackLayer; 6] = [
        StackLayer::Base,
        StackLayer::Cyan,
        StackLayer::Yellow,
        StackLayer::Magenta,
        StackLayer::Clear,
        StackLayer::WhiteIntensity,
    ];

    /// Stable mesh name, also used as the STL file stem.
    pub fn name(self) -> &'static str {
        match self {
            StackLayer::Base => "white_base_mesh",
            StackLayer::Cyan => "cyan_mesh",
            StackLayer::Yellow => "yellow_mesh",
            StackLayer::Magenta => "magenta_mesh",
            StackLayer::Clear => "clear_mesh",
            StackLayer::WhiteIntensity => "white_intensity_mesh",
        }
    }

    /// Material role printed in this slot.
    pub fn layer_type(self) -> LayerType {
        match self {
            StackLayer::Base | StackLayer::WhiteIntensity => LayerType::White,
            StackLayer::Cyan => LayerType::Cyan,
            StackLayer::Yellow => LayerType::Yellow,
            StackLayer::Magenta => LayerType::Magenta,
            StackLayer::Clear => LayerType::Clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_white_has_floor() {
        let config = StlConfig {
            intensity_min_height: 0.16,
            ..StlConfig::default()
        };
        for layer_type in [LayerType::Cyan, LayerType::Magenta, LayerType::Yellow, LayerType::Clear] {
            assert_eq!(LayerSpec::for_layer(layer_type, &config).min_height, 0.0);
        }
        assert_eq!(LayerSpec::for_layer(LayerType::White, &config).min_height, 0.16);
    }

    #[test]
    fn test_only_clear_is_flat_top() {
        let config = StlConfig::default();
        for layer_type in [LayerType::Cyan, LayerType::Magenta, LayerType::Yellow, LayerType::White] {
            assert!(!LayerSpec::for_layer(layer_type, &config).flat_top);
        }
    }

    #[test]
    fn test_stack_order_is_fixed() {
        let names: Vec<_> = StackLayer::ORDER.iter().map(|l| l.name()).collect();
        assert_eq!(
            names,
            [
                "white_base_mesh",
                "cyan_mesh",
                "yellow_mesh",
                "magenta_mesh",
                "clear_mesh",
                "white_intensity_mesh"
            ]
        );
    }

    #[test]
    fn test_base_prints_white() {
        assert_eq!(StackLayer::Base.layer_type(), LayerType::White);
        assert_eq!(StackLayer::WhiteIntensity.layer_type(), LayerType::White);
    }
}

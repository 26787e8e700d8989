//! # Filament Library
//!
//! Material metadata for each color role. The library is loaded once from a
//! TOML file (or the built-in table) and handed to the stack as an immutable
//! assignment; the mesher itself never reads it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LithoError, LithoResult};
use crate::layer::LayerType;

const BUILTIN_LIBRARY: &str = include_str!("../data/filaments.toml");

/// One spool's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filament {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    /// Hex color such as `#0086D6`.
    pub color: String,
    /// Transmission distance in millimetres.
    pub td: f64,
}

impl Filament {
    /// Parses [`Filament::color`] into RGB bytes.
    pub fn rgb(&self) -> LithoResult<[u8; 3]> {
        hex_to_rgb(&self.color)
    }
}

/// Filament chosen for each layer role.
pub type FilamentAssignment = BTreeMap<LayerType, Filament>;

#[derive(Debug, Deserialize)]
struct LibraryFile {
    filaments: BTreeMap<String, Filament>,
}

/// Lookup table from filament id to metadata.
///
/// # Example
///
/// ```rust
/// use litho_mesh::FilamentLibrary;
///
/// let library = FilamentLibrary::builtin().unwrap();
/// let cyan = library.get_filament("bambu_cyan_pla").unwrap();
/// assert_eq!(cyan.rgb().unwrap(), [0x00, 0x86, 0xD6]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilamentLibrary {
    filaments: BTreeMap<String, Filament>,
}

impl FilamentLibrary {
    /// Parses a library from TOML text with one `[filaments.<id>]` table per
    /// spool.
    pub fn from_toml_str(source: &str) -> LithoResult<Self> {
        let file: LibraryFile = toml::from_str(source)
            .map_err(|e| LithoError::filament(format!("malformed filament library: {e}")))?;
        for (id, filament) in &file.filaments {
            filament
                .rgb()
                .map_err(|e| LithoError::filament(format!("filament '{id}': {e}")))?;
            if !filament.td.is_finite() || filament.td < 0.0 {
                return Err(LithoError::filament(format!(
                    "filament '{id}' has invalid td {}",
                    filament.td
                )));
            }
        }
        Ok(Self {
            filaments: file.filaments,
        })
    }

    /// Reads and parses a library file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> LithoResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// The library bundled with the crate.
    pub fn builtin() -> LithoResult<Self> {
        Self::from_toml_str(BUILTIN_LIBRARY)
    }

    /// Looks up a filament by id.
    pub fn get_filament(&self, id: &str) -> LithoResult<&Filament> {
        self.filaments
            .get(id)
            .ok_or_else(|| LithoError::filament(format!("unknown filament '{id}'")))
    }

    /// Filament ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.filaments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.filaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filaments.is_empty()
    }

    /// Builds a layer assignment from `(role, filament id)` pairs.
    pub fn assign(&self, pairs: &[(LayerType, &str)]) -> LithoResult<FilamentAssignment> {
        pairs
            .iter()
            .map(|&(layer_type, id)| Ok::<_, LithoError>((layer_type, self.get_filament(id)?.clone())))
            .collect()
    }
}

/// Parses `#RRGGBB` (leading `#` optional) into bytes.
///
/// # Example
///
/// ```rust
/// use litho_mesh::filament::hex_to_rgb;
///
/// assert_eq!(hex_to_rgb("#FF8000").unwrap(), [255, 128, 0]);
/// assert!(hex_to_rgb("#F80").is_err());
/// ```
pub fn hex_to_rgb(hex: &str) -> LithoResult<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(LithoError::filament(format!("invalid hex color '{hex}'")));
    }
    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|_| LithoError::filament(format!("invalid hex color '{hex}'")))?;
    }
    Ok(rgb)
}

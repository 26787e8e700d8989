//! `lithophane`: image → stacked CMY + white lithophane STL layers.

mod pixelate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use config::constants::{
    DEFAULT_CYM_TARGET_THICKNESS_MM, DEFAULT_PIXEL_SIZE_MM, DEFAULT_PRINT_WIDTH_MM, DEFAULT_STL_OUTPUT_DIR,
    DEFAULT_WHITE_TARGET_THICKNESS_MM,
};
use litho_mesh::{build_stack, ColorCorrection, FilamentLibrary, LayerType, LuminanceConfig, StlConfig, StlFormat};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::pixelate::{load_rgb, pixelate, preview, BlockLayout};

/// Filaments loaded for each color-driven layer.
const FILAMENT_ASSIGNMENT: [(LayerType, &str); 4] = [
    (LayerType::Cyan, "bambu_cyan_pla"),
    (LayerType::Yellow, "bambu_yellow_pla"),
    (LayerType::Magenta, "bambu_magenta_pla"),
    (LayerType::White, "bambu_white_pla"),
];

#[derive(Parser, Debug)]
#[command(name = "lithophane")]
#[command(about = "Convert an image into multi-color lithophane STL layers", long_about = None)]
struct Cli {
    /// Input image file
    #[arg(short, long)]
    input: PathBuf,

    /// Where to save the pixelated preview image
    #[arg(short = 'o', long)]
    output_image: Option<PathBuf>,

    /// Final print width (mm)
    #[arg(short, long, default_value_t = DEFAULT_PRINT_WIDTH_MM)]
    width: f64,

    /// Physical size of one pixel block (mm)
    #[arg(short, long, default_value_t = DEFAULT_PIXEL_SIZE_MM)]
    resolution: f64,

    /// Output directory for the STL files
    #[arg(long, default_value = DEFAULT_STL_OUTPUT_DIR)]
    stl_output: PathBuf,

    /// Mirror the model so the image faces up when printed
    #[arg(long)]
    face_up: bool,

    /// Target thickness of the CMY layers (mm)
    #[arg(long, default_value_t = DEFAULT_CYM_TARGET_THICKNESS_MM)]
    cym_target_thickness: f64,

    /// Target thickness of the white layer (mm)
    #[arg(long, default_value_t = DEFAULT_WHITE_TARGET_THICKNESS_MM)]
    white_target_thickness: f64,

    /// Channel extraction strategy
    #[arg(long, value_enum, default_value_t = Correction::Luminance)]
    color_correction: Correction,

    /// Filament library (TOML); the built-in library is used when omitted
    #[arg(long)]
    filaments: Option<PathBuf>,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    ascii: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Correction {
    Luminance,
    Linear,
}

impl From<Correction> for ColorCorrection {
    fn from(value: Correction) -> Self {
        match value {
            Correction::Luminance => ColorCorrection::Luminance,
            Correction::Linear => ColorCorrection::Linear,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let img = load_rgb(&cli.input)?;
    let (width_px, height_px) = img.dimensions();
    let layout = BlockLayout::for_print(width_px, height_px, cli.width, cli.resolution)?;

    let physical_height = f64::from(height_px) / f64::from(width_px) * cli.width;
    info!(rows = layout.rows, cols = layout.cols, block_px = layout.block_px, "pixel block grid");
    info!(
        "print size: {:.1}mm x {:.1}mm, {}mm blocks",
        cli.width, physical_height, cli.resolution
    );

    let grid = pixelate(&img, &layout)?;
    if let Some(path) = &cli.output_image {
        preview(&grid, layout.block_px)
            .save(path)
            .with_context(|| format!("failed to save pixelated image {}", path.display()))?;
        info!(path = %path.display(), "saved pixelated image");
    }

    let library = match &cli.filaments {
        Some(path) => FilamentLibrary::from_toml_file(path)?,
        None => FilamentLibrary::builtin()?,
    };

    let config = StlConfig {
        pixel_size: cli.resolution,
        face_up: cli.face_up,
        luminance_config: LuminanceConfig {
            cym_target_thickness: cli.cym_target_thickness,
            white_target_thickness: cli.white_target_thickness,
        },
        color_correction: cli.color_correction.into(),
        filament_library: library.assign(&FILAMENT_ASSIGNMENT)?,
        ..StlConfig::default()
    };
    info!("stl configuration:\n{}", serde_json::to_string_pretty(&config)?);

    let collection = build_stack(&grid, &config)?;
    let format = if cli.ascii { StlFormat::Ascii } else { StlFormat::Binary };
    let paths = collection.save_to_folder(&cli.stl_output, format)?;

    info!(files = paths.len(), faces = collection.face_count(), dir = %cli.stl_output.display(), "done");
    Ok(())
}

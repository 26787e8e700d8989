//! STL (Stereolithography) output.
//!
//! Writes binary or ASCII STL using each face's stored normal. Coordinates
//! are millimetres.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use config::constants::STL_HEADER_TEXT;
use glam::DVec3;

use crate::error::{LithoError, LithoResult};
use crate::mesh::Mesh;

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// STL encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// Saves `mesh` to `path`.
///
/// `name` is written into the ASCII `solid` line and ignored for binary
/// output.
pub fn save_stl(mesh: &Mesh, path: impl AsRef<Path>, name: &str, format: StlFormat) -> LithoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        StlFormat::Binary => write_stl_binary(mesh, &mut writer)?,
        StlFormat::Ascii => write_stl_ascii(mesh, name, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Writes binary STL.
pub fn write_stl_binary<W: Write>(mesh: &Mesh, mut writer: W) -> LithoResult<()> {
    let mut header = [b' '; HEADER_SIZE];
    header[..STL_HEADER_TEXT.len()].copy_from_slice(STL_HEADER_TEXT.as_bytes());
    writer.write_all(&header)?;

    let face_count = u32::try_from(mesh.face_count()).map_err(|_| {
        LithoError::invalid_input(format!(
            "{} faces exceed the binary STL limit",
            mesh.face_count()
        ))
    })?;
    writer.write_all(&face_count.to_le_bytes())?;

    for tri in mesh.triangles() {
        write_vec_binary(&mut writer, tri.normal)?;
        for v in tri.vertices {
            write_vec_binary(&mut writer, v)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Writes a vector as 3 little-endian f32s.
fn write_vec_binary<W: Write>(writer: &mut W, v: DVec3) -> LithoResult<()> {
    for component in v.as_vec3().to_array() {
        writer.write_all(&component.to_le_bytes())?;
    }
    Ok(())
}

/// Writes ASCII STL.
pub fn write_stl_ascii<W: Write>(mesh: &Mesh, name: &str, mut writer: W) -> LithoResult<()> {
    writeln!(writer, "solid {name}")?;

    for tri in mesh.triangles() {
        let n = tri.normal;
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in tri.vertices {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {name}")?;

    Ok(())
}

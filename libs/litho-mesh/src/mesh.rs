//! # Mesh Data Structure
//!
//! Triangle-soup mesh: every face owns its three vertex positions and one
//! unit normal. No vertex indexing or welding is performed, which is all an
//! STL file needs.

use config::constants::DEGENERATE_NORMAL;
use glam::DVec3;

/// One triangular face with its outward unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    /// Corner positions in millimetres, counter-clockwise seen from outside.
    pub vertices: [DVec3; 3],
    /// Unit normal, or exactly `(0, 0, 1)` for zero-area faces.
    pub normal: DVec3,
}

impl Triangle {
    /// Creates a triangle and computes its normal from the winding.
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
            normal: face_normal(v0, v1, v2),
        }
    }

    /// Returns true if the face has zero area and carries the fallback normal.
    pub fn is_degenerate(&self) -> bool {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(v2 - v0).length() == 0.0
    }
}

/// Computes the unit normal of the triangle `(v0, v1, v2)`.
///
/// Uses the cross product of the two edges leaving `v0`. Zero-area triangles
/// get the upward fallback normal instead of a NaN.
///
/// # Example
///
/// ```rust
/// use litho_mesh::mesh::face_normal;
/// use glam::DVec3;
///
/// let n = face_normal(DVec3::ZERO, DVec3::X, DVec3::Y);
/// assert_eq!(n, DVec3::Z);
///
/// // Collapsed triangle
/// let n = face_normal(DVec3::ZERO, DVec3::X, DVec3::X * 2.0);
/// assert_eq!(n, DVec3::Z);
/// ```
#[inline]
pub fn face_normal(v0: DVec3, v1: DVec3, v2: DVec3) -> DVec3 {
    let normal = (v1 - v0).cross(v2 - v0);
    let len = normal.length();
    if len > 0.0 {
        normal / len
    } else {
        DVec3::from_array(DEGENERATE_NORMAL)
    }
}

/// A triangle mesh for one printed layer.
///
/// # Example
///
/// ```rust
/// use litho_mesh::{Mesh, Triangle};
/// use glam::DVec3;
///
/// let mesh = Mesh::from_triangles(vec![Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y)]);
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.vertex_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing face list.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the number of stored vertex positions (three per face).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns the faces.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Iterates over every stored vertex position.
    pub fn vertices(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices)
    }

    /// Number of faces that carry the zero-area fallback normal.
    pub fn degenerate_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.is_degenerate()).count()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut vertices = self.vertices();
        let Some(first) = vertices.next() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        vertices.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
    }
}

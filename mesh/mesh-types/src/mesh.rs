//! Indexed polygon mesh.

use crate::{FormatError, FormatResult, MeshTopology, Vertex};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed polygon mesh.
///
/// Stores vertices and faces separately, with faces referencing vertices by
/// zero-based index. Faces are polygons of three or more vertices; they are
/// kept as written so that OBJ and OFF round-trip exactly, and can be
/// fan-triangulated on demand with [`IndexedMesh::triangles`].
///
/// # Invariant
///
/// Every face index lies in `[0, vertices.len())` and every face has at
/// least three indices. Parsers and [`IndexedMesh::try_from_parts`] enforce
/// this; code that fills the public fields directly can re-check it with
/// [`IndexedMesh::validate`].
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, MeshTopology, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push(vec![0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Faces as ordered indices into the vertex array.
    pub faces: Vec<Vec<u32>>,
}

impl IndexedMesh {
    /// Mesh with no vertices and no faces.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Empty mesh sized for `vertex_count` vertices and `face_count` faces.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces without validation.
    ///
    /// Use [`IndexedMesh::try_from_parts`] when the faces come from
    /// untrusted input.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<Vec<u32>>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from vertices and faces, checking the index invariant.
    ///
    /// # Errors
    ///
    /// - [`FormatError::DegenerateFace`] if a face has fewer than 3 indices
    /// - [`FormatError::BadIndex`] if a face references a missing vertex
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{FormatError, IndexedMesh, Vertex};
    ///
    /// let vertices = vec![
    ///     Vertex::from_coords(0.0, 0.0, 0.0),
    ///     Vertex::from_coords(1.0, 0.0, 0.0),
    ///     Vertex::from_coords(0.0, 1.0, 0.0),
    /// ];
    /// let result = IndexedMesh::try_from_parts(vertices, vec![vec![0, 1, 3]]);
    /// assert!(matches!(result, Err(FormatError::BadIndex { index: 3, .. })));
    /// ```
    pub fn try_from_parts(vertices: Vec<Vertex>, faces: Vec<Vec<u32>>) -> FormatResult<Self> {
        let mesh = Self { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Check that every face has at least three indices, all in range.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, scanning faces in order.
    pub fn validate(&self) -> FormatResult<()> {
        let vertex_count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(FormatError::DegenerateFace {
                    face: face_idx,
                    len: face.len(),
                });
            }
            if let Some(&bad) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(FormatError::BadIndex {
                    face: face_idx,
                    index: i64::from(bad),
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Ordered vertex positions, as handed to a scene-construction layer.
    pub fn positions(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Fan-triangulate every face.
    ///
    /// A face `[a, b, c, d]` becomes `[a, b, c]` and `[a, c, d]`. This is
    /// correct for convex polygons, which is what OBJ/OFF exporters emit in
    /// practice.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.faces.iter().flat_map(|face| {
            let anchor = face.first().copied().unwrap_or_default();
            face.windows(2)
                .skip(1)
                .map(move |pair| [anchor, pair[0], pair[1]])
        })
    }

    /// Number of triangles [`IndexedMesh::triangles`] yields.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.len().saturating_sub(2)).sum()
    }

    /// Shift every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }

    /// Multiply every coordinate by `factor`. Faces are untouched.
    pub fn scale(&mut self, factor: f64) {
        for vertex in &mut self.vertices {
            vertex.position.coords *= factor;
        }
    }

    /// Append `other`, rebasing its face indices past our current vertices.
    #[allow(clippy::cast_possible_truncation)]
    // indices are u32; meshes past u32::MAX vertices are out of scope
    pub fn merge(&mut self, other: &Self) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        for face in &other.faces {
            self.faces.push(face.iter().map(|&i| base + i).collect());
        }
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<&[u32]> {
        self.faces.get(index).map(Vec::as_slice)
    }

    fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    fn faces(&self) -> impl Iterator<Item = &[u32]> {
        self.faces.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.faces.push(vec![0, 1, 2]);
        mesh
    }

    #[test]
    fn empty_until_it_has_a_face() {
        assert!(IndexedMesh::new().is_empty());

        let lone = vec![Vertex::from_coords(0.5, 0.5, 0.5)];
        let mut mesh = IndexedMesh::from_parts(lone, Vec::new());
        assert!(mesh.is_empty());

        mesh.faces.push(vec![0, 0, 0]);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut mesh = triangle();
        mesh.faces.push(vec![0, 2, 5]);
        match mesh.validate() {
            Err(FormatError::BadIndex {
                face,
                index,
                vertex_count,
            }) => {
                assert_eq!(face, 1);
                assert_eq!(index, 5);
                assert_eq!(vertex_count, 3);
            }
            other => panic!("expected BadIndex, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_two_vertex_face() {
        let mut mesh = triangle();
        mesh.faces.push(vec![0, 1]);
        assert!(matches!(
            mesh.validate(),
            Err(FormatError::DegenerateFace { face: 1, len: 2 })
        ));
    }

    #[test]
    fn fan_triangulation_of_quad() {
        let mut mesh = IndexedMesh::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            mesh.vertices.push(Vertex::from_coords(x, y, 0.0));
        }
        mesh.faces.push(vec![0, 1, 2, 3]);

        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn triangle_passes_through_unchanged() {
        let mesh = triangle();
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2]]);
    }

    #[test]
    fn merge_rebases_indices() {
        let mut combined = triangle();
        let mut shifted = triangle();
        shifted.translate(Vector3::new(2.0, 0.0, 0.0));

        combined.merge(&shifted);
        assert_eq!(combined.vertex_count(), 6);
        assert_eq!(combined.faces, vec![vec![0, 1, 2], vec![3, 4, 5]]);
        assert_eq!(combined.vertices[4].position, Point3::new(3.0, 0.0, 0.0));
        assert!(combined.validate().is_ok());
    }

    #[test]
    fn translate_moves_every_vertex() {
        let mut mesh = triangle();
        mesh.translate(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices[0].position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices[2].position, Point3::new(1.0, 3.0, 3.0));
    }

    #[test]
    fn mesh_scale_keeps_topology() {
        let mut mesh = triangle();
        mesh.scale(2.0);
        assert_eq!(mesh.vertices[1].position, Point3::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn positions_in_order() {
        let mesh = triangle();
        let positions: Vec<_> = mesh.positions().collect();
        assert_eq!(positions[2], Point3::new(0.0, 1.0, 0.0));
    }
}

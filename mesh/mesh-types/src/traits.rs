//! Read-only mesh access.

use crate::Vertex;

/// Ordered vertices plus per-face index lists.
///
/// This is the view a scene-construction layer needs to build native
/// geometry without knowing how the mesh stores itself.
pub trait MeshTopology {
    /// How many vertices there are.
    fn vertex_count(&self) -> usize;

    /// How many faces there are (polygons, not triangles).
    fn face_count(&self) -> usize;

    /// True when there is nothing to draw: no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.face_count() == 0 || self.vertex_count() == 0
    }

    /// Vertex at `index`, if in range.
    fn vertex(&self, index: usize) -> Option<&Vertex>;

    /// Indices of face `index`, if in range.
    fn face(&self, index: usize) -> Option<&[u32]>;

    /// Vertices in index order.
    fn vertices(&self) -> impl Iterator<Item = &Vertex>;

    /// Faces in file order.
    fn faces(&self) -> impl Iterator<Item = &[u32]>;
}

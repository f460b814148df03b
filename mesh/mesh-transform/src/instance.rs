//! Geometry instancing: one template shape copied to many centers.

use mesh_types::IndexedMesh;
use nalgebra::Point3;
use tracing::debug;

/// Place a scaled copy of `template` at every center and merge the copies
/// into one mesh.
///
/// Each copy's vertices are `template_vertex * radius + center`; faces are
/// re-based onto the merged vertex array. This is how points become spheres
/// and voxels become cubes for a renderer that only understands meshes.
/// The template is an ordinary value, so callers choose and own it.
///
/// # Example
///
/// ```
/// use mesh_transform::instance_template;
/// use mesh_types::{cube, MeshTopology};
/// use nalgebra::Point3;
///
/// let centers = [Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0)];
/// let mesh = instance_template(&cube(), centers, 0.5);
/// assert_eq!(mesh.vertex_count(), 16);
/// assert_eq!(mesh.face_count(), 12);
/// ```
#[must_use]
pub fn instance_template<I>(template: &IndexedMesh, centers: I, radius: f64) -> IndexedMesh
where
    I: IntoIterator<Item = Point3<f64>>,
{
    let centers = centers.into_iter();
    let (lower, _) = centers.size_hint();
    let mut result = IndexedMesh::with_capacity(
        template.vertices.len() * lower,
        template.faces.len() * lower,
    );

    let mut copy = template.clone();
    let mut instances = 0usize;
    for center in centers {
        for (dst, src) in copy.vertices.iter_mut().zip(&template.vertices) {
            dst.position = center + src.position.coords * radius;
        }
        result.merge(&copy);
        instances += 1;
    }

    debug!(
        instances,
        vertices = result.vertices.len(),
        faces = result.faces.len(),
        "Instanced template"
    );
    result
}

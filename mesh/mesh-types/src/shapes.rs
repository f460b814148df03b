//! Template shapes used when instancing points and voxels as geometry.
//!
//! Both shapes are centred on the origin so that scaling by a radius and
//! translating to a center places them correctly.

use crate::{IndexedMesh, Vertex};

/// An axis-aligned cube from (-1,-1,-1) to (1,1,1) with six quad faces.
///
/// Faces wind counter-clockwise when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{cube, MeshTopology};
///
/// let cube = cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 6);
/// assert_eq!(cube.triangle_count(), 12);
/// ```
#[must_use]
pub fn cube() -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(8, 6);

    mesh.vertices.push(Vertex::from_coords(-1.0, -1.0, -1.0)); // 0
    mesh.vertices.push(Vertex::from_coords(1.0, -1.0, -1.0)); // 1
    mesh.vertices.push(Vertex::from_coords(1.0, 1.0, -1.0)); // 2
    mesh.vertices.push(Vertex::from_coords(-1.0, 1.0, -1.0)); // 3
    mesh.vertices.push(Vertex::from_coords(-1.0, -1.0, 1.0)); // 4
    mesh.vertices.push(Vertex::from_coords(1.0, -1.0, 1.0)); // 5
    mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 1.0)); // 6
    mesh.vertices.push(Vertex::from_coords(-1.0, 1.0, 1.0)); // 7

    mesh.faces.push(vec![0, 3, 2, 1]); // -Z
    mesh.faces.push(vec![4, 5, 6, 7]); // +Z
    mesh.faces.push(vec![0, 1, 5, 4]); // -Y
    mesh.faces.push(vec![3, 7, 6, 2]); // +Y
    mesh.faces.push(vec![0, 4, 7, 3]); // -X
    mesh.faces.push(vec![1, 2, 6, 5]); // +X

    mesh
}

/// A regular icosahedron with unit circumradius.
///
/// The coarsest sphere approximation; twenty triangles.
#[must_use]
pub fn icosahedron() -> IndexedMesh {
    let phi = f64::midpoint(1.0, 5.0_f64.sqrt());
    let a = 1.0;
    let b = 1.0 / phi;

    let corners = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ];

    let faces: [[u32; 3]; 20] = [
        [0, 1, 2],
        [3, 2, 1],
        [3, 4, 5],
        [3, 8, 4],
        [0, 6, 7],
        [0, 9, 6],
        [4, 10, 11],
        [6, 11, 10],
        [2, 5, 9],
        [11, 9, 5],
        [1, 7, 8],
        [10, 8, 7],
        [3, 5, 2],
        [3, 1, 8],
        [0, 2, 9],
        [0, 7, 1],
        [6, 9, 11],
        [6, 10, 7],
        [4, 11, 5],
        [4, 8, 10],
    ];

    let mut mesh = IndexedMesh::with_capacity(corners.len(), faces.len());
    for [x, y, z] in corners {
        let len = z.mul_add(z, x.mul_add(x, y * y)).sqrt();
        mesh.vertices.push(Vertex::from_coords(x / len, y / len, z / len));
    }
    mesh.faces.extend(faces.iter().map(|f| f.to_vec()));

    mesh
}

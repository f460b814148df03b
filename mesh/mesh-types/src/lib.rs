//! Core asset types for the asset conversion toolkit.
//!
//! This crate provides the in-memory representations every codec reads
//! into and writes from:
//!
//! - [`Vertex`] - A position in 3D space
//! - [`IndexedMesh`] - A polygon mesh with indexed vertices
//! - [`PointCloud`] - An ordered set of points without connectivity
//! - [`VertexColor`] - RGB decoration used by colored exports
//! - [`FormatError`] - The error type shared by all codecs
//!
//! plus the template shapes ([`cube`], [`icosahedron`]) that instancing
//! uses to turn points and voxels into geometry.
//!
//! # Rendering-Free
//!
//! Nothing here depends on a 3D-authoring host. A scene-construction layer
//! consumes ordered positions and face index lists and builds its own
//! native objects.
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshTopology, Point3, Vertex};
//!
//! // Create a simple triangle mesh
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(0.5, 1.0, 0.0)));
//! mesh.faces.push(vec![0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod mesh;
mod point_cloud;
mod shapes;
mod traits;
mod vertex;

// Re-export core types
pub use error::{FormatError, FormatResult};
pub use mesh::IndexedMesh;
pub use point_cloud::PointCloud;
pub use shapes::{cube, icosahedron};
pub use traits::MeshTopology;
pub use vertex::{Vertex, VertexColor};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

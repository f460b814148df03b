//! Coordinate-frame transforms for meshes, point clouds and voxel centers.
//!
//! This crate provides:
//! - [`AxisPermutation`] - a validated bijection over the x, y and z axes
//! - [`Scale`] - uniform or per-axis scale
//! - [`CoordinateTransform`] - permute, then scale, then translate
//! - [`instance_template`] - turn a set of centers into one merged mesh
//!
//! The operation order is fixed: axes are permuted first, the permuted
//! coordinates are scaled, and the offset is added last. Transforms only
//! move positions; they never change faces or point order.
//!
//! # Example
//!
//! ```
//! use mesh_transform::{AxisPermutation, CoordinateTransform, Scale};
//! use mesh_types::{IndexedMesh, Vertex};
//! use nalgebra::Vector3;
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 2.0));
//!
//! let axes: AxisPermutation = "xzy".parse().unwrap();
//! let transform = CoordinateTransform::new(axes, Scale::Uniform(2.0), Vector3::new(1.0, 0.0, 0.0));
//! transform.apply_to_mesh(&mut mesh);
//!
//! assert_eq!(mesh.vertices[0].coords(), [1.0, 4.0, 2.0]);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod axis;
mod instance;
mod transform;

pub use axis::{Axis, AxisPermutation};
pub use instance::instance_template;
pub use transform::{CoordinateTransform, Scale, apply, parse_floats};

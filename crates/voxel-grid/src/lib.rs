//! Dense voxel occupancy grids and the binvox codec.
//!
//! This crate provides:
//!
//! - [`VoxelGrid`] - a fixed-size boolean grid with model-space placement
//! - [`VoxelCoord`] - unsigned voxel coordinates
//! - [`decode`] / [`encode`] - the binvox run-length format
//! - [`load_binvox`] / [`save_binvox`] - path-level I/O
//!
//! # Flattening order
//!
//! The flat occupancy array uses the binvox order: x varies slowest, then z,
//! then y fastest. Any other order would produce files no other binvox
//! reader agrees with, so [`VoxelGrid::linear_index`] is the single place
//! that defines it.
//!
//! # Voxel centers
//!
//! Occupied voxels can be turned into points three ways:
//!
//! - [`VoxelGrid::normalized_centers`] maps the grid into the unit cube
//!   centred at the origin
//! - [`VoxelGrid::transformed_centers`] additionally applies a
//!   [`CoordinateTransform`](mesh_transform::CoordinateTransform)
//! - [`VoxelGrid::world_center`] uses the grid's own translation and scale
//!
//! # Example
//!
//! ```
//! use voxel_grid::{sample_box_grid, VoxelGrid};
//!
//! let grid = sample_box_grid(32, 10, 22).unwrap();
//! let bytes = voxel_grid::encode(&grid);
//! let decoded = voxel_grid::decode(&bytes).unwrap();
//!
//! assert_eq!(decoded.occupied().count(), 12 * 12 * 12);
//! assert_eq!(decoded, grid);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod binvox;
mod grid;
mod voxel;

pub use binvox::{MAX_RUN, decode, encode, load_binvox, read_binvox, save_binvox, write_binvox};
pub use grid::{VoxelGrid, sample_box_grid};
pub use mesh_types::{FormatError, FormatResult};
pub use voxel::VoxelCoord;

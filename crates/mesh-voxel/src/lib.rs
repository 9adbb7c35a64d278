//! Mesh voxelization with a bit-packed occupancy grid.
//!
//! This crate converts triangle meshes into dense boolean voxel grids:
//!
//! - **BinaryGrid3**: a word-packed 3D bit grid with point queries, boolean
//!   union, equality metrics, and a bounds-aware interior fill
//! - **Voxelization**: triangle rasterization over a world-space bounding
//!   box at an explicit resolution or a target voxel edge length
//! - **Solidification**: flood-fill classification that fills pockets
//!   enclosed by the rasterized shell while leaving exterior space empty
//!
//! # Example
//!
//! ```
//! use mesh_core::{Aabb, Mesh};
//! use mesh_voxel::{voxelize, VoxelizeParams};
//! use nalgebra::{Point3, Vector3};
//!
//! // A closed 5x5x5 cube...
//! let mut mesh = Mesh::new();
//! mesh.push_box(Point3::new(2.5, 2.5, 2.5), Vector3::new(5.0, 5.0, 5.0));
//!
//! // ...voxelized at one cell per world unit, with its interior filled.
//! let bounds = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 5.0, 5.0));
//! let params = VoxelizeParams::dims(Vector3::new(5, 5, 5)).solid(true);
//! let (grid, stats) = voxelize(&mesh, &bounds, &params).unwrap();
//!
//! assert!(grid.is_set(2, 2, 2));
//! assert_eq!(stats.dims, Vector3::new(5, 5, 5));
//! ```

mod error;
mod fill;
mod grid;
mod region;
mod voxelize;

pub use error::{VoxelError, VoxelResult};
pub use grid::{popcount, BinaryGrid3};
pub use region::GridRegion;
pub use voxelize::{voxelize, GridResolution, VoxelizeParams, VoxelizeStats};

//! Triangle mesh containers and geometric primitives.
//!
//! This crate provides the small set of geometry types a voxelizer consumes:
//!
//! - **Mesh**: a flat vertex/index buffer with bounding-box queries and a
//!   triangle iterator
//! - **Aabb**: an axis-aligned bounding box with merge/intersection queries
//! - **Intersection**: a conservative triangle–box overlap test
//!
//! # Example
//!
//! ```
//! use mesh_core::Mesh;
//! use nalgebra::{Point3, Vector3};
//!
//! let mut mesh = Mesh::new();
//! mesh.push_box(Point3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0));
//!
//! let bounds = mesh.bounds().unwrap();
//! assert_eq!(bounds.mins, Point3::new(-1.0, -1.0, -1.0));
//! assert_eq!(bounds.maxs, Point3::new(1.0, 1.0, 1.0));
//! ```

mod aabb;
mod intersect;
mod types;

pub use aabb::Aabb;
pub use intersect::triangle_intersects_aabb;
pub use types::{Mesh, Triangle};

//! Error types for voxel operations.

use thiserror::Error;

/// Result type alias for voxel operations.
pub type VoxelResult<T> = Result<T, VoxelError>;

/// Errors that can occur during voxel grid operations.
#[derive(Debug, Error)]
pub enum VoxelError {
    /// Two grids were combined or compared without matching shapes.
    #[error("grid dimensions differ: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: [usize; 3],
        right: [usize; 3],
    },

    /// A grid was created or resized with a zero dimension component.
    #[error("invalid grid dimensions {dims:?}: every component must be positive")]
    InvalidDimensions { dims: [usize; 3] },

    /// The requested voxel edge length cannot produce a grid.
    #[error("invalid voxel edge length {size}: must be positive and finite")]
    InvalidCellSize { size: f64 },
}

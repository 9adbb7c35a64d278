//! Mesh voxelization.
//!
//! Rasterizes a triangle mesh into a [`BinaryGrid3`] over a world-space
//! bounding box. Each triangle is transformed into grid space, where every
//! voxel is a unit cube, and tested against the voxels its bounds cover.
//! The union of those bounds is tracked so an optional solidification pass
//! can restrict its search to the part of the grid the mesh reached.

use mesh_core::{triangle_intersects_aabb, Aabb, Mesh, Triangle};
use nalgebra::{Point3, Vector3};
use tracing::{debug, info};

use crate::error::{VoxelError, VoxelResult};
use crate::grid::BinaryGrid3;
use crate::region::GridRegion;

/// Expansion applied to a triangle's grid-space bounds before snapping to
/// cells, so perfectly axis-aligned triangles still span a voxel layer.
const TRIANGLE_BOUNDS_EPS: f64 = 1e-6;

/// How the output grid resolution is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridResolution {
    /// Explicit voxel counts along each axis.
    Dims(Vector3<usize>),

    /// Target edge length of one voxel in world units. Counts are derived
    /// by dividing the bounds extents and rounding up.
    CellSize(f64),
}

/// Parameters for mesh voxelization.
#[derive(Debug, Clone)]
pub struct VoxelizeParams {
    /// Output grid resolution.
    pub resolution: GridResolution,

    /// Whether to fill the enclosed interior after rasterizing the shell.
    pub solid: bool,
}

impl Default for VoxelizeParams {
    fn default() -> Self {
        Self {
            resolution: GridResolution::CellSize(1.0),
            solid: false,
        }
    }
}

impl VoxelizeParams {
    /// Create parameters with explicit grid dimensions.
    pub fn dims(dims: Vector3<usize>) -> Self {
        Self {
            resolution: GridResolution::Dims(dims),
            ..Default::default()
        }
    }

    /// Create parameters with a target voxel edge length.
    pub fn cell_size(size: f64) -> Self {
        Self {
            resolution: GridResolution::CellSize(size),
            ..Default::default()
        }
    }

    /// Request interior filling.
    pub fn solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }
}

/// Statistics reported by a voxelization run.
#[derive(Debug, Clone)]
pub struct VoxelizeStats {
    /// Resolved grid dimensions.
    pub dims: Vector3<usize>,

    /// Cells set by triangle rasterization.
    pub surface_cells: usize,

    /// Cells added by interior filling (zero for hollow runs).
    pub interior_cells: usize,

    /// Triangles rasterized against at least one candidate cell.
    pub triangles_rasterized: usize,

    /// Triangles skipped because their bounds fell outside the grid.
    pub triangles_skipped: usize,

    /// Union of the grid-space cell bounds of all rasterized triangles.
    pub touched: Option<GridRegion>,
}

/// Voxelize a mesh into a binary occupancy grid over `bounds`.
///
/// Returns the grid together with rasterization statistics. Triangles
/// wholly outside `bounds` contribute nothing; a mesh with zero triangles
/// yields an all-clear grid of the requested dimensions. With
/// `params.solid`, enclosed interior pockets of the rasterized shell are
/// filled afterwards.
pub fn voxelize(
    mesh: &Mesh,
    bounds: &Aabb,
    params: &VoxelizeParams,
) -> VoxelResult<(BinaryGrid3, VoxelizeStats)> {
    let extents = bounds.extents();
    let dims = resolve_dims(&params.resolution, extents)?;

    let mut grid = BinaryGrid3::new();
    let mut stats = VoxelizeStats {
        dims,
        surface_cells: 0,
        interior_cells: 0,
        triangles_rasterized: 0,
        triangles_skipped: 0,
        touched: None,
    };

    if dims.x == 0 || dims.y == 0 || dims.z == 0 {
        debug!("degenerate bounds resolved to an empty grid");
        return Ok((grid, stats));
    }
    grid.resize(dims)?;

    info!(
        "voxelizing {} triangles into {}x{}x{} grid",
        mesh.face_count(),
        dims.x,
        dims.y,
        dims.z
    );

    // Grid space puts one voxel per unit cube: translate by -mins, then
    // scale each axis by dims / extent.
    let dims_f = Vector3::new(dims.x as f64, dims.y as f64, dims.z as f64);
    let scale = Vector3::new(
        dims_f.x / extents.x,
        dims_f.y / extents.y,
        dims_f.z / extents.z,
    );
    let to_grid = |p: Point3<f64>| Point3::from((p - bounds.mins).component_mul(&scale));
    let grid_box = Aabb::new(Point3::origin(), Point3::from(dims_f));

    let mut touched: Option<GridRegion> = None;

    for triangle in mesh.triangles() {
        let triangle = Triangle::new(
            to_grid(triangle.v0),
            to_grid(triangle.v1),
            to_grid(triangle.v2),
        );

        let tri_box = triangle.aabb();
        if !tri_box.intersects(&grid_box) {
            stats.triangles_skipped += 1;
            continue;
        }

        let cells = match snap_to_cells(&tri_box, dims) {
            Some(cells) => cells,
            None => {
                stats.triangles_skipped += 1;
                continue;
            }
        };

        rasterize_triangle(&mut grid, &triangle, &cells);
        touched = Some(match touched {
            Some(region) => region.merged(&cells),
            None => cells,
        });
        stats.triangles_rasterized += 1;
    }

    stats.surface_cells = grid.num_filled_cells();
    stats.touched = touched;

    if params.solid {
        if let Some(region) = touched {
            // Grow the search space so exterior air always has a path to
            // its boundary.
            let region = region.expanded(1, dims);
            debug!("filling interior over {} candidate cells", region.cell_count());
            grid.fill_interior(&region);
            stats.interior_cells = grid.num_filled_cells() - stats.surface_cells;
        }
    }

    info!(
        "voxelization complete: {} surface + {} interior cells",
        stats.surface_cells, stats.interior_cells
    );

    Ok((grid, stats))
}

fn resolve_dims(
    resolution: &GridResolution,
    extents: Vector3<f64>,
) -> VoxelResult<Vector3<usize>> {
    match *resolution {
        GridResolution::Dims(dims) => {
            if dims.x == 0 || dims.y == 0 || dims.z == 0 {
                return Err(VoxelError::InvalidDimensions { dims: dims.into() });
            }
            Ok(dims)
        }
        GridResolution::CellSize(size) => {
            if !size.is_finite() || size <= 0.0 {
                return Err(VoxelError::InvalidCellSize { size });
            }
            Ok(Vector3::new(
                (extents.x / size).ceil().max(0.0) as usize,
                (extents.y / size).ceil().max(0.0) as usize,
                (extents.z / size).ceil().max(0.0) as usize,
            ))
        }
    }
}

/// Snap a grid-space box to the integer cell range it covers, expanded a
/// little so flat boxes keep at least one cell of thickness, and clamped
/// to the grid. Returns `None` if nothing remains after clamping.
fn snap_to_cells(tri_box: &Aabb, dims: Vector3<usize>) -> Option<GridRegion> {
    let expanded = tri_box.expanded(TRIANGLE_BOUNDS_EPS);
    let mut mins = Vector3::new(0usize, 0, 0);
    let mut maxs = Vector3::new(0usize, 0, 0);

    for i in 0..3 {
        let limit = dims[i] as f64;
        mins[i] = expanded.mins[i].floor().clamp(0.0, limit) as usize;
        maxs[i] = expanded.maxs[i].ceil().clamp(0.0, limit) as usize;
    }

    let region = GridRegion::new(mins, maxs);
    (!region.is_empty()).then_some(region)
}

/// Set every cell of `cells` whose unit voxel box intersects the triangle.
/// Cells that are already set are skipped; re-testing them could only
/// re-set them.
fn rasterize_triangle(grid: &mut BinaryGrid3, triangle: &Triangle, cells: &GridRegion) {
    for z in cells.mins.z..cells.maxs.z {
        for y in cells.mins.y..cells.maxs.y {
            for x in cells.mins.x..cells.maxs.x {
                if grid.is_set(x, y, z) {
                    continue;
                }
                let voxel = Aabb::from_half_extents(
                    Point3::new(x as f64 + 0.5, y as f64 + 0.5, z as f64 + 0.5),
                    Vector3::repeat(0.5),
                );
                if triangle_intersects_aabb(triangle, &voxel) {
                    grid.set(x, y, z);
                }
            }
        }
    }
}

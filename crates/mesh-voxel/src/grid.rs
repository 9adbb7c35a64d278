//! Dense bit-packed 3D boolean grid.

use mesh_core::{Aabb, Mesh};
use nalgebra::{Point3, Vector3};

use crate::error::{VoxelError, VoxelResult};

/// Bits per storage word.
const BITS_PER_WORD: usize = u32::BITS as usize;

/// Population count of one word (SWAR shift-mask-add ladder).
#[inline]
pub fn popcount(x: u32) -> u32 {
    let x = x - ((x >> 1) & 0x5555_5555);
    let x = (x & 0x3333_3333) + ((x >> 2) & 0x3333_3333);
    let x = (x + (x >> 4)) & 0x0f0f_0f0f;
    x.wrapping_mul(0x0101_0101) >> 24
}

/// A dense, bit-packed 3D boolean grid.
///
/// Cells are linearized x-fastest, z-slowest: cell `(x, y, z)` lives at bit
/// `z·ny·nx + y·nx + x` of an owned array of 32-bit words. The last word
/// may carry padding bits past the logical cell count; construction and
/// resizing zero all storage, and no operation raises a padding bit.
///
/// Coordinates must satisfy `x < dims.x`, `y < dims.y`, `z < dims.z`;
/// the accessors assert this in debug builds.
#[derive(Debug, PartialEq, Eq)]
pub struct BinaryGrid3 {
    dims: Vector3<usize>,
    words: Vec<u32>,
}

impl BinaryGrid3 {
    /// Create an empty grid with zero dimensions and no storage.
    pub fn new() -> Self {
        Self {
            dims: Vector3::new(0, 0, 0),
            words: Vec::new(),
        }
    }

    /// Create a zeroed grid with the given dimensions.
    pub fn with_dims(dims: Vector3<usize>) -> VoxelResult<Self> {
        let mut grid = Self::new();
        grid.resize(dims)?;
        Ok(grid)
    }

    /// Grid dimensions as cell counts along x, y, z.
    #[inline]
    pub fn dims(&self) -> Vector3<usize> {
        self.dims
    }

    /// Number of logical cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.dims.x * self.dims.y * self.dims.z
    }

    /// Number of storage words.
    #[inline]
    pub fn num_words(&self) -> usize {
        (self.num_cells() + BITS_PER_WORD - 1) / BITS_PER_WORD
    }

    /// Number of cells including the padding bits of the last word.
    #[inline]
    pub fn num_padded_cells(&self) -> usize {
        self.num_words() * BITS_PER_WORD
    }

    /// Resize the grid, zeroing all storage.
    ///
    /// A resize to the current dimensions is a no-op and never discards
    /// contents. Any zero dimension component is rejected.
    pub fn resize(&mut self, dims: Vector3<usize>) -> VoxelResult<()> {
        if dims.x == 0 || dims.y == 0 || dims.z == 0 {
            return Err(VoxelError::InvalidDimensions { dims: dims.into() });
        }
        if self.dims == dims && !self.words.is_empty() {
            return Ok(());
        }
        self.dims = dims;
        self.words.clear();
        self.words.resize(self.num_words(), 0);
        Ok(())
    }

    #[inline]
    fn bit_address(&self, x: usize, y: usize, z: usize) -> (usize, u32) {
        debug_assert!(
            x < self.dims.x && y < self.dims.y && z < self.dims.z,
            "cell ({}, {}, {}) out of range for grid {:?}",
            x,
            y,
            z,
            self.dims
        );
        let lin = z * self.dims.y * self.dims.x + y * self.dims.x + x;
        (lin / BITS_PER_WORD, (lin % BITS_PER_WORD) as u32)
    }

    /// Whether the cell at `(x, y, z)` is set.
    #[inline]
    pub fn is_set(&self, x: usize, y: usize, z: usize) -> bool {
        let (word, bit) = self.bit_address(x, y, z);
        self.words[word] & (1 << bit) != 0
    }

    /// Set the cell at `(x, y, z)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize) {
        let (word, bit) = self.bit_address(x, y, z);
        self.words[word] |= 1 << bit;
    }

    /// Clear the cell at `(x, y, z)`.
    #[inline]
    pub fn clear(&mut self, x: usize, y: usize, z: usize) {
        let (word, bit) = self.bit_address(x, y, z);
        self.words[word] &= !(1 << bit);
    }

    /// Flip the cell at `(x, y, z)`.
    #[inline]
    pub fn toggle(&mut self, x: usize, y: usize, z: usize) {
        let (word, bit) = self.bit_address(x, y, z);
        self.words[word] ^= 1 << bit;
    }

    /// Clear every cell.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Count the set cells, excluding padding bits.
    pub fn num_filled_cells(&self) -> usize {
        let mut num = 0;
        for z in 0..self.dims.z {
            for y in 0..self.dims.y {
                for x in 0..self.dims.x {
                    if self.is_set(x, y, z) {
                        num += 1;
                    }
                }
            }
        }
        num
    }

    fn check_same_dims(&self, other: &BinaryGrid3) -> VoxelResult<()> {
        if self.dims != other.dims {
            return Err(VoxelError::DimensionMismatch {
                left: self.dims.into(),
                right: other.dims.into(),
            });
        }
        Ok(())
    }

    /// OR every cell of `other` into this grid.
    /// Fails if the dimensions differ.
    pub fn union_in_place(&mut self, other: &BinaryGrid3) -> VoxelResult<()> {
        self.check_same_dims(other)?;
        self.or_words(other);
        Ok(())
    }

    /// The cell-wise union of the two grids.
    /// Fails if the dimensions differ.
    pub fn union(&self, other: &BinaryGrid3) -> VoxelResult<BinaryGrid3> {
        let mut out = self.clone();
        out.union_in_place(other)?;
        Ok(out)
    }

    /// Word-wise OR without the dimension check, for callers that hold
    /// grids of equal dimensions by construction.
    pub(crate) fn or_words(&mut self, other: &BinaryGrid3) {
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word |= other_word;
        }
    }

    /// Count the cells on which both grids agree (both set or both clear),
    /// excluding padding bits. Fails if the dimensions differ.
    pub fn num_cells_equal(&self, other: &BinaryGrid3) -> VoxelResult<usize> {
        self.check_same_dims(other)?;
        let mut num = 0;
        for z in 0..self.dims.z {
            for y in 0..self.dims.y {
                for x in 0..self.dims.x {
                    if self.is_set(x, y, z) == other.is_set(x, y, z) {
                        num += 1;
                    }
                }
            }
        }
        Ok(num)
    }

    /// Fraction of logical cells on which both grids agree, in `[0, 1]`.
    pub fn percent_cells_equal(&self, other: &BinaryGrid3) -> VoxelResult<f64> {
        let num = self.num_cells_equal(other)?;
        if self.num_cells() == 0 {
            return Ok(1.0);
        }
        Ok(num as f64 / self.num_cells() as f64)
    }

    /// Word-parallel variant of [`num_cells_equal`](Self::num_cells_equal)
    /// that also credits matching padding bits, so it can overcount by up
    /// to one word's worth of cells.
    pub fn num_cells_equal_padded(&self, other: &BinaryGrid3) -> VoxelResult<usize> {
        self.check_same_dims(other)?;
        let mut num = 0;
        for (a, b) in self.words.iter().zip(&other.words) {
            num += popcount(!(a ^ b)) as usize;
        }
        Ok(num)
    }

    /// Fraction of padded cells on which both grids agree, in `[0, 1]`.
    pub fn percent_cells_equal_padded(&self, other: &BinaryGrid3) -> VoxelResult<f64> {
        let num = self.num_cells_equal_padded(other)?;
        if self.num_padded_cells() == 0 {
            return Ok(1.0);
        }
        Ok(num as f64 / self.num_padded_cells() as f64)
    }

    /// Reconstruct the grid as a box mesh: one axis-aligned box per set
    /// cell, with cell centers mapped linearly into `bounds` and box sizes
    /// of one grid cell. Intended for inspection and debugging.
    pub fn to_mesh(&self, bounds: &Aabb) -> Mesh {
        fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
            (1.0 - t) * lo + t * hi
        }

        if self.num_cells() == 0 {
            return Mesh::new();
        }
        let filled = self.num_filled_cells();
        let mut mesh = Mesh::with_capacity(filled * 8, filled * 12);

        let extents = bounds.extents();
        let cell_size = Vector3::new(
            extents.x / self.dims.x as f64,
            extents.y / self.dims.y as f64,
            extents.z / self.dims.z as f64,
        );

        for z in 0..self.dims.z {
            let cz = lerp(
                bounds.mins.z,
                bounds.maxs.z,
                (z as f64 + 0.5) / self.dims.z as f64,
            );
            for y in 0..self.dims.y {
                let cy = lerp(
                    bounds.mins.y,
                    bounds.maxs.y,
                    (y as f64 + 0.5) / self.dims.y as f64,
                );
                for x in 0..self.dims.x {
                    let cx = lerp(
                        bounds.mins.x,
                        bounds.maxs.x,
                        (x as f64 + 0.5) / self.dims.x as f64,
                    );
                    if self.is_set(x, y, z) {
                        mesh.push_box(Point3::new(cx, cy, cz), cell_size);
                    }
                }
            }
        }

        mesh
    }
}

impl Clone for BinaryGrid3 {
    fn clone(&self) -> Self {
        Self {
            dims: self.dims,
            words: self.words.clone(),
        }
    }

    /// Deep-copy `source` into `self`, reusing the existing allocation.
    fn clone_from(&mut self, source: &Self) {
        self.dims = source.dims;
        self.words.clear();
        self.words.extend_from_slice(&source.words);
    }
}

impl Default for BinaryGrid3 {
    fn default() -> Self {
        Self::new()
    }
}

//! Interior filling of hollow voxel shells.

use nalgebra::Vector3;
use tracing::debug;

use crate::grid::BinaryGrid3;
use crate::region::GridRegion;

impl BinaryGrid3 {
    /// Fill every 6-connected empty pocket of `region` that is fully
    /// enclosed by set cells.
    ///
    /// Runs a flood fill from each unvisited cell of the region, scanning
    /// seeds in z-major order. A component that reaches a face of the
    /// region leaks to the exterior and is left empty; every other
    /// component is unioned into the grid. The region must cover at least
    /// one empty cell of margin around the shell, or exterior space can be
    /// misread as enclosed.
    ///
    /// The region is clipped to the grid first; an empty region is a no-op.
    pub fn fill_interior(&mut self, region: &GridRegion) {
        let region = region.clamped(self.dims());
        if region.is_empty() {
            return;
        }

        // Cells that are already filled count as visited so the search
        // never enters shell material.
        let mut visited = self.clone();
        let mut frontier = self.clone();
        frontier.clear_all();

        let mut fringe: Vec<Vector3<usize>> = Vec::new();
        let mut components = 0usize;
        let mut enclosed = 0usize;

        for z in region.mins.z..region.maxs.z {
            for y in region.mins.y..region.maxs.y {
                for x in region.mins.x..region.maxs.x {
                    if visited.is_set(x, y, z) {
                        continue;
                    }
                    components += 1;

                    let mut is_outside = false;
                    fringe.push(Vector3::new(x, y, z));

                    while let Some(v) = fringe.pop() {
                        frontier.set(v.x, v.y, v.z);

                        if v.x == region.mins.x
                            || v.x == region.maxs.x - 1
                            || v.y == region.mins.y
                            || v.y == region.maxs.y - 1
                            || v.z == region.mins.z
                            || v.z == region.maxs.z - 1
                        {
                            // Reached the edge of the search space without
                            // being blocked by shell material.
                            is_outside = true;
                        } else {
                            visited.set(v.x, v.y, v.z);
                            let neighbors = [
                                Vector3::new(v.x - 1, v.y, v.z),
                                Vector3::new(v.x + 1, v.y, v.z),
                                Vector3::new(v.x, v.y - 1, v.z),
                                Vector3::new(v.x, v.y + 1, v.z),
                                Vector3::new(v.x, v.y, v.z - 1),
                                Vector3::new(v.x, v.y, v.z + 1),
                            ];
                            for n in neighbors {
                                if !visited.is_set(n.x, n.y, n.z) {
                                    fringe.push(n);
                                }
                            }
                        }
                    }

                    if !is_outside {
                        self.or_words(&frontier);
                        enclosed += 1;
                    }
                    frontier.clear_all();
                }
            }
        }

        debug!(
            "interior fill: {} of {} empty components enclosed",
            enclosed, components
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: usize, y: usize, z: usize) -> Vector3<usize> {
        Vector3::new(x, y, z)
    }

    /// An n-cell cube shell: every cell with a coordinate on the outer
    /// layer is set, the core is empty.
    fn cube_shell(n: usize) -> BinaryGrid3 {
        let mut grid = BinaryGrid3::with_dims(v(n, n, n)).unwrap();
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    if x == 0 || x == n - 1 || y == 0 || y == n - 1 || z == 0 || z == n - 1 {
                        grid.set(x, y, z);
                    }
                }
            }
        }
        grid
    }

    #[test]
    fn test_fills_enclosed_interior() {
        let mut grid = cube_shell(5);
        assert!(!grid.is_set(2, 2, 2));

        grid.fill_interior(&GridRegion::new(v(0, 0, 0), v(5, 5, 5)));

        assert!(grid.is_set(2, 2, 2));
        assert_eq!(grid.num_filled_cells(), 125);
    }

    #[test]
    fn test_open_shell_is_not_filled() {
        // Puncture one face: the interior now leaks to the region edge.
        let mut grid = cube_shell(5);
        grid.clear(2, 2, 4);

        grid.fill_interior(&GridRegion::new(v(0, 0, 0), v(5, 5, 5)));

        assert!(!grid.is_set(2, 2, 2));
        assert!(!grid.is_set(2, 2, 4));
        assert_eq!(grid.num_filled_cells(), 97);
    }

    #[test]
    fn test_degenerate_region_is_noop() {
        let mut grid = cube_shell(5);
        let before = grid.clone();

        grid.fill_interior(&GridRegion::new(v(2, 2, 2), v(2, 2, 2)));

        assert_eq!(grid, before);
    }

    #[test]
    fn test_region_clipped_to_grid() {
        let mut grid = cube_shell(5);

        grid.fill_interior(&GridRegion::new(v(0, 0, 0), v(100, 100, 100)));

        assert!(grid.is_set(2, 2, 2));
        assert_eq!(grid.num_filled_cells(), 125);
    }

    #[test]
    fn test_empty_grid_is_noop() {
        let mut grid = BinaryGrid3::new();
        grid.fill_interior(&GridRegion::new(v(0, 0, 0), v(10, 10, 10)));
        assert_eq!(grid.num_cells(), 0);
    }

    #[test]
    fn test_cells_outside_region_untouched() {
        // Shell in one corner of a larger grid; restrict the fill to a
        // region around it with a margin of empty cells.
        let mut grid = BinaryGrid3::with_dims(v(8, 8, 8)).unwrap();
        for z in 1..6 {
            for y in 1..6 {
                for x in 1..6 {
                    if x == 1 || x == 5 || y == 1 || y == 5 || z == 1 || z == 5 {
                        grid.set(x, y, z);
                    }
                }
            }
        }

        grid.fill_interior(&GridRegion::new(v(0, 0, 0), v(7, 7, 7)));

        // Enclosed core is filled.
        assert!(grid.is_set(3, 3, 3));
        // Air between the shell and the region edge stays empty.
        assert!(!grid.is_set(0, 0, 0));
        assert!(!grid.is_set(6, 6, 6));
        // Air past the region was never scanned.
        assert!(!grid.is_set(7, 7, 7));
    }

    #[test]
    fn test_two_pockets_one_open() {
        // Two 1-cell pockets along x; a tunnel connects the second one to
        // the region edge, so only the first is enclosed.
        let mut grid = BinaryGrid3::with_dims(v(9, 3, 3)).unwrap();
        for z in 0..3 {
            for y in 0..3 {
                for x in 0..7 {
                    grid.set(x, y, z);
                }
            }
        }
        grid.clear(1, 1, 1); // enclosed pocket
        grid.clear(5, 1, 1); // pocket with a tunnel
        grid.clear(6, 1, 1); // tunnel reaching open air at x = 7..9

        grid.fill_interior(&GridRegion::new(v(0, 0, 0), v(9, 3, 3)));

        assert!(grid.is_set(1, 1, 1));
        assert!(!grid.is_set(5, 1, 1));
        assert!(!grid.is_set(6, 1, 1));
        assert!(!grid.is_set(8, 1, 1));
    }
}

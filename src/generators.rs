//! Maze generation by randomised Kruskal-style spanning tree construction.

use rand::{Rng, SeedableRng, StdRng};

use crate::cells::{GridCoordinate, WallSide};
use crate::disjoint_set::DisjointSet;
use crate::errors::*;
use crate::squaregrid::SquareGrid;

/// The full configuration of one generation run.
///
/// A `random_seed` makes generation deterministic and reproducible; without
/// one the seed comes from the system entropy source.
#[derive(Debug, Copy, Clone)]
pub struct GeneratorOptions {
    pub dimension_size: usize,
    pub random_seed: Option<usize>,
}

/// Generates a perfect maze: fully connected, no cycles, exactly one path
/// between any two cells, with an entrance and an exit on opposite boundary
/// edges.
///
/// The grid dimension must be at least 1 or an `InvalidGridSize` error is
/// returned before anything is allocated.
pub fn generate(options: &GeneratorOptions) -> Result<SquareGrid> {
    let mut grid = SquareGrid::new(options.dimension_size)?;

    let seed = options.random_seed.unwrap_or_else(rand::random::<usize>);
    let mut rng: StdRng = SeedableRng::from_seed(&[seed][..]);

    randomised_kruskal(&mut grid, &mut rng);
    mark_boundary_openings(&mut grid);

    Ok(grid)
}

/// Apply the randomised Kruskal maze generation algorithm to a grid.
///
/// Rather than shuffling an explicit edge list it keeps sampling a uniformly
/// random cell and side until the grid is one connected component. Samples
/// whose neighbour falls outside the grid, or whose two cells are already
/// connected (the edge would close a cycle), are discarded and resampled.
/// Every accepted sample unions the two cells and knocks down the shared
/// wall, so the carved passages form a uniform-adjacency spanning tree and
/// the result is a perfect maze.
///
/// Termination is almost sure, coupon-collector-like in the number of
/// samples; no iteration cap is imposed here.
pub fn randomised_kruskal<R: Rng>(grid: &mut SquareGrid, rng: &mut R) {
    let mut components = DisjointSet::new(grid.dimension());

    while !components.is_unified() {
        let coord = grid.random_cell(rng);
        let side = WallSide::random(rng);

        let neighbour = match grid.neighbour_at_direction(coord, side) {
            Some(neighbour) => neighbour,
            None => continue,
        };
        if components.find(coord) == components.find(neighbour) {
            continue;
        }

        components.union(coord, neighbour);
        grid.carve_passage(coord, side);
    }
}

/// Marks the two fixed entrance/exit cells: the bottom cell of the west
/// boundary and the top cell of the east boundary. On a 1x1 grid the two
/// coordinates coincide and the single cell is entrance and exit at once.
fn mark_boundary_openings(grid: &mut SquareGrid) {
    let last = (grid.dimension() - 1) as u32;
    grid.mark_open(GridCoordinate::new(0, last));
    grid.mark_open(GridCoordinate::new(last, 0));
}

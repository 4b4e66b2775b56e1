//! Union-find over the fixed universe of grid coordinates.
//!
//! Tracks which cells of the maze are already connected by carved passages.
//! The generator rejects any sampled edge whose two cells share a root, which
//! is what guarantees the finished maze is a perfect maze (a spanning tree).

use bit_set::BitSet;
use itertools::Itertools;

use crate::cells::GridCoordinate;
use crate::utils::{fnv_hashmap, FnvHashMap};

/// Partitions all `dimension_size * dimension_size` coordinates into
/// connectivity components. The universe is fixed at construction, so lookups
/// never fail.
#[derive(Debug)]
pub struct DisjointSet {
    parent: FnvHashMap<GridCoordinate, GridCoordinate>,
    rank: FnvHashMap<GridCoordinate, u32>,
    dimension_size: usize,
}

impl DisjointSet {
    /// Creates one singleton component per grid coordinate.
    pub fn new(dimension_size: usize) -> DisjointSet {
        let cells_count = dimension_size * dimension_size;
        let mut parent = fnv_hashmap(cells_count);
        let mut rank = fnv_hashmap(cells_count);

        for (x, y) in (0..dimension_size).cartesian_product(0..dimension_size) {
            let coord = GridCoordinate::new(x as u32, y as u32);
            parent.insert(coord, coord);
            rank.insert(coord, 0);
        }

        DisjointSet {
            parent: parent,
            rank: rank,
            dimension_size: dimension_size,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Follows parent links until the self-looping root is reached, then
    /// repoints every node on the walked chain directly at that root.
    ///
    /// Iterative rather than recursive so a long unbalanced parent chain
    /// cannot blow the stack. Amortised near O(1) thanks to the compression.
    pub fn find(&mut self, coord: GridCoordinate) -> GridCoordinate {
        let mut root = coord;
        while self.parent[&root] != root {
            root = self.parent[&root];
        }

        let mut current = coord;
        while self.parent[&current] != current {
            let next = self.parent[&current];
            self.parent.insert(current, root);
            current = next;
        }

        root
    }

    /// Merges the components of `a` and `b`, attaching the lower rank root
    /// under the higher. A no-op when they already share a root - the caller
    /// treats that as "this edge would create a cycle".
    pub fn union(&mut self, a: GridCoordinate, b: GridCoordinate) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }

        let rank_a = self.rank[&root_a];
        let rank_b = self.rank[&root_b];
        if rank_a > rank_b {
            self.parent.insert(root_b, root_a);
        } else if rank_a < rank_b {
            self.parent.insert(root_a, root_b);
        } else {
            // Tie: the second root becomes a child of the first.
            self.parent.insert(root_b, root_a);
            self.rank.insert(root_a, rank_a + 1);
        }
    }

    /// The number of distinct components, counted as the cardinality of the
    /// root set over every coordinate in the universe.
    pub fn component_count(&mut self) -> usize {
        let dimension_size = self.dimension_size;
        let mut roots = BitSet::with_capacity(dimension_size * dimension_size);

        for (x, y) in (0..dimension_size).cartesian_product(0..dimension_size) {
            let root = self.find(GridCoordinate::new(x as u32, y as u32));
            roots.insert(root.y as usize * dimension_size + root.x as usize);
        }

        roots.len()
    }

    pub fn is_unified(&mut self) -> bool {
        self.component_count() == 1
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::utils::fnv_hashset;

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn new_set_is_all_singletons() {
        let mut set = DisjointSet::new(4);
        assert_eq!(set.len(), 16);
        assert_eq!(set.component_count(), 16);
        assert!(!set.is_unified());
        for x in 0..4 {
            for y in 0..4 {
                assert_eq!(set.find(gc(x, y)), gc(x, y));
            }
        }
    }

    #[test]
    fn find_is_idempotent() {
        let mut set = DisjointSet::new(3);
        set.union(gc(0, 0), gc(1, 0));
        set.union(gc(1, 0), gc(2, 2));

        let root = set.find(gc(2, 2));
        for _ in 0..10 {
            assert_eq!(set.find(gc(2, 2)), root);
            assert_eq!(set.find(gc(0, 0)), root);
            assert_eq!(set.find(gc(1, 0)), root);
        }
        assert_eq!(set.component_count(), 9 - 2);
    }

    #[test]
    fn union_decreases_component_count_by_exactly_one() {
        let mut set = DisjointSet::new(2);
        assert_eq!(set.component_count(), 4);

        set.union(gc(0, 0), gc(1, 0));
        assert_eq!(set.component_count(), 3);

        // Same component again: a no-op, never a further decrease.
        set.union(gc(0, 0), gc(1, 0));
        set.union(gc(1, 0), gc(0, 0));
        assert_eq!(set.component_count(), 3);

        set.union(gc(0, 1), gc(1, 1));
        assert_eq!(set.component_count(), 2);

        set.union(gc(0, 0), gc(1, 1));
        assert_eq!(set.component_count(), 1);
        assert!(set.is_unified());
    }

    #[test]
    fn component_count_after_k_successful_unions() {
        let dimension_size = 4;
        let mut set = DisjointSet::new(dimension_size);
        let cells_count = dimension_size * dimension_size;

        let linear = |i: usize| gc((i % dimension_size) as u32, (i / dimension_size) as u32);
        for k in 1..cells_count {
            set.union(linear(k - 1), linear(k));
            assert_eq!(set.component_count(), cells_count - k);
        }
        assert!(set.is_unified());
    }

    #[test]
    fn rank_tie_attaches_second_root_under_first() {
        let mut set = DisjointSet::new(2);
        set.union(gc(0, 0), gc(1, 0));
        assert_eq!(set.find(gc(1, 0)), gc(0, 0));
    }

    #[test]
    fn unified_set_has_a_single_shared_root() {
        let mut set = DisjointSet::new(3);
        let linear = |i: usize| gc((i % 3) as u32, (i / 3) as u32);
        for k in 1..9 {
            set.union(linear(0), linear(k));
        }

        let mut roots = fnv_hashset(9);
        for i in 0..9 {
            roots.insert(set.find(linear(i)));
        }
        assert_eq!(roots.len(), 1);
    }
}

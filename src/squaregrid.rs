use rand::Rng;
use smallvec::SmallVec;
use std::fmt;

use crate::cells::{GridCoordinate, MazeCell, WallSide};
use crate::errors::*;

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// A `dimension_size` x `dimension_size` grid of maze cells, stored row major.
///
/// The grid starts with every wall present. Walls only ever come down through
/// `carve_passage`, which clears the facing flags on both sides at once, so
/// the mirror invariant (my right wall down ⇔ my east neighbour's left wall
/// down) holds at all times.
#[derive(Debug)]
pub struct SquareGrid {
    dimension_size: usize,
    cells: Vec<MazeCell>,
}

impl SquareGrid {
    pub fn new(dimension_size: usize) -> Result<SquareGrid> {
        if dimension_size < 1 {
            return Err(ErrorKind::InvalidGridSize(dimension_size).into());
        }

        let cells_count = dimension_size * dimension_size;
        let cells = (0..cells_count)
            .map(|index| MazeCell::new(index_to_grid_coordinate(dimension_size, index)))
            .collect();

        Ok(SquareGrid {
            dimension_size: dimension_size,
            cells: cells,
        })
    }

    pub fn size(&self) -> usize {
        self.dimension_size * self.dimension_size
    }

    pub fn dimension(&self) -> usize {
        self.dimension_size
    }

    /// Access one cell of the grid.
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn cell(&self, coord: GridCoordinate) -> &MazeCell {
        let index = self.cell_index(coord);
        &self.cells[index]
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> GridCoordinate {
        let index = rng.gen::<usize>() % self.size();
        index_to_grid_coordinate(self.dimension_size, index)
    }

    /// The adjacent coordinate on the given side, or None when it would fall
    /// outside the grid on either axis.
    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  side: WallSide)
                                  -> Option<GridCoordinate> {
        match side.offset(coord) {
            Some(neighbour) if self.is_valid_coordinate(neighbour) => Some(neighbour),
            _ => None,
        }
    }

    /// Cells adjacent to a particular cell, whether or not a passage links them.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        WallSide::ALL
            .iter()
            .filter_map(|&side| self.neighbour_at_direction(coord, side))
            .collect()
    }

    /// Clears the wall between a cell and its neighbour on the given side,
    /// on both cells at once. The only place wall state mutates.
    ///
    /// A no-op when there is no neighbour on that side - boundary walls are
    /// never carved.
    pub fn carve_passage(&mut self, coord: GridCoordinate, side: WallSide) {
        if let Some(neighbour) = self.neighbour_at_direction(coord, side) {
            let cell_index = self.cell_index(coord);
            let neighbour_index = self.cell_index(neighbour);
            self.cells[cell_index].walls[side as usize] = false;
            self.cells[neighbour_index].walls[side.opposite() as usize] = false;
        }
    }

    /// Is the wall on the given side of the cell down?
    pub fn is_passage_open(&self, coord: GridCoordinate, side: WallSide) -> bool {
        !self.cell(coord).has_wall(side)
    }

    /// Flags a boundary cell as a maze entrance/exit. The wall flags stay
    /// untouched - renderers consult `opening_side` to omit the outer wall.
    pub fn mark_open(&mut self, coord: GridCoordinate) {
        let index = self.cell_index(coord);
        self.cells[index].is_open = true;
    }

    /// The outer boundary side a renderer should leave unwalled for an open
    /// cell. None for cells not marked open (or, defensively, an open cell
    /// that does not sit on the boundary).
    pub fn opening_side(&self, coord: GridCoordinate) -> Option<WallSide> {
        if !self.cell(coord).is_open {
            return None;
        }

        let last = (self.dimension_size - 1) as u32;
        if coord.x == 0 {
            Some(WallSide::Left)
        } else if coord.x == last {
            Some(WallSide::Right)
        } else if coord.y == 0 {
            Some(WallSide::Top)
        } else if coord.y == last {
            Some(WallSide::Bottom)
        } else {
            None
        }
    }

    /// The number of carved passages. Each passage clears two mirrored wall
    /// flags, hence the halving.
    pub fn passages_count(&self) -> usize {
        let cleared_flags: usize = self.cells
            .iter()
            .map(|cell| cell.walls.iter().filter(|&&wall| !wall).count())
            .sum();
        cleared_flags / 2
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            dimension_size: self.dimension_size,
            cells_count: self.size(),
        }
    }

    fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        let dimension_size = self.dimension_size as u32;
        coord.x < dimension_size && coord.y < dimension_size
    }

    fn cell_index(&self, coord: GridCoordinate) -> usize {
        assert!(self.is_valid_coordinate(coord),
                "coordinate {:?} outside {1}x{1} grid",
                coord,
                self.dimension_size);
        coord.y as usize * self.dimension_size + coord.x as usize
    }
}

impl fmt::Display for SquareGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let columns_count = self.dimension_size;
        let rows_count = columns_count;

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        for index in 0..columns_count {
            let coord = GridCoordinate::new(index as u32, 0);
            output.push_str(WALL_LR_3);
            let is_east_open = self.is_passage_open(coord, WallSide::Right);
            if is_east_open {
                output.push_str(WALL_LR);
            } else {
                let is_last_cell = index == columns_count - 1;
                if is_last_cell {
                    output.push_str(WALL_LD);
                } else {
                    output.push_str(WALL_LRD);
                }
            }
        }
        output.push_str("\n");

        for row_index in 0..rows_count {

            let is_last_row = row_index == rows_count - 1;

            // Starts off by special case rendering the west most boundary of the row,
            // which is a gap when the row's first cell is a maze opening.
            // The top section of the cell is done by the previous row.
            let west_coord = GridCoordinate::new(0, row_index as u32);
            let mut row_middle_section_render =
                if self.opening_side(west_coord) == Some(WallSide::Left) {
                    String::from(" ")
                } else {
                    String::from(WALL_UD)
                };
            let mut row_bottom_section_render = String::from("");

            for column_index in 0..columns_count {

                let cell_coord = GridCoordinate::new(column_index as u32, row_index as u32);
                let is_first_column = column_index == 0;
                let is_last_column = column_index == columns_count - 1;
                let east_open = self.is_passage_open(cell_coord, WallSide::Right);
                let south_open = self.is_passage_open(cell_coord, WallSide::Bottom);

                // Each cell will simply use the southern wall of the cell above
                // it as its own northern wall, so we only need to worry about the cell’s
                // body (room space), its eastern boundary and its southern boundary
                // minus the south west corner.
                let body = "   "; // 3 spaces
                let east_boundary =
                    if is_last_column && self.opening_side(cell_coord) == Some(WallSide::Right) {
                        " "
                    } else if east_open {
                        " "
                    } else {
                        WALL_UD
                    };
                row_middle_section_render.push_str(body);
                row_middle_section_render.push_str(east_boundary);

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                let south_boundary = if south_open { "   " } else { WALL_LR_3 };
                row_bottom_section_render.push_str(south_boundary);

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => {
                        if east_open {
                            WALL_LR
                        } else {
                            WALL_LRU
                        }
                    }
                    (false, true) => {
                        if south_open {
                            WALL_UD
                        } else {
                            WALL_LUD
                        }
                    }
                    (false, false) => {
                        let access_se_from_east =
                            self.neighbour_at_direction(cell_coord, WallSide::Right)
                                .map_or(false, |c| self.is_passage_open(c, WallSide::Bottom));
                        let access_se_from_south =
                            self.neighbour_at_direction(cell_coord, WallSide::Bottom)
                                .map_or(false, |c| self.is_passage_open(c, WallSide::Right));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push_str("\n");
            output.push_str(&row_bottom_section_render);
            output.push_str("\n");
        }

        write!(f, "{}", output)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    dimension_size: usize,
    cells_count: usize,
}
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = index_to_grid_coordinate(self.dimension_size, self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

impl<'a> IntoIterator for &'a SquareGrid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn index_to_grid_coordinate(dimension_size: usize, one_dimensional_index: usize) -> GridCoordinate {
    let y = one_dimensional_index / dimension_size;
    let x = one_dimensional_index - (y * dimension_size);
    GridCoordinate {
        x: x as u32,
        y: y as u32,
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use itertools::Itertools; // a trait
    use rand::{SeedableRng, StdRng};

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn zero_size_grid_is_rejected() {
        let result = SquareGrid::new(0);
        match result {
            Err(Error(ErrorKind::InvalidGridSize(dimension_size), _)) => {
                assert_eq!(dimension_size, 0)
            }
            _ => panic!("expected an InvalidGridSize error"),
        }
    }

    #[test]
    fn grid_size() {
        let g = SquareGrid::new(10).unwrap();
        assert_eq!(g.size(), 100);
    }

    #[test]
    fn grid_dimension() {
        let g = SquareGrid::new(10).unwrap();
        assert_eq!(g.dimension(), 10);
    }

    #[test]
    fn neighbour_cells() {
        let g = SquareGrid::new(10).unwrap();

        let check_expected_neighbours = |coord, expected_neighbours: &[GridCoordinate]| {
            let found_neighbours: Vec<GridCoordinate> = g.neighbours(coord).iter().cloned().sorted();
            let expected_neighbours: Vec<GridCoordinate> =
                expected_neighbours.iter().cloned().sorted();
            assert_eq!(found_neighbours, expected_neighbours);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);
        check_expected_neighbours(gc(0, 8), &[gc(1, 8), gc(0, 7), gc(0, 9)]);
        check_expected_neighbours(gc(9, 8), &[gc(9, 7), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = SquareGrid::new(2).unwrap();
        let check_neighbour = |coord, side: WallSide, expected| {
            assert_eq!(g.neighbour_at_direction(coord, side), expected);
        };
        check_neighbour(gc(0, 0), WallSide::Top, None);
        check_neighbour(gc(0, 0), WallSide::Bottom, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), WallSide::Right, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), WallSide::Left, None);

        check_neighbour(gc(1, 1), WallSide::Top, Some(gc(1, 0)));
        check_neighbour(gc(1, 1), WallSide::Bottom, None);
        check_neighbour(gc(1, 1), WallSide::Right, None);
        check_neighbour(gc(1, 1), WallSide::Left, Some(gc(0, 1)));
    }

    #[test]
    fn cell_iter() {
        let g = SquareGrid::new(2).unwrap();
        assert_eq!(g.iter().collect::<Vec<GridCoordinate>>(),
                   &[gc(0, 0), gc(1, 0), gc(0, 1), gc(1, 1)]);
    }

    #[test]
    fn cell_identity_is_its_coordinate() {
        let g = SquareGrid::new(3).unwrap();
        for coord in g.iter() {
            assert_eq!(g.cell(coord).coord, coord);
        }
    }

    #[test]
    fn random_cell() {
        let g = SquareGrid::new(4).unwrap();
        let mut rng: StdRng = SeedableRng::from_seed(&[31usize][..]);
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(coord.x < 4);
            assert!(coord.y < 4);
        }
    }

    #[test]
    fn carving_a_passage_clears_mirrored_wall_flags() {
        let mut g = SquareGrid::new(4).unwrap();
        assert_eq!(g.passages_count(), 0);

        g.carve_passage(gc(0, 0), WallSide::Right);
        assert!(g.is_passage_open(gc(0, 0), WallSide::Right));
        assert!(g.is_passage_open(gc(1, 0), WallSide::Left));
        assert_eq!(g.passages_count(), 1);

        g.carve_passage(gc(1, 1), WallSide::Top);
        assert!(g.is_passage_open(gc(1, 1), WallSide::Top));
        assert!(g.is_passage_open(gc(1, 0), WallSide::Bottom));
        assert_eq!(g.passages_count(), 2);

        // Other walls of the touched cells are unaffected
        assert!(!g.is_passage_open(gc(0, 0), WallSide::Top));
        assert!(!g.is_passage_open(gc(0, 0), WallSide::Bottom));
        assert!(!g.is_passage_open(gc(0, 0), WallSide::Left));
        assert!(!g.is_passage_open(gc(1, 0), WallSide::Top));
        assert!(!g.is_passage_open(gc(1, 0), WallSide::Right));
    }

    #[test]
    fn carving_towards_the_boundary_is_a_noop() {
        let mut g = SquareGrid::new(2).unwrap();
        g.carve_passage(gc(0, 0), WallSide::Top);
        g.carve_passage(gc(0, 0), WallSide::Left);
        g.carve_passage(gc(1, 1), WallSide::Bottom);
        g.carve_passage(gc(1, 1), WallSide::Right);
        assert_eq!(g.passages_count(), 0);
        for coord in g.iter() {
            assert_eq!(g.cell(coord).walls, [true, true, true, true]);
        }
    }

    #[test]
    fn opening_side_picks_the_outer_boundary_wall() {
        let mut g = SquareGrid::new(3).unwrap();
        assert_eq!(g.opening_side(gc(0, 2)), None);

        g.mark_open(gc(0, 2));
        g.mark_open(gc(2, 0));
        g.mark_open(gc(1, 0));
        g.mark_open(gc(1, 2));
        assert_eq!(g.opening_side(gc(0, 2)), Some(WallSide::Left));
        assert_eq!(g.opening_side(gc(2, 0)), Some(WallSide::Right));
        assert_eq!(g.opening_side(gc(1, 0)), Some(WallSide::Top));
        assert_eq!(g.opening_side(gc(1, 2)), Some(WallSide::Bottom));

        // Interior cells never have an opening side
        assert_eq!(g.opening_side(gc(1, 1)), None);
    }

    #[test]
    fn display_walled_in_single_cell() {
        let g = SquareGrid::new(1).unwrap();
        assert_eq!(format!("{}", g), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn display_fully_carved_grid_is_one_room() {
        let mut g = SquareGrid::new(2).unwrap();
        g.carve_passage(gc(0, 0), WallSide::Right);
        g.carve_passage(gc(0, 0), WallSide::Bottom);
        g.carve_passage(gc(1, 0), WallSide::Bottom);
        g.carve_passage(gc(0, 1), WallSide::Right);

        let expected = "┌───────┐\n\
                        │       │\n\
                        │       │\n\
                        │       │\n\
                        └───────┘\n";
        assert_eq!(format!("{}", g), expected);
    }

    #[test]
    fn display_shows_gaps_at_openings() {
        let mut g = SquareGrid::new(1).unwrap();
        g.mark_open(gc(0, 0));
        // The cell sits on the west boundary, so the western wall is the gap.
        assert_eq!(format!("{}", g), "┌───┐\n    │\n└───┘\n");
    }
}

use rand::Rng;

#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}
impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x: x, y: y }
    }
}

/// One side of a cell. The discriminant order matches the wall flag layout
/// handed to renderers: `[top, right, bottom, left]`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [WallSide::Top, WallSide::Right, WallSide::Bottom, WallSide::Left];

    /// The side facing this one from the adjacent cell: Top↔Bottom, Right↔Left.
    pub fn opposite(self) -> WallSide {
        match self {
            WallSide::Top => WallSide::Bottom,
            WallSide::Right => WallSide::Left,
            WallSide::Bottom => WallSide::Top,
            WallSide::Left => WallSide::Right,
        }
    }

    /// Creates a new coordinate offset 1 cell away in this direction.
    /// Returns None if the coordinate is not representable (upper grid bounds
    /// are checked by the grid, which knows its dimension).
    pub fn offset(self, coord: GridCoordinate) -> Option<GridCoordinate> {
        let (x, y) = (coord.x, coord.y);
        match self {
            WallSide::Top => {
                if y > 0 {
                    Some(GridCoordinate::new(x, y - 1))
                } else {
                    None
                }
            }
            WallSide::Right => Some(GridCoordinate::new(x + 1, y)),
            WallSide::Bottom => Some(GridCoordinate::new(x, y + 1)),
            WallSide::Left => {
                if x > 0 {
                    Some(GridCoordinate::new(x - 1, y))
                } else {
                    None
                }
            }
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> WallSide {
        let side_index = rng.gen::<usize>() % WallSide::ALL.len();
        WallSide::ALL[side_index]
    }
}

/// One grid position. Identity is the coordinate; cells never move or merge,
/// only the wall flags mutate (and only via `SquareGrid::carve_passage`).
#[derive(Debug, Copy, Clone)]
pub struct MazeCell {
    pub coord: GridCoordinate,
    /// `true` means a wall is present on that side, indexed by `WallSide`.
    pub walls: [bool; 4],
    /// Marks a designated boundary entrance/exit cell whose outer boundary
    /// wall is conceptually removed by the renderer.
    pub is_open: bool,
}

impl MazeCell {
    pub fn new(coord: GridCoordinate) -> MazeCell {
        MazeCell {
            coord: coord,
            walls: [true; 4],
            is_open: false,
        }
    }

    pub fn has_wall(&self, side: WallSide) -> bool {
        self.walls[side as usize]
    }
}

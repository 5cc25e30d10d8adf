use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest tile value the wire alphabet can carry (`'S'`).
pub const MAX_TILE: Tile = 1 << 22;

pub type Tile = u64;
pub type Reward = u64;

/// One square of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Static anchor: never moves, never merges, carries no value.
    Obstacle,
    Tile(Tile),
}

impl Cell {
    /// Tile value, `None` for empty and obstacle cells.
    #[inline]
    pub fn value(&self) -> Option<Tile> {
        match *self {
            Cell::Tile(v) => Some(v),
            Cell::Empty | Cell::Obstacle => None,
        }
    }

    #[inline]
    pub fn is_obstacle(&self) -> bool { matches!(self, Cell::Obstacle) }

    #[inline]
    pub fn is_empty(&self) -> bool { matches!(self, Cell::Empty) }
}

/// A direction to slide/merge tiles.
///
/// Integer codes follow the transport: `Left=0, Up=1, Right=2, Down=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Canonical enumeration order. Also the tie-break order of the greedy search.
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];

    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Down => 3,
        }
    }

    /// Strict decoding of a transport code.
    #[inline]
    pub fn try_from_code(code: u8) -> Option<Direction> {
        Direction::ALL.get(code as usize).copied()
    }

    /// Lenient decoding of a transport code: unknown codes behave as `Left`.
    ///
    /// Callers passing garbage get a silent `Left` move rather than an error;
    /// use [`Direction::try_from_code`] to reject unknown codes instead.
    ///
    /// ```
    /// use anchor_2048::engine::Direction;
    /// assert_eq!(Direction::from_code(3), Direction::Down);
    /// assert_eq!(Direction::from_code(42), Direction::Left);
    /// ```
    #[inline]
    pub fn from_code(code: u8) -> Direction {
        Direction::try_from_code(code).unwrap_or(Direction::Left)
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "LEFT",
            Direction::Up => "UP",
            Direction::Right => "RIGHT",
            Direction::Down => "DOWN",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGrid {
    #[error("grid is empty")]
    Empty,
    #[error("grid length {len} is not a perfect square")]
    NotSquare { len: usize },
    #[error("unknown symbol {symbol:?} at index {index}")]
    UnknownSymbol { symbol: char, index: usize },
    #[error("invalid tile value {value} at index {index}")]
    InvalidTile { value: Tile, index: usize },
    #[error("tile value {value} at index {index} has no wire symbol")]
    Unencodable { value: Tile, index: usize },
}

/// Square grid of cells in row-major order.
///
/// Grids are immutable values: every engine operation borrows a grid and
/// returns a fresh one, so the same grid can be simulated in all four
/// directions without disturbing the caller's state.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

/// Result of one simulated move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Sum of the values created by merges.
    pub reward: Reward,
    pub grid: Grid,
}

impl Grid {
    /// Build a grid from row-major cells.
    ///
    /// Fails when the length is zero or not a perfect square, or when a tile
    /// is not a power of two in `2..=MAX_TILE`.
    ///
    /// ```
    /// use anchor_2048::engine::{Cell, Grid};
    /// let g = Grid::from_cells(vec![Cell::Tile(2), Cell::Obstacle, Cell::Empty, Cell::Tile(4)]).unwrap();
    /// assert_eq!(g.size(), 2);
    /// assert!(Grid::from_cells(vec![Cell::Empty; 3]).is_err());
    /// ```
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self, InvalidGrid> {
        let size = side_len(cells.len())?;
        for (index, cell) in cells.iter().enumerate() {
            if let Cell::Tile(value) = *cell {
                if !is_valid_tile(value) {
                    return Err(InvalidGrid::InvalidTile { value, index });
                }
            }
        }
        Ok(Grid { size, cells })
    }

    /// An all-empty grid of side `size` (at least 1).
    pub fn empty(size: usize) -> Self {
        let size = size.max(1);
        Grid { size, cells: vec![Cell::Empty; size * size] }
    }

    /// Side length `N`.
    #[inline]
    pub fn size(&self) -> usize { self.size }

    #[inline]
    pub fn len(&self) -> usize { self.cells.len() }

    /// Always false: a grid holds at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    #[inline]
    pub fn cells(&self) -> &[Cell] { &self.cells }

    #[inline]
    pub fn into_cells(self) -> Vec<Cell> { self.cells }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size { Some(self.cells[row * self.size + col]) } else { None }
    }

    /// Iterate rows as slices of length `N`.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ { self.cells.chunks(self.size) }

    /// Copy column `col` top to bottom.
    pub fn column(&self, col: usize) -> Vec<Cell> {
        self.cells.iter().skip(col).step_by(self.size).copied().collect()
    }

    /// Simulate sliding/merging toward `dir`. The grid itself is untouched.
    ///
    /// ```
    /// use anchor_2048::codec;
    /// use anchor_2048::engine::Direction;
    /// let g = codec::decode("22  ").unwrap();
    /// let out = g.shift(Direction::Left);
    /// assert_eq!(out.reward, 4);
    /// assert_eq!(codec::encode(&out.grid).unwrap(), "4   ");
    /// ```
    #[inline]
    pub fn shift(&self, dir: Direction) -> MoveOutcome { shift(self, dir) }

    /// True if no direction changes the grid.
    #[inline]
    pub fn is_stuck(&self) -> bool { is_stuck(self) }

    /// Highest tile value, 0 if the grid has no tiles.
    #[inline]
    pub fn max_tile_value(&self) -> Tile {
        self.cells.iter().filter_map(Cell::value).max().unwrap_or(0)
    }

    #[inline]
    pub fn empty_count(&self) -> usize { self.cells.iter().filter(|c| c.is_empty()).count() }

    #[inline]
    pub fn obstacle_count(&self) -> usize { self.cells.iter().filter(|c| c.is_obstacle()).count() }

    #[inline]
    pub fn tile_count(&self) -> usize { self.cells.iter().filter(|c| c.value().is_some()).count() }

    /// Sum of all tile values. Merging conserves it.
    #[inline]
    pub fn tile_sum(&self) -> Tile { self.cells.iter().filter_map(Cell::value).sum() }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid").field("size", &self.size).field("cells", &self.cells).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = "-".repeat(self.size * 8 - 1);
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f, "{}", divider)?;
            }
            let line: Vec<String> = row.iter().map(format_cell).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => " ".repeat(7),
        Cell::Obstacle => format!("{:^7}", "x"),
        Cell::Tile(v) => format!("{:^7}", v),
    }
}

#[inline]
pub(crate) fn is_valid_tile(value: Tile) -> bool {
    (2..=MAX_TILE).contains(&value) && value.is_power_of_two()
}

fn side_len(len: usize) -> Result<usize, InvalidGrid> {
    if len == 0 {
        return Err(InvalidGrid::Empty);
    }
    let mut n = (len as f64).sqrt() as usize;
    // Float sqrt can be off by one for large inputs.
    while n * n > len {
        n -= 1;
    }
    while (n + 1) * (n + 1) <= len {
        n += 1;
    }
    if n * n == len { Ok(n) } else { Err(InvalidGrid::NotSquare { len }) }
}

/// Slide/merge tiles in `dir`. Unlike a real game, no tile is spawned.
pub fn shift(grid: &Grid, dir: Direction) -> MoveOutcome {
    match dir {
        Direction::Left => slide_left(grid),
        Direction::Right => {
            let r = slide_left(&rotate_right(grid, 2));
            MoveOutcome { reward: r.reward, grid: rotate_left(&r.grid, 2) }
        }
        Direction::Up => {
            let r = slide_left(&rotate_left(grid, 1));
            MoveOutcome { reward: r.reward, grid: rotate_right(&r.grid, 1) }
        }
        Direction::Down => {
            let r = slide_left(&rotate_right(grid, 1));
            MoveOutcome { reward: r.reward, grid: rotate_left(&r.grid, 1) }
        }
    }
}

/// Shift by raw transport code; unknown codes behave as `Left`.
#[inline]
pub fn shift_code(grid: &Grid, code: u8) -> MoveOutcome { shift(grid, Direction::from_code(code)) }

/// True if no direction changes the grid.
pub fn is_stuck(grid: &Grid) -> bool {
    Direction::ALL.iter().all(|&dir| shift(grid, dir).grid == *grid)
}

/// Rotate 90 degrees clockwise `k` times.
pub fn rotate_right(grid: &Grid, k: usize) -> Grid {
    let mut cells = grid.cells.clone();
    for _ in 0..k % 4 {
        cells = rotate_right_once(&cells, grid.size);
    }
    Grid { size: grid.size, cells }
}

/// Rotate 90 degrees counter-clockwise `k` times.
///
/// Each step reverses the flat sequence (a half turn) and then turns right
/// once, which lands exactly one quarter turn to the left.
pub fn rotate_left(grid: &Grid, k: usize) -> Grid {
    let mut cells = grid.cells.clone();
    for _ in 0..k % 4 {
        cells.reverse();
        cells = rotate_right_once(&cells, grid.size);
    }
    Grid { size: grid.size, cells }
}

fn rotate_right_once(cells: &[Cell], n: usize) -> Vec<Cell> {
    let mut out = Vec::with_capacity(cells.len());
    for i in 0..n {
        for j in 0..n {
            out.push(cells[(n - j - 1) * n + i]);
        }
    }
    out
}

/// Slide every row toward column 0.
pub fn slide_left(grid: &Grid) -> MoveOutcome {
    let mut cells = Vec::with_capacity(grid.len());
    let mut reward = 0;
    for row in grid.rows() {
        reward += slide_row_into(row, &mut cells);
    }
    MoveOutcome { reward, grid: Grid { size: grid.size, cells } }
}

/// Slide one row toward index 0, returning the new row and the merge reward.
///
/// Obstacles split the row into independent runs; each run compacts toward
/// its own left boundary and keeps its length, so obstacles stay in place.
///
/// ```
/// use anchor_2048::engine::{slide_left_row, Cell::*};
/// let (row, reward) = slide_left_row(&[Empty, Tile(2), Tile(2), Obstacle, Empty, Tile(4)]);
/// assert_eq!(row, vec![Tile(4), Empty, Empty, Obstacle, Tile(4), Empty]);
/// assert_eq!(reward, 4);
/// ```
pub fn slide_left_row(row: &[Cell]) -> (Vec<Cell>, Reward) {
    let mut out = Vec::with_capacity(row.len());
    let reward = slide_row_into(row, &mut out);
    (out, reward)
}

fn slide_row_into(row: &[Cell], out: &mut Vec<Cell>) -> Reward {
    let mut reward = 0;
    for (idx, run) in row.split(Cell::is_obstacle).enumerate() {
        if idx > 0 {
            out.push(Cell::Obstacle);
        }
        reward += slide_run(run, out);
    }
    reward
}

// Single pass: a tile produced by a merge is never merged again in the same move.
fn slide_run(run: &[Cell], out: &mut Vec<Cell>) -> Reward {
    let start = out.len();
    let mut reward = 0;
    let mut pending: Option<Tile> = None;
    for value in run.iter().filter_map(Cell::value) {
        match pending {
            Some(prev) if prev == value => {
                let merged = prev * 2;
                out.push(Cell::Tile(merged));
                reward += merged;
                pending = None;
            }
            Some(prev) => {
                out.push(Cell::Tile(prev));
                pending = Some(value);
            }
            None => pending = Some(value),
        }
    }
    if let Some(prev) = pending {
        out.push(Cell::Tile(prev));
    }
    out.resize(start + run.len(), Cell::Empty);
    reward
}

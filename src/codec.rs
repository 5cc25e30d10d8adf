//! Wire format for grids.
//!
//! A grid travels as `N*N` single-character symbols in row-major order with
//! no separators: `' '` empty, `'x'` obstacle, `'2' '4' '8'` literal tiles and
//! `'A'..='S'` for 16 up to 4194304, one doubling per letter.
//! Transport messages wrap the cells as `board=<cells>`.

use log::debug;

use crate::engine::{Cell, Grid, InvalidGrid, Tile};

pub const EMPTY_SYMBOL: char = ' ';
pub const OBSTACLE_SYMBOL: char = 'x';

/// `'A'` is 2^4; every following letter doubles.
const FIRST_LETTER_EXP: u32 = 4;
const LAST_LETTER: char = 'S';

/// Map one wire symbol to a cell.
#[inline]
pub fn cell_from_symbol(symbol: char) -> Option<Cell> {
    match symbol {
        EMPTY_SYMBOL => Some(Cell::Empty),
        OBSTACLE_SYMBOL => Some(Cell::Obstacle),
        '2' => Some(Cell::Tile(2)),
        '4' => Some(Cell::Tile(4)),
        '8' => Some(Cell::Tile(8)),
        'A'..=LAST_LETTER => {
            let exp = FIRST_LETTER_EXP + (symbol as u32 - 'A' as u32);
            Some(Cell::Tile(1 << exp))
        }
        _ => None,
    }
}

/// Map one cell to its wire symbol; `None` for tiles the alphabet cannot carry.
#[inline]
pub fn symbol_for(cell: Cell) -> Option<char> {
    match cell {
        Cell::Empty => Some(EMPTY_SYMBOL),
        Cell::Obstacle => Some(OBSTACLE_SYMBOL),
        Cell::Tile(2) => Some('2'),
        Cell::Tile(4) => Some('4'),
        Cell::Tile(8) => Some('8'),
        Cell::Tile(v) => tile_letter(v),
    }
}

fn tile_letter(value: Tile) -> Option<char> {
    if !value.is_power_of_two() {
        return None;
    }
    let exp = value.trailing_zeros();
    let last_exp = FIRST_LETTER_EXP + (LAST_LETTER as u32 - 'A' as u32);
    if (FIRST_LETTER_EXP..=last_exp).contains(&exp) {
        char::from_u32('A' as u32 + (exp - FIRST_LETTER_EXP))
    } else {
        None
    }
}

/// Decode a wire string into a grid.
///
/// ```
/// use anchor_2048::codec;
/// use anchor_2048::engine::Cell;
/// let g = codec::decode("2x A").unwrap();
/// assert_eq!(g.size(), 2);
/// assert_eq!(g.cells(), &[Cell::Tile(2), Cell::Obstacle, Cell::Empty, Cell::Tile(16)]);
/// assert!(codec::decode("2x A!").is_err());
/// ```
pub fn decode(raw: &str) -> Result<Grid, InvalidGrid> {
    let cells = raw
        .chars()
        .enumerate()
        .map(|(index, symbol)| cell_from_symbol(symbol).ok_or(InvalidGrid::UnknownSymbol { symbol, index }))
        .collect::<Result<Vec<_>, _>>()
        .and_then(Grid::from_cells);
    if let Err(ref e) = cells {
        debug!("rejected grid frame ({} chars): {}", raw.chars().count(), e);
    }
    cells
}

/// Encode a grid back into wire symbols.
///
/// Only fails for tiles above `'S'` (4194304), which the engine can produce
/// by merging two of the largest tiles.
pub fn encode(grid: &Grid) -> Result<String, InvalidGrid> {
    grid.cells()
        .iter()
        .enumerate()
        .map(|(index, &cell)| {
            symbol_for(cell).ok_or(InvalidGrid::Unencodable { value: cell.value().unwrap_or(0), index })
        })
        .collect()
}

/// Grid payload of a transport message: everything after the last `'='`.
///
/// Spaces are cells, so the payload is never trimmed.
///
/// ```
/// use anchor_2048::codec::frame_payload;
/// assert_eq!(frame_payload("board=2 x4"), "2 x4");
/// assert_eq!(frame_payload("2 x4"), "2 x4");
/// ```
#[inline]
pub fn frame_payload(message: &str) -> &str {
    message.rsplit('=').next().unwrap_or(message)
}

/// Decode a full transport message.
#[inline]
pub fn decode_frame(message: &str) -> Result<Grid, InvalidGrid> { decode(frame_payload(message)) }

/// Highest tile value, 0 if there are no tiles.
#[inline]
pub fn max_tile_value(grid: &Grid) -> Tile { grid.max_tile_value() }

/// Count `Empty` cells.
#[inline]
pub fn empty_count(grid: &Grid) -> usize { grid.empty_count() }

/// Count `Obstacle` cells.
#[inline]
pub fn obstacle_count(grid: &Grid) -> usize { grid.obstacle_count() }

#[inline]
pub fn tile_count(grid: &Grid) -> usize { grid.tile_count() }

#[inline]
pub fn tile_sum(grid: &Grid) -> Tile { grid.tile_sum() }

impl std::str::FromStr for Grid {
    type Err = InvalidGrid;

    fn from_str(s: &str) -> Result<Self, Self::Err> { decode(s) }
}

impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = encode(self).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&raw)
    }
}

impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        decode(&raw).map_err(serde::de::Error::custom)
    }
}

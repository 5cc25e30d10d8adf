//! Inputs and shaping signals for an external learned policy.
//!
//! The policy itself lives outside this crate. It observes a grid, asks for a
//! feature vector, picks a direction and is trained with the engine's merge
//! reward plus the shaping signals below.

use serde::Serialize;

use crate::engine::{Cell, Direction, Grid, Reward};

/// Bookkeeping the orchestrator carries between committed moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepMeta {
    /// Direction committed on the previous step, if any.
    pub previous_move: Option<Direction>,
    /// Running score after the previous step.
    pub score: Reward,
    /// Running score one step earlier.
    pub previous_score: Reward,
    /// Whether the previous move changed the grid.
    pub moved: bool,
    /// Number of committed moves so far.
    pub times_moved: u64,
}

/// Per cell: `1 - 1/v` for tiles, `0` for empty and obstacle cells.
///
/// ```
/// use anchor_2048::{codec, features};
/// let g = codec::decode("2x 4").unwrap();
/// assert_eq!(features::cell_inputs(&g), vec![0.5, 0.0, 0.0, 0.75]);
/// ```
pub fn cell_inputs(grid: &Grid) -> Vec<f64> {
    grid.cells().iter().map(|c| c.value().map_or(0.0, |v| 1.0 - 1.0 / v as f64)).collect()
}

/// `1 - 1/x` for positive `x`, else 0.
#[inline]
fn squash(x: f64) -> f64 {
    if x > 0.0 { 1.0 - 1.0 / x } else { 0.0 }
}

/// Flat input vector: cell inputs followed by four step features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyInputs {
    pub cells: Vec<f64>,
    /// Previous move code over 4; 0 for none or `Left`.
    pub previous_move: f64,
    pub score: f64,
    pub moved: f64,
    pub empty: f64,
}

impl PolicyInputs {
    pub fn build(grid: &Grid, meta: &StepMeta) -> Self {
        Self {
            cells: cell_inputs(grid),
            previous_move: meta.previous_move.map_or(0.0, |d| d.code() as f64 / 4.0),
            score: squash(meta.score as f64),
            moved: if meta.moved { 1.0 } else { 0.0 },
            empty: grid.empty_count() as f64,
        }
    }

    /// Number of inputs for a grid of side `size`.
    #[inline]
    pub fn width(size: usize) -> usize { size * size + 4 }

    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.cells.len() + 4);
        out.extend_from_slice(&self.cells);
        out.extend([self.previous_move, self.score, self.moved, self.empty]);
        out
    }
}

/// Reward shaping signals fed back to the policy after a committed move.
///
/// Each signal is 0 when its denominator is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RewardSignals {
    /// `1 - 1/(score - previous_score)`.
    pub score: f64,
    /// `1 - max_tile/score`.
    pub max: f64,
    /// `1 - 1/times_moved`.
    pub moves: f64,
    /// `1 - 1/empty_count`.
    pub empty: f64,
}

impl RewardSignals {
    pub fn from_meta(grid: &Grid, meta: &StepMeta) -> Self {
        let gained = meta.score.saturating_sub(meta.previous_score) as f64;
        let max = if meta.score > 0 { 1.0 - grid.max_tile_value() as f64 / meta.score as f64 } else { 0.0 };
        Self {
            score: squash(gained),
            max,
            moves: squash(meta.times_moved as f64),
            empty: squash(grid.empty_count() as f64),
        }
    }

    pub fn to_array(self) -> [f64; 4] { [self.score, self.max, self.moves, self.empty] }
}

/// True for a full line with no equal neighbours: nothing can move along it.
///
/// Obstacles count as occupied.
///
/// ```
/// use anchor_2048::engine::Cell::*;
/// use anchor_2048::features::line_locked;
/// assert!(line_locked(&[Tile(2), Tile(4), Obstacle, Tile(4)]));
/// assert!(!line_locked(&[Tile(2), Tile(2), Tile(4), Tile(8)]));
/// assert!(!line_locked(&[Tile(2), Empty, Tile(4), Tile(8)]));
/// ```
pub fn line_locked(line: &[Cell]) -> bool {
    !line.iter().any(Cell::is_empty)
        && line.windows(2).all(|w| match (w[0].value(), w[1].value()) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        })
}

/// Whether every row is locked.
pub fn rows_locked(grid: &Grid) -> bool { grid.rows().all(line_locked) }

/// Whether every column is locked.
pub fn columns_locked(grid: &Grid) -> bool { (0..grid.size()).all(|c| line_locked(&grid.column(c))) }

//! Greedy one-ply move search.
//!
//! This module provides:
//! - [`Greedy`]: evaluates all four directions with the engine and keeps the
//!   one with the highest merge reward.
//! - [`best_moves_par`]: rayon-based evaluation of many grids at once.
//!
//! Notes
//! - Directions are tried in [`Direction::ALL`] order (`Left, Up, Right, Down`)
//!   and only a strictly greater reward replaces the current best, so ties go
//!   to the earliest direction and an all-zero grid yields `Left`.
//! - Search never mutates the grid it is given; every branch is a simulation.
//!
//! Quick start
//! ```
//! use anchor_2048::codec;
//! use anchor_2048::engine::Direction;
//! use anchor_2048::greedy::{self, Greedy};
//!
//! let g = codec::decode("2 2 ").unwrap();
//! let d = greedy::best_move(&g);
//! assert_eq!(d.direction, Direction::Up);
//! assert_eq!(d.reward, 4);
//!
//! let batch = greedy::best_moves_par(&[g.clone(), g]);
//! assert!(batch.iter().all(|b| b.direction == Direction::Up));
//! # let _ = Greedy::new();
//! ```

use serde::Serialize;

use crate::engine::{Direction, Grid, Reward};

mod batch;
mod search;

pub use batch::{best_moves_par, best_moves_par_with};
pub use search::{best_move, branch_evals, Greedy};

/// Configurable knobs for the greedy search. Defaults keep the plain
/// first-strictly-greater rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyConfig {
    /// When every direction scores zero, pick the first direction that
    /// changes the grid instead of defaulting to `Left`.
    pub prefer_legal: bool,
}

/// The chosen direction together with its simulated outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub direction: Direction,
    pub reward: Reward,
    pub grid: Grid,
}

/// Per-direction reward at the root.
///
/// `legal` is false when the move leaves the grid unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BranchEval {
    pub direction: Direction,
    pub reward: Reward,
    pub legal: bool,
}

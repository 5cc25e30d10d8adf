//! anchor-2048: a pure 2048 grid engine with static obstacle cells
//!
//! This crate provides:
//! - A `Grid` of `Empty`, `Obstacle` and `Tile(v)` cells with a simulated
//!   `shift` that slides/merges tiles and reports the merge reward (`engine`)
//! - The single-character wire format used by the game server (`codec`)
//! - A greedy one-ply search over the four directions, sequential and batched (`greedy`)
//! - Input vectors and reward shaping for an external learned policy (`features`)
//!
//! Obstacles never move and split every row/column into independent runs.
//! Nothing here spawns tiles or keeps game state: every call is a simulation
//! over an immutable grid, so all four directions can be tried safely.
//!
//! Quick start:
//! ```
//! use anchor_2048::codec;
//! use anchor_2048::engine::Direction;
//! use anchor_2048::greedy;
//!
//! let grid = codec::decode_frame(concat!("board=", "2x2 ", " 22 ", "    ", "    ")).unwrap();
//! assert_eq!(grid.size(), 4);
//!
//! let out = grid.shift(Direction::Left);
//! assert_eq!(out.reward, 4);
//! assert_eq!(out.grid.obstacle_count(), grid.obstacle_count());
//!
//! let best = greedy::best_move(&grid);
//! assert_eq!(best.direction, Direction::Left);
//! ```
//!
//! Feeding a learned policy
//! ```
//! use anchor_2048::codec;
//! use anchor_2048::features::{PolicyInputs, RewardSignals, StepMeta};
//!
//! let grid = codec::decode("2x 4").unwrap();
//! let meta = StepMeta { score: 8, previous_score: 4, times_moved: 3, ..Default::default() };
//! let inputs = PolicyInputs::build(&grid, &meta).to_vec();
//! assert_eq!(inputs.len(), PolicyInputs::width(grid.size()));
//! let _signals = RewardSignals::from_meta(&grid, &meta);
//! ```
//!
pub mod codec;
pub mod engine;
pub mod features;
pub mod greedy;

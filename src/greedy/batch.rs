use log::trace;
use rayon::prelude::*;

use crate::engine::Grid;

use super::{Decision, Greedy, GreedyConfig};

/// Evaluate many grids in parallel with the default configuration.
///
/// Results come back in input order and match [`super::best_move`] exactly.
#[inline]
pub fn best_moves_par(grids: &[Grid]) -> Vec<Decision> { best_moves_par_with(grids, GreedyConfig::default()) }

/// Parallel batch evaluation with an explicit configuration.
pub fn best_moves_par_with(grids: &[Grid], cfg: GreedyConfig) -> Vec<Decision> {
    trace!("greedy batch: {} grids", grids.len());
    let search = Greedy::with_config(cfg);
    grids.par_iter().map(|g| search.best_move(g)).collect()
}

use crate::engine::{Direction, Grid, MoveOutcome};

use super::{BranchEval, Decision, GreedyConfig};

/// Sequential greedy search.
#[derive(Debug, Clone, Default)]
pub struct Greedy {
    cfg: GreedyConfig,
}

impl Greedy {
    pub fn new() -> Self { Self::with_config(GreedyConfig::default()) }

    pub fn with_config(cfg: GreedyConfig) -> Self { Self { cfg } }

    #[inline]
    pub fn config(&self) -> GreedyConfig { self.cfg }

    /// Pick the direction with the highest merge reward.
    ///
    /// Example
    /// ```
    /// use anchor_2048::codec;
    /// use anchor_2048::engine::Direction;
    /// use anchor_2048::greedy::{Greedy, GreedyConfig};
    ///
    /// // Nothing merges, and Left and Up leave the grid as it is.
    /// let g = codec::decode("2   ").unwrap();
    /// assert_eq!(Greedy::new().best_move(&g).direction, Direction::Left);
    /// let eager = Greedy::with_config(GreedyConfig { prefer_legal: true });
    /// assert_eq!(eager.best_move(&g).direction, Direction::Right);
    /// ```
    pub fn best_move(&self, grid: &Grid) -> Decision {
        let mut outcomes: Vec<(Direction, MoveOutcome)> =
            Direction::ALL.iter().map(|&dir| (dir, grid.shift(dir))).collect();
        let mut best = 0;
        for (idx, (_, out)) in outcomes.iter().enumerate().skip(1) {
            if out.reward > outcomes[best].1.reward {
                best = idx;
            }
        }
        if self.cfg.prefer_legal && outcomes[best].1.reward == 0 {
            if let Some(idx) = outcomes.iter().position(|(_, out)| out.grid != *grid) {
                best = idx;
            }
        }
        let (direction, MoveOutcome { reward, grid }) = outcomes.swap_remove(best);
        Decision { direction, reward, grid }
    }

    /// Rewards and legality for every direction, in [`Direction::ALL`] order.
    pub fn branch_evals(&self, grid: &Grid) -> [BranchEval; 4] {
        Direction::ALL.map(|direction| {
            let out = grid.shift(direction);
            BranchEval { direction, reward: out.reward, legal: out.grid != *grid }
        })
    }
}

/// Greedy choice with the default configuration.
#[inline]
pub fn best_move(grid: &Grid) -> Decision { Greedy::new().best_move(grid) }

/// Branch rewards with the default configuration.
#[inline]
pub fn branch_evals(grid: &Grid) -> [BranchEval; 4] { Greedy::new().branch_evals(grid) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[test]
    fn test_ties_keep_earliest_direction() {
        // Left and Right both merge the top row for 4.
        let g = decode("22  ").unwrap();
        let d = best_move(&g);
        assert_eq!(d.direction, Direction::Left);
        assert_eq!(d.reward, 4);
        assert_eq!(d.grid, g.shift(Direction::Left).grid);
    }

    #[test]
    fn test_strictly_greater_wins() {
        let g = decode(concat!("2 4", "2 4", "x  ")).unwrap();
        let d = best_move(&g);
        assert_eq!(d.direction, Direction::Up);
        assert_eq!(d.reward, 12);
    }

    #[test]
    fn test_all_zero_defaults_to_left() {
        for raw in ["    ", "x2 4", "248A"] {
            let g = decode(raw).unwrap();
            let d = best_move(&g);
            assert_eq!(d.direction, Direction::Left, "grid {:?}", raw);
            assert_eq!(d.reward, 0);
        }
    }

    #[test]
    fn test_prefer_legal_only_breaks_zero_ties() {
        let eager = Greedy::with_config(GreedyConfig { prefer_legal: true });
        let g = decode("22  ").unwrap();
        assert_eq!(eager.best_move(&g).direction, Direction::Left);
        let stuck = decode("248A").unwrap();
        assert_eq!(eager.best_move(&stuck).direction, Direction::Left);
        let g = decode(" 2  ").unwrap();
        assert_eq!(eager.best_move(&g).direction, Direction::Left);
        // Left and Up are no-ops here.
        let g = decode("x 2 ").unwrap();
        assert_eq!(eager.best_move(&g).direction, Direction::Right);
    }

    #[test]
    fn test_branch_evals_order_and_legality() {
        let g = decode("2 2 ").unwrap();
        let evals = branch_evals(&g);
        let dirs: Vec<Direction> = evals.iter().map(|b| b.direction).collect();
        assert_eq!(dirs, Direction::ALL.to_vec());
        assert_eq!(evals.map(|b| b.reward), [0, 4, 0, 4]);
        assert_eq!(evals.map(|b| b.legal), [false, true, true, true]);
    }

    #[test]
    fn test_best_move_leaves_input_alone() {
        let g = decode("2222222222222222").unwrap();
        let before = g.clone();
        let _ = best_move(&g);
        let _ = branch_evals(&g);
        assert_eq!(g, before);
    }
}

//! Full-tree minimax over a `StateTree`.
//!
//! Values are depth-sensitive: a terminal state is worth `3M+1 - depth` to
//! the player who made the last move, so faster wins and slower losses score
//! better. No pruning is done; every node of the tree is evaluated.
use crate::game::{GameState, NodeId, StateTree};

/// How the minimizing player is modeled at odd depths.
///
/// `Greedy` is the default: the minimizing player also takes the *maximum*
/// over its children, i.e. it is not assumed to play optimally. A rational
/// minimizer would not do this, so the default is questionable; use
/// `Optimal` for a rational opponent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MinimizerMode {
    /// Take the minimum over children.
    Optimal,
    /// Take the maximum over children.
    #[default]
    Greedy,
}

/// Result of evaluating one node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Minimax value of the node.
    pub value: i32,
    /// Move index (0..6) of the child that produced `value`.
    /// `None` for terminal nodes.
    pub best_move: Option<usize>,
}

/// Minimax evaluator bound to one tree.
///
/// # Examples
/// ```
/// use pile_search::config::GameConfig;
/// use pile_search::game::{Piles, StateTree};
/// use pile_search::minimax::{Minimax, MinimizerMode};
///
/// let config = GameConfig::new(3, 2, 2, 2).unwrap();
/// let tree = StateTree::build_from(&config, Piles::new(2, 0, 0)).unwrap();
/// let eval = Minimax::new(&tree, MinimizerMode::Optimal).evaluate(tree.root());
/// // Taking both red tokens at once wins on the first move: 3*3+1 - 1.
/// assert_eq!(eval.value, 9);
/// assert_eq!(eval.best_move, Some(3));
/// ```
pub struct Minimax<'a> {
    tree: &'a StateTree,
    mode: MinimizerMode,
    horizon: i32,
}

impl<'a> Minimax<'a> {
    pub fn new(tree: &'a StateTree, mode: MinimizerMode) -> Self {
        Minimax {
            tree,
            mode,
            horizon: tree.config().horizon(),
        }
    }

    /// Score of a terminal state, from the maximizing player's point of view.
    ///
    /// The player who emptied the last pile gets `3M+1 - depth`; the value is
    /// positive when that was the maximizing player (the parent was at an
    /// even depth) and negative otherwise. A root that is already terminal
    /// has no mover and scores 0.
    ///
    /// # Panics
    /// Panics if `id` is not a terminal state.
    pub fn terminal_cost(&self, id: NodeId) -> i32 {
        let state = self.tree.node(id);
        assert!(
            state.is_terminal(),
            "terminal cost requested for non-terminal state {}",
            id
        );
        let depth = state.depth();
        if depth == 0 {
            return 0;
        }
        let magnitude = self.horizon - depth as i32;
        if depth % 2 == 1 {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Recursively evaluates the subtree rooted at `id`.
    ///
    /// Among children with equal value the one with the highest move index
    /// wins, since children are scanned in increasing index order and ties
    /// overwrite the current best.
    pub fn evaluate(&self, id: NodeId) -> Evaluation {
        let state = self.tree.node(id);
        if state.is_terminal() {
            return Evaluation {
                value: self.terminal_cost(id),
                best_move: None,
            };
        }
        self.select(state, |child| self.evaluate(child).value)
    }

    /// Evaluates every node of the tree in one bottom-up sweep.
    ///
    /// The returned table is indexed by `NodeId` and agrees with `evaluate`
    /// on every node. Relies on children having larger ids than parents.
    pub fn annotate(&self) -> Vec<Evaluation> {
        let mut table = vec![Evaluation::default(); self.tree.len()];
        for id in (0..self.tree.len()).rev() {
            let state = self.tree.node(id);
            let evaluation = if state.is_terminal() {
                Evaluation {
                    value: self.terminal_cost(id),
                    best_move: None,
                }
            } else {
                self.select(state, |child| table[child].value)
            };
            table[id] = evaluation;
        }
        log::debug!(
            "annotated {} states ({:?} minimizer), root value {}",
            table.len(),
            self.mode,
            table.first().map_or(0, |e| e.value)
        );
        table
    }

    fn select(&self, state: &GameState, mut value_of: impl FnMut(NodeId) -> i32) -> Evaluation {
        let minimize = !state.is_maximizing() && self.mode == MinimizerMode::Optimal;
        let mut best: Option<(i32, usize)> = None;
        for (i, child) in state.children() {
            let value = value_of(child);
            let replace = match best {
                None => true,
                Some((current, _)) if minimize => value <= current,
                Some((current, _)) => value >= current,
            };
            if replace {
                best = Some((value, i));
            }
        }
        let (value, i) = best.expect("non-terminal state must have a legal move");
        Evaluation {
            value,
            best_move: Some(i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Piles;

    fn config() -> GameConfig {
        GameConfig::new(3, 2, 2, 2).unwrap()
    }

    #[test]
    fn test_default_mode_is_greedy() {
        assert_eq!(MinimizerMode::default(), MinimizerMode::Greedy);
    }

    #[test]
    fn test_terminal_cost_positive_for_maximizer_win() {
        let tree = StateTree::build_from(&config(), Piles::new(1, 0, 0)).unwrap();
        let minimax = Minimax::new(&tree, MinimizerMode::Optimal);
        let leaf = tree.node(0).child(0).unwrap();
        // Maximizer moved from depth 0, terminal at depth 1: +(10 - 1).
        assert_eq!(minimax.terminal_cost(leaf), 9);
    }

    #[test]
    fn test_terminal_cost_negative_for_minimizer_win() {
        let tree = StateTree::build_from(&config(), Piles::new(0, 2, 0)).unwrap();
        let minimax = Minimax::new(&tree, MinimizerMode::Optimal);
        let mid = tree.node(0).child(1).unwrap();
        let leaf = tree.node(mid).child(1).unwrap();
        assert_eq!(tree.node(leaf).depth(), 2);
        assert_eq!(minimax.terminal_cost(leaf), -8);
    }

    #[test]
    fn test_terminal_cost_magnitude_shrinks_with_depth() {
        let config = GameConfig::new(4, 2, 2, 2).unwrap();
        let tree = StateTree::build_from(&config, Piles::new(3, 0, 0)).unwrap();
        let minimax = Minimax::new(&tree, MinimizerMode::Optimal);
        // -1 R three times: terminal at depth 3, maximizer moved last.
        let mut id = tree.root();
        for _ in 0..3 {
            id = tree.node(id).child(0).unwrap();
        }
        assert_eq!(minimax.terminal_cost(id), 13 - 3);
    }

    #[test]
    fn test_longest_game_still_scores_positive() {
        // Always taking the lowest legal move index removes one token at a
        // time, giving the longest possible game from (3,3,3).
        let tree = StateTree::build(&config()).unwrap();
        let minimax = Minimax::new(&tree, MinimizerMode::Optimal);
        let mut id = tree.root();
        while !tree.node(id).is_terminal() {
            let (_, child) = tree.node(id).children().next().unwrap();
            id = child;
        }
        assert_eq!(tree.node(id).depth(), 9);
        // Maximizer made the ninth move: +(10 - 9).
        assert_eq!(minimax.terminal_cost(id), 1);
    }

    #[test]
    fn test_terminal_root_scores_zero() {
        let tree = StateTree::build_from(&config(), Piles::new(0, 0, 0)).unwrap();
        let eval = Minimax::new(&tree, MinimizerMode::Greedy).evaluate(0);
        assert_eq!(eval, Evaluation { value: 0, best_move: None });
    }

    #[test]
    #[should_panic(expected = "non-terminal")]
    fn test_terminal_cost_on_internal_node_panics() {
        let tree = StateTree::build_from(&config(), Piles::new(1, 0, 0)).unwrap();
        Minimax::new(&tree, MinimizerMode::Optimal).terminal_cost(0);
    }

    #[test]
    fn test_prefers_immediate_win() {
        let tree = StateTree::build_from(&config(), Piles::new(2, 0, 0)).unwrap();
        let eval = Minimax::new(&tree, MinimizerMode::Optimal).evaluate(0);
        assert_eq!(eval.value, 9);
        assert_eq!(eval.best_move, Some(3));
    }

    #[test]
    fn test_tie_break_prefers_highest_move_index() {
        // -1 R and -1 G both lead to a loss at depth 2.
        let tree = StateTree::build_from(&config(), Piles::new(1, 1, 0)).unwrap();
        for mode in [MinimizerMode::Optimal, MinimizerMode::Greedy] {
            let eval = Minimax::new(&tree, mode).evaluate(0);
            assert_eq!(eval.value, -8);
            assert_eq!(eval.best_move, Some(1));
        }
    }

    #[test]
    fn test_optimal_minimizer_takes_minimum() {
        // Root (3,0,0): -1 R -> (2,0,0) where the minimizer can win at once
        // with -2 R, or -2 R -> (1,0,0) which forces a minimizer win.
        let tree = StateTree::build_from(&config(), Piles::new(3, 0, 0)).unwrap();
        let minimax = Minimax::new(&tree, MinimizerMode::Optimal);
        let after_one = tree.node(0).child(0).unwrap();
        let eval = minimax.evaluate(after_one);
        assert_eq!(eval.value, -8);
        assert_eq!(eval.best_move, Some(3));

        let root = minimax.evaluate(0);
        assert_eq!(root.value, -8);
        assert_eq!(root.best_move, Some(3));
    }

    #[test]
    fn test_greedy_minimizer_takes_maximum() {
        let tree = StateTree::build_from(&config(), Piles::new(3, 0, 0)).unwrap();
        let minimax = Minimax::new(&tree, MinimizerMode::Greedy);
        let after_one = tree.node(0).child(0).unwrap();
        let eval = minimax.evaluate(after_one);
        // Greedy minimizer plays -1 R, leaving the maximizer a win at depth 3.
        assert_eq!(eval.value, 7);
        assert_eq!(eval.best_move, Some(0));

        let root = minimax.evaluate(0);
        assert_eq!(root.value, 7);
        assert_eq!(root.best_move, Some(0));
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let tree = StateTree::build(&config()).unwrap();
        for mode in [MinimizerMode::Optimal, MinimizerMode::Greedy] {
            let minimax = Minimax::new(&tree, mode);
            assert_eq!(minimax.evaluate(0), minimax.evaluate(0));
        }
    }

    #[test]
    fn test_annotate_matches_evaluate() {
        let tree = StateTree::build(&config()).unwrap();
        for mode in [MinimizerMode::Optimal, MinimizerMode::Greedy] {
            let minimax = Minimax::new(&tree, mode);
            let table = minimax.annotate();
            assert_eq!(table.len(), tree.len());
            for (id, _) in tree.iter().step_by(97) {
                assert_eq!(table[id], minimax.evaluate(id), "node {}", id);
            }
            assert_eq!(table[0], minimax.evaluate(0));
        }
    }
}

//! Turn-by-turn play over a built `StateTree`.
//!
//! The engine plays the maximizing side using minimax recommendations; the
//! minimizing side's moves are supplied from outside (a human at the
//! terminal, or a test) and validated against the current state.
use crate::error::{Error, Result};
use crate::game::{GameState, NodeId, StateTree, NUM_MOVES};
use crate::minimax::{Evaluation, MinimizerMode, Minimax};
use std::fmt;

/// The two sides of the game. The maximizer moves from even depths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Maximizer,
    Minimizer,
}

impl Player {
    /// Player to move in a state at `depth`.
    pub fn to_move_at(depth: u32) -> Self {
        if depth % 2 == 0 {
            Player::Maximizer
        } else {
            Player::Minimizer
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Player::Maximizer => "maximizing",
            Player::Minimizer => "minimizing",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A game in progress.
///
/// Holds the current position and the minimax table for the whole tree, so
/// each engine move is a lookup. `history` stores every position visited,
/// starting with the root, for `undo`.
pub struct Match<'a> {
    tree: &'a StateTree,
    mode: MinimizerMode,
    evaluations: Vec<Evaluation>,
    current: NodeId,
    history: Vec<NodeId>,
}

impl<'a> Match<'a> {
    /// Starts a match at the root of `tree`.
    pub fn new(tree: &'a StateTree, mode: MinimizerMode) -> Self {
        let evaluations = Minimax::new(tree, mode).annotate();
        Match {
            tree,
            mode,
            evaluations,
            current: tree.root(),
            history: vec![tree.root()],
        }
    }

    pub fn mode(&self) -> MinimizerMode {
        self.mode
    }

    pub fn current_id(&self) -> NodeId {
        self.current
    }

    pub fn current(&self) -> &GameState {
        self.tree.node(self.current)
    }

    /// Number of moves played so far.
    pub fn steps(&self) -> usize {
        self.history.len() - 1
    }

    pub fn to_move(&self) -> Player {
        Player::to_move_at(self.current().depth())
    }

    pub fn is_over(&self) -> bool {
        self.current().is_terminal()
    }

    /// Move indices that are legal from the current position.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.current().children().map(|(i, _)| i).collect()
    }

    /// Minimax evaluation of the current position.
    pub fn evaluation(&self) -> Evaluation {
        self.evaluations[self.current]
    }

    /// Plays the engine's recommended move for the maximizing player.
    ///
    /// # Returns
    /// * `Ok(move_index)` of the move that was played.
    /// * `Err(Error::GameOver)` if the game has ended.
    /// * `Err(Error::OutOfTurn)` if it is the minimizing player's turn.
    pub fn play_engine_move(&mut self) -> Result<usize> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        if self.to_move() != Player::Maximizer {
            return Err(Error::OutOfTurn {
                expected: Player::Maximizer.name(),
            });
        }
        let move_index = self
            .evaluation()
            .best_move
            .expect("non-terminal state has a recommended move");
        self.advance(move_index)?;
        log::debug!(
            "engine played move {} ({}) at depth {}",
            move_index,
            self.tree.rules()[move_index],
            self.current().depth() - 1
        );
        Ok(move_index)
    }

    /// Plays an externally chosen move for the minimizing player.
    ///
    /// # Arguments
    /// * `move_index`: Index into the move table, `0..6`.
    ///
    /// # Returns
    /// * `Ok(())` when the move was legal and has been played.
    /// * `Err(Error::IllegalMove)` when the index is out of range or the move
    ///   is not legal here; the position is unchanged and the caller may retry.
    /// * `Err(Error::GameOver)` or `Err(Error::OutOfTurn)` as for engine moves.
    pub fn play_opponent_move(&mut self, move_index: usize) -> Result<()> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        if self.to_move() != Player::Minimizer {
            return Err(Error::OutOfTurn {
                expected: Player::Minimizer.name(),
            });
        }
        self.advance(move_index)
    }

    fn advance(&mut self, move_index: usize) -> Result<()> {
        if move_index >= NUM_MOVES {
            return Err(Error::IllegalMove {
                index: move_index,
                reason: "no such move",
            });
        }
        let child = self.current().child(move_index).ok_or(Error::IllegalMove {
            index: move_index,
            reason: "pile too small",
        })?;
        self.current = child;
        self.history.push(child);
        Ok(())
    }

    /// Rolls back to the previous position where the minimizing player was to move.
    ///
    /// Returns `false` if there is no such earlier position.
    pub fn undo(&mut self) -> bool {
        let Some(target) = self
            .history
            .iter()
            .rposition(|&id| id != self.current && !self.tree.node(id).is_maximizing())
        else {
            return false;
        };
        self.history.truncate(target + 1);
        self.current = self.history[target];
        true
    }

    /// The player who made the move into the terminal state, once the game is over.
    ///
    /// A match started from an already terminal position has no winner.
    pub fn winner(&self) -> Option<Player> {
        let state = self.current();
        if !state.is_terminal() || state.depth() == 0 {
            return None;
        }
        Some(Player::to_move_at(state.depth() - 1))
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
    fn test_match_starts_with_maximizer() {
        let tree = StateTree::build(&config()).unwrap();
        let game = Match::new(&tree, MinimizerMode::default());
        assert_eq!(game.to_move(), Player::Maximizer);
        assert_eq!(game.steps(), 0);
        assert_eq!(game.legal_moves(), vec![0, 1, 2, 3, 4, 5]);
        assert!(!game.is_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_turns_must_alternate() {
        let tree = StateTree::build(&config()).unwrap();
        let mut game = Match::new(&tree, MinimizerMode::Optimal);
        assert!(matches!(
            game.play_opponent_move(0),
            Err(Error::OutOfTurn { .. })
        ));
        game.play_engine_move().unwrap();
        assert_eq!(game.to_move(), Player::Minimizer);
        assert!(matches!(game.play_engine_move(), Err(Error::OutOfTurn { .. })));
    }

    #[test]
    fn test_engine_follows_recommendation() {
        let tree = StateTree::build_from(&config(), Piles::new(2, 0, 0)).unwrap();
        let mut game = Match::new(&tree, MinimizerMode::Optimal);
        assert_eq!(game.mode(), MinimizerMode::Optimal);
        assert_eq!(game.play_engine_move().unwrap(), 3);
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Player::Maximizer));
        assert_eq!(game.play_engine_move(), Err(Error::GameOver));
    }

    #[test]
    fn test_illegal_opponent_move_is_rejected() {
        let tree = StateTree::build_from(&config(), Piles::new(1, 1, 0)).unwrap();
        let mut game = Match::new(&tree, MinimizerMode::Optimal);
        game.play_engine_move().unwrap();
        let before = game.current_id();
        assert!(matches!(
            game.play_opponent_move(6),
            Err(Error::IllegalMove { index: 6, .. })
        ));
        assert!(matches!(
            game.play_opponent_move(3),
            Err(Error::IllegalMove { index: 3, .. })
        ));
        assert_eq!(game.current_id(), before);
    }

    #[test]
    fn test_minimizer_can_win() {
        // Engine takes -1 G (tie-break), minimizer empties the red pile.
        let tree = StateTree::build_from(&config(), Piles::new(1, 1, 0)).unwrap();
        let mut game = Match::new(&tree, MinimizerMode::Optimal);
        assert_eq!(game.play_engine_move().unwrap(), 1);
        assert_eq!(game.legal_moves(), vec![0]);
        game.play_opponent_move(0).unwrap();
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Player::Minimizer));
        assert_eq!(game.steps(), 2);
    }

    #[test]
    fn test_full_game_terminates() {
        let tree = StateTree::build(&config()).unwrap();
        let mut game = Match::new(&tree, MinimizerMode::default());
        while !game.is_over() {
            match game.to_move() {
                Player::Maximizer => {
                    game.play_engine_move().unwrap();
                }
                Player::Minimizer => {
                    let first = game.legal_moves()[0];
                    game.play_opponent_move(first).unwrap();
                }
            }
        }
        assert!(game.current().piles().is_empty());
        let winner = game.winner().unwrap();
        assert_eq!(winner, Player::to_move_at(game.current().depth() - 1));
    }

    #[test]
    fn test_undo_returns_to_previous_opponent_turn() {
        let tree = StateTree::build(&config()).unwrap();
        let mut game = Match::new(&tree, MinimizerMode::default());
        assert!(!game.undo());

        game.play_engine_move().unwrap();
        let first_decision = game.current_id();
        assert!(!game.undo(), "no earlier minimizer decision to return to");

        game.play_opponent_move(game.legal_moves()[0]).unwrap();
        game.play_engine_move().unwrap();
        assert!(game.undo());
        assert_eq!(game.current_id(), first_decision);
        assert_eq!(game.steps(), 1);
        assert_eq!(game.to_move(), Player::Minimizer);
    }
}

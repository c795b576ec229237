//! Take-away game over three colored piles and its fully materialised state tree.
//!
//! This module defines:
//! - `Pile` and `Piles`: the three token piles (red, green, yellow).
//! - `MoveRule`: one of the six fixed moves; `move_rules` builds the table
//!   for a given `GameConfig`.
//! - `GameState`: a node of the tree, with its piles, depth, child slots and
//!   a non-owning parent link.
//! - `StateTree`: an arena owning every reachable state, built eagerly from
//!   the initial configuration.
use crate::config::GameConfig;
use crate::error::{Error, Result};
use std::fmt;

/// Number of move rules, and therefore child slots per state.
pub const NUM_MOVES: usize = 6;

/// Index of a `GameState` inside its `StateTree`.
pub type NodeId = usize;

/// One of the three token piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pile {
    Red,
    Green,
    Yellow,
}

impl Pile {
    /// Single-letter name used in move descriptions.
    pub fn to_char(&self) -> char {
        match self {
            Pile::Red => 'R',
            Pile::Green => 'G',
            Pile::Yellow => 'Y',
        }
    }
}

/// Token counts of the three piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piles {
    pub red: u32,
    pub green: u32,
    pub yellow: u32,
}

impl Piles {
    pub fn new(red: u32, green: u32, yellow: u32) -> Self {
        Piles { red, green, yellow }
    }

    /// Piles with `m` tokens each, the standard starting position.
    pub fn uniform(m: u32) -> Self {
        Piles::new(m, m, m)
    }

    pub fn get(&self, pile: Pile) -> u32 {
        match pile {
            Pile::Red => self.red,
            Pile::Green => self.green,
            Pile::Yellow => self.yellow,
        }
    }

    pub fn total(&self) -> u32 {
        self.red + self.green + self.yellow
    }

    /// All piles are empty; the game is over.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Applies `rule`, or returns `None` when the target pile is too small.
    ///
    /// # Examples
    /// ```
    /// use pile_search::game::{MoveRule, Pile, Piles};
    /// let piles = Piles::new(1, 3, 0);
    /// let rule = MoveRule { pile: Pile::Green, amount: 2 };
    /// assert_eq!(piles.apply(rule), Some(Piles::new(1, 1, 0)));
    /// let rule = MoveRule { pile: Pile::Yellow, amount: 1 };
    /// assert_eq!(piles.apply(rule), None);
    /// ```
    pub fn apply(&self, rule: MoveRule) -> Option<Piles> {
        let mut next = *self;
        let slot = match rule.pile {
            Pile::Red => &mut next.red,
            Pile::Green => &mut next.green,
            Pile::Yellow => &mut next.yellow,
        };
        *slot = slot.checked_sub(rule.amount)?;
        Some(next)
    }
}

impl fmt::Display for Piles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R: {:<3} G: {:<3} Y: {:<3}", self.red, self.green, self.yellow)
    }
}

/// Removal of `amount` tokens from `pile`. Legal iff the pile holds at least `amount`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveRule {
    pub pile: Pile,
    pub amount: u32,
}

impl fmt::Display for MoveRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{} {}", self.amount, self.pile.to_char())
    }
}

/// Builds the fixed move table `[-1 R, -1 G, -1 Y, -K1 R, -K2 G, -K3 Y]`.
///
/// The position of a rule in this table is its move index everywhere else
/// in the crate (child slots, recommendations, player input).
pub fn move_rules(config: &GameConfig) -> [MoveRule; NUM_MOVES] {
    [
        MoveRule { pile: Pile::Red, amount: 1 },
        MoveRule { pile: Pile::Green, amount: 1 },
        MoveRule { pile: Pile::Yellow, amount: 1 },
        MoveRule { pile: Pile::Red, amount: config.k1() },
        MoveRule { pile: Pile::Green, amount: config.k2() },
        MoveRule { pile: Pile::Yellow, amount: config.k3() },
    ]
}

/// A node of the game tree.
///
/// Child slot `i` holds the state reached by move rule `i`, or `None` when
/// that move is illegal. Once the tree is built a node never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    piles: Piles,
    depth: u32,
    children: [Option<NodeId>; NUM_MOVES],
    parent: Option<NodeId>,
}

impl GameState {
    pub fn piles(&self) -> Piles {
        self.piles
    }

    /// Number of moves played from the root to reach this state.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn child(&self, move_index: usize) -> Option<NodeId> {
        self.children.get(move_index).copied().flatten()
    }

    /// Iterates over `(move_index, child)` for every non-empty child slot.
    pub fn children(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|child| (i, child)))
    }

    pub fn is_terminal(&self) -> bool {
        self.piles.is_empty()
    }

    /// The maximizing player moves from even depths.
    pub fn is_maximizing(&self) -> bool {
        self.depth % 2 == 0
    }
}

/// The complete tree of reachable game states.
///
/// Nodes live in a single arena in depth-first pre-order, so the root is
/// always `0` and every child has a larger id than its parent. Dropping the
/// tree frees every node at once.
#[derive(Clone, Debug)]
pub struct StateTree {
    config: GameConfig,
    rules: [MoveRule; NUM_MOVES],
    nodes: Vec<GameState>,
}

impl StateTree {
    /// Builds the tree starting from piles `(M, M, M)`.
    pub fn build(config: &GameConfig) -> Result<Self> {
        Self::build_from(config, Piles::uniform(config.m()))
    }

    /// Builds the tree starting from an arbitrary position.
    ///
    /// Every legal move of every non-terminal state is expanded, in move
    /// table order, before this returns. No pile may start above `M`, which
    /// keeps every game within the scoring horizon of `config`.
    ///
    /// # Returns
    /// * `Ok(StateTree)` with every leaf terminal.
    /// * `Err(Error::Configuration)` if a pile of `initial` exceeds `M`.
    /// * `Err(Error::ResourceExhaustion)` if the arena cannot grow. The partial
    ///   arena is dropped before returning.
    pub fn build_from(config: &GameConfig, initial: Piles) -> Result<Self> {
        for (parameter, pile) in [
            ("red pile", Pile::Red),
            ("green pile", Pile::Green),
            ("yellow pile", Pile::Yellow),
        ] {
            let tokens = initial.get(pile);
            if tokens > config.m() {
                return Err(Error::Configuration {
                    parameter,
                    value: tokens.into(),
                    range: format!("interval [0,{}]", config.m()),
                });
            }
        }
        let mut tree = StateTree {
            config: *config,
            rules: move_rules(config),
            nodes: Vec::new(),
        };
        let root = tree.push(GameState {
            piles: initial,
            depth: 0,
            children: [None; NUM_MOVES],
            parent: None,
        })?;
        tree.expand(root)?;
        log::debug!(
            "built game tree from [{}]: {} states",
            initial,
            tree.nodes.len()
        );
        Ok(tree)
    }

    fn push(&mut self, state: GameState) -> Result<NodeId> {
        self.nodes
            .try_reserve(1)
            .map_err(|_| Error::ResourceExhaustion {
                operation: "building the game tree",
            })?;
        self.nodes.push(state);
        Ok(self.nodes.len() - 1)
    }

    fn expand(&mut self, id: NodeId) -> Result<()> {
        let parent = self.nodes[id].clone();
        if parent.is_terminal() {
            return Ok(());
        }
        let rules = self.rules;
        for (i, rule) in rules.into_iter().enumerate() {
            let Some(piles) = parent.piles.apply(rule) else {
                continue;
            };
            let child = self.push(GameState {
                piles,
                depth: parent.depth + 1,
                children: [None; NUM_MOVES],
                parent: Some(id),
            })?;
            self.nodes[id].children[i] = Some(child);
            self.expand(child)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rules(&self) -> &[MoveRule; NUM_MOVES] {
        &self.rules
    }

    pub fn root(&self) -> NodeId {
        0
    }

    /// Returns the state with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &GameState {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all `(id, state)` pairs in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &GameState)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// Renders the tree as a Graphviz `strict graph`.
    ///
    /// Each node is labelled `"id: r g y"`. The output is meant for an
    /// external renderer such as `dot`; nothing in the crate reads it back.
    pub fn to_dot(&self) -> String {
        let mut output = String::from("strict graph {\n");
        for (id, state) in self.iter() {
            let label = dot_label(id, state);
            match state.parent {
                None => output.push_str(&format!("  {}\n", label)),
                Some(p) => output.push_str(&format!(
                    "  {} -- {}\n",
                    label,
                    dot_label(p, &self.nodes[p])
                )),
            }
        }
        output.push_str("}\n");
        output
    }
}

fn dot_label(id: NodeId, state: &GameState) -> String {
    let p = state.piles;
    format!("\"{}: {} {} {}\"", id, p.red, p.green, p.yellow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::new(3, 2, 2, 2).unwrap()
    }

    #[test]
    fn test_move_rules_order() {
        let config = GameConfig::new(5, 2, 3, 4).unwrap();
        let rules = move_rules(&config);
        assert_eq!(rules[0], MoveRule { pile: Pile::Red, amount: 1 });
        assert_eq!(rules[2], MoveRule { pile: Pile::Yellow, amount: 1 });
        assert_eq!(rules[3], MoveRule { pile: Pile::Red, amount: 2 });
        assert_eq!(rules[4], MoveRule { pile: Pile::Green, amount: 3 });
        assert_eq!(rules[5], MoveRule { pile: Pile::Yellow, amount: 4 });
        assert_eq!(rules[5].to_string(), "-4 Y");
    }

    #[test]
    fn test_root_is_uniform() {
        let tree = StateTree::build(&config()).unwrap();
        let root = tree.node(tree.root());
        assert_eq!(root.piles(), Piles::uniform(3));
        assert_eq!(root.depth(), 0);
        assert_eq!(root.parent(), None);
        assert_eq!(root.children().count(), NUM_MOVES);
    }

    #[test]
    fn test_tree_size_for_m3() {
        let tree = StateTree::build(&config()).unwrap();
        assert_eq!(tree.len(), 20761);
    }

    #[test]
    fn test_leaves_are_terminal_and_internal_nodes_have_children() {
        for (m, k1, k2, k3) in [(3, 2, 2, 2), (4, 3, 2, 3), (4, 2, 3, 2)] {
            let config = GameConfig::new(m, k1, k2, k3).unwrap();
            let tree = StateTree::build(&config).unwrap();
            for (id, state) in tree.iter() {
                if state.is_terminal() {
                    assert_eq!(state.children().count(), 0, "node {}", id);
                } else {
                    assert!(state.children().count() >= 1, "node {}", id);
                }
                assert!(state.depth() <= 3 * m, "node {}", id);
            }
        }
    }

    #[test]
    fn test_build_from_rejects_pile_above_m() {
        let err = StateTree::build_from(&config(), Piles::new(11, 0, 0)).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration { parameter: "red pile", value: 11, .. }
        ));
        let err = StateTree::build_from(&config(), Piles::new(3, 3, 4)).unwrap_err();
        assert!(err.to_string().contains("interval [0,3]"));
        assert!(StateTree::build_from(&config(), Piles::new(3, 3, 3)).is_ok());
    }

    #[test]
    fn test_child_is_parent_minus_its_rule() {
        let tree = StateTree::build(&config()).unwrap();
        for (id, state) in tree.iter() {
            for (i, child) in state.children() {
                let child_state = tree.node(child);
                assert_eq!(child_state.parent(), Some(id));
                assert_eq!(child_state.depth(), state.depth() + 1);
                assert!(child > id, "pre-order ids must increase");
                let rule = tree.rules()[i];
                assert_eq!(state.piles().apply(rule), Some(child_state.piles()));
                assert_eq!(
                    state.piles().total() - child_state.piles().total(),
                    rule.amount
                );
            }
        }
    }

    #[test]
    fn test_illegal_moves_leave_empty_slots() {
        let tree = StateTree::build_from(&config(), Piles::new(1, 0, 2)).unwrap();
        let root = tree.node(tree.root());
        assert!(root.child(0).is_some()); // -1 R
        assert!(root.child(1).is_none()); // -1 G, pile empty
        assert!(root.child(2).is_some()); // -1 Y
        assert!(root.child(3).is_none()); // -2 R, only 1 red
        assert!(root.child(4).is_none());
        assert!(root.child(5).is_some()); // -2 Y
        assert!(root.child(NUM_MOVES).is_none());
    }

    #[test]
    fn test_terminal_root() {
        let tree = StateTree::build_from(&config(), Piles::new(0, 0, 0)).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.node(0).is_terminal());
    }

    #[test]
    fn test_to_dot_format() {
        let tree = StateTree::build_from(&config(), Piles::new(1, 0, 0)).unwrap();
        let dot = tree.to_dot();
        assert_eq!(dot, "strict graph {\n  \"0: 1 0 0\"\n  \"1: 0 0 0\" -- \"0: 1 0 0\"\n}\n");
    }
}

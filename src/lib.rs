//! # Pile Search Library
//!
//! This library implements two classic search techniques over small synthetic
//! state spaces:
//! - Full-tree minimax for a take-away game played on three colored piles.
//! - A* and Uniform-Cost Search over a random implicit graph of symbol
//!   vectors, where two vectors are neighbors when they differ in one symbol.
//!
//! It is used by three binaries:
//! - `takeaway`: Plays the take-away game interactively, with the engine as
//!   the maximizing player.
//! - `pathfinder`: Generates a random state space, reads a source and two
//!   goals, and compares UCS against A* on both queries.
//! - `search_benchmark`: Compares UCS against A* over many seeded random
//!   state spaces and reports average savings.
//!
//! ## Modules
//! - `config`: Validated parameters for the game (`GameConfig`) and the state space (`SpaceConfig`).
//! - `error`: The crate-wide `Error` type.
//! - `game`: Piles, the six move rules, and the eagerly built `StateTree`.
//! - `minimax`: Depth-sensitive minimax with a configurable minimizing player.
//! - `play`: `Match`, the turn-by-turn game loop.
//! - `adjacency`: Neighbor test and weighted Hamming edge cost.
//! - `space`: `Vertex` and the random `StateSpace`.
//! - `frontier`: The open-set bag used by best-first search.
//! - `search`: `BestFirstSearch` and `SearchSolution`.
//! - `compare`: UCS vs A* comparison.
//! - `utils`: Parsing state spaces from string literals.

pub mod adjacency;
pub mod compare;
pub mod config;
pub mod error;
pub mod frontier;
pub mod game;
pub mod minimax;
pub mod play;
pub mod search;
pub mod space;
pub mod utils;

pub use error::{Error, Result};

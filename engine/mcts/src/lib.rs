//! Monte Carlo Tree Search (MCTS) move selection.
//!
//! This crate provides a game-agnostic UCT search that works with any game
//! implementing the `engine-core` [`Game`](engine_core::Game) trait. The game
//! state is mutated in place and every move is undone, so a search never
//! clones positions after the initial copy.
//!
//! # Overview
//!
//! Each iteration consists of four phases:
//!
//! 1. **Selection**: Traverse the tree by UCT score, `Q + C * sqrt(ln N / (1 + n))`,
//!    applying each chosen move to the working state
//! 2. **Evaluation**: Play uniformly random moves to the end of the game and
//!    score the result for the leaf, then undo the play-out
//! 3. **Expansion**: Give the leaf one child per legal move
//! 4. **Backpropagation**: Fold the result into every node on the path,
//!    flipping it at each level
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Move, Position};
//! use games_tictactoe::{TicTacToe, X};
//! use mcts::{MctsConfig, MctsEngine};
//!
//! // X | X | _
//! // O | O | _
//! // _ | _ | _
//! let game = TicTacToe::from_moves(&[0, 3, 1, 4]).unwrap();
//!
//! let mut engine = MctsEngine::new(MctsConfig::for_testing());
//! let result = engine.decide(&game, X).unwrap();
//! assert_eq!(result.mv, Move::new(Position(2), X));
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `budget`: wall-clock time or a fixed number of iterations (default: 1s)
//! - `exploration_constant`: C in the UCT formula (default: 1.5)
//! - `planned_iterations`: arena sizing for time budgets (default: 3200)
//! - `seed`: fixed RNG seed for reproducible searches
//!
//! Defaults come from `config.defaults.toml`; [`MctsConfig::load`] also reads
//! `config.toml` and `PLAYOUT_*` environment overrides.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       MctsEngine                        │
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────┐  │
//! │  │  NodeArena  │  │ RolloutPolicy│  │  ChaCha20Rng   │  │
//! │  └──────┬──────┘  └──────┬───────┘  └───────┬────────┘  │
//! │         └────────────────┼──────────────────┘           │
//! │                          ▼                              │
//! │   MctsSearch (working game state behind UndoScope)      │
//! │       select → evaluate → expand → backpropagate        │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod arena;
pub mod config;
pub mod node;
pub mod rollout;
pub mod search;

// Re-export main types
pub use arena::{NodeArena, TreeStats};
pub use config::{MctsConfig, SearchBudget};
pub use node::{MctsNode, NodeId, UNSET_PRIOR};
pub use rollout::{FirstLegalRollout, RolloutPolicy, UniformRollout};
pub use search::{run_mcts, MctsEngine, MctsSearch, SearchError, SearchResult};

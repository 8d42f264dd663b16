//! MCTS search implementation.
//!
//! Implements the core MCTS loop over a live, undoable game state:
//! 1. Selection: walk the tree by UCT score, applying each chosen move
//! 2. Evaluation: random play-out to a terminal state, then undo it
//! 3. Expansion: attach one child per legal move to the selected leaf
//! 4. Backpropagation: fold the play-out result into every node on the path
//!
//! Every move applied during an iteration is undone before the next one
//! starts. [`UndoScope`] guards enforce this on every exit path, including
//! errors returned with `?`.

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use engine_core::{legal_positions, Color, Game, IllegalMove, Move, Position, UndoScope};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::arena::NodeArena;
use crate::config::{MctsConfig, SearchBudget};
use crate::node::NodeId;
use crate::rollout::{RolloutPolicy, UniformRollout};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("game rejected a search move: {0}")]
    IllegalMove(#[from] IllegalMove),

    #[error("non-terminal position has no legal moves")]
    NoLegalMoves,

    #[error("no root move was visited, no decision available")]
    NoDecision,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Chosen move, colored by the player to move
    pub mv: Move,

    /// Visits of the chosen root child
    pub visits: u32,

    /// Mean value of the chosen root child, from the mover's point of view
    pub value: f32,

    /// Visit fraction of each position at the root (indexed by position)
    pub policy: Vec<f32>,

    /// Number of iterations performed
    pub iterations: u32,

    /// Arena slots used by the tree
    pub nodes_used: usize,

    pub elapsed: Duration,
}

/// Owns the node arena, RNG and scratch buffers reused across decisions.
///
/// Construct once and call [`MctsEngine::decide`] (or
/// [`MctsEngine::new_tree`] followed by [`MctsSearch::run`]) per move.
pub struct MctsEngine<G: Game, P: RolloutPolicy = UniformRollout> {
    arena: NodeArena,
    config: MctsConfig,
    policy: P,
    rng: ChaCha20Rng,
    /// Nodes visited by the current iteration, root first
    path: Vec<NodeId>,
    /// Legal positions at the current leaf; first rollout step and expansion share them
    candidates: Vec<Position>,
    /// Legal positions deeper in the play-out
    scratch: Vec<Position>,
    _game: PhantomData<fn() -> G>,
}

impl<G: Game> MctsEngine<G> {
    /// Create an engine with uniformly random rollouts.
    pub fn new(config: MctsConfig) -> Self {
        Self::with_policy(config, UniformRollout)
    }
}

impl<G: Game, P: RolloutPolicy> MctsEngine<G, P> {
    /// Create an engine with a custom rollout policy.
    ///
    /// The arena is sized once here for the configured budget.
    pub fn with_policy(config: MctsConfig, policy: P) -> Self {
        let capacity = NodeArena::capacity_for(config.capacity_iterations(), G::ACTION_SPACE);
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };

        Self {
            arena: NodeArena::with_capacity(capacity),
            config,
            policy,
            rng,
            path: Vec::new(),
            candidates: Vec::with_capacity(G::ACTION_SPACE),
            scratch: Vec::with_capacity(G::ACTION_SPACE),
            _game: PhantomData,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// The tree of the most recent search.
    pub fn tree(&self) -> &NodeArena {
        &self.arena
    }

    /// Start a search from a copy of `state`, with its current player to move.
    pub fn new_tree(&mut self, state: &G) -> MctsSearch<'_, G, P> {
        self.start(state.clone())
    }

    /// Search `state` with `color` to move and return the chosen move.
    pub fn decide(&mut self, state: &G, color: Color) -> Result<SearchResult, SearchError> {
        let mut game = state.clone();
        game.set_turn_color(color);
        self.start(game).run()
    }

    fn start(&mut self, game: G) -> MctsSearch<'_, G, P> {
        // The root stands for the move that produced this position.
        let root_move = Move::sentinel(game.opponent_of(game.turn_color()));
        self.arena.reset(root_move);
        self.path.clear();

        MctsSearch {
            engine: self,
            game,
            iterations: 0,
        }
    }

    /// Walk from the root to a leaf, applying each selected move.
    ///
    /// Fills `self.path` with the visited nodes, root first.
    fn select(&mut self, game: &mut G) -> Result<NodeId, SearchError> {
        let exploration = self.config.exploration_constant;
        self.path.clear();

        let mut current = NodeId::ROOT;
        self.path.push(current);
        while let Some(next) = self.arena.select_child(current, exploration) {
            game.apply(self.arena.get(next).mv)?;
            self.path.push(next);
            current = next;
        }
        Ok(current)
    }

    /// Play out to a terminal state and score it for the leaf's mover.
    ///
    /// Returns 1 if the player to move at the leaf loses, 0 if it wins and
    /// 0.5 for a draw. The play-out is undone before returning; the leaf's
    /// legal moves stay in `self.candidates` for expansion.
    fn evaluate(&mut self, game: &mut G) -> Result<f32, SearchError> {
        let to_move = game.turn_color();
        legal_positions(game, &mut self.candidates);

        let mut playout = UndoScope::new(game);
        if !playout.is_terminal() {
            if self.candidates.is_empty() {
                return Err(SearchError::NoLegalMoves);
            }
            let mut position = self
                .policy
                .choose(&*playout, &self.candidates, &mut self.rng);

            loop {
                let color = playout.turn_color();
                playout.apply(Move::new(position, color))?;
                if playout.is_terminal() {
                    break;
                }

                legal_positions(&*playout, &mut self.scratch);
                if self.scratch.is_empty() {
                    return Err(SearchError::NoLegalMoves);
                }
                position = self.policy.choose(&*playout, &self.scratch, &mut self.rng);
            }
        }

        let value = match playout.outcome() {
            Some(winner) if winner == to_move => 0.0,
            Some(_) => 1.0,
            None => 0.5,
        };
        Ok(value)
    }

    /// Attach the leaf's legal moves as children unless the game is over there.
    fn expand(&mut self, leaf: NodeId, game: &G) -> usize {
        if game.is_terminal() {
            return 0;
        }
        self.arena.expand(leaf, game.turn_color(), &self.candidates)
    }

    fn backpropagate(&mut self, value: f32) {
        self.arena.backpropagate(&self.path, value);
    }
}

/// One search, from `new_tree` to its decision.
///
/// Holds the working copy of the game state. `run` consumes the session, so
/// each tree is searched at most once.
pub struct MctsSearch<'a, G: Game, P: RolloutPolicy = UniformRollout> {
    engine: &'a mut MctsEngine<G, P>,
    game: G,
    iterations: u32,
}

impl<'a, G: Game, P: RolloutPolicy> MctsSearch<'a, G, P> {
    /// Run one selection / evaluation / expansion / backpropagation cycle.
    ///
    /// The working state is back to its starting position when this returns,
    /// whether it succeeds or not.
    pub fn iterate(&mut self) -> Result<(), SearchError> {
        let engine = &mut *self.engine;
        let mut scope = UndoScope::new(&mut self.game);

        let leaf = engine.select(&mut *scope)?;
        let value = engine.evaluate(&mut *scope)?;
        let expanded = engine.expand(leaf, &*scope);
        engine.backpropagate(value);
        drop(scope);

        self.iterations += 1;
        trace!(
            iteration = self.iterations,
            leaf = leaf.0,
            path_len = engine.path.len(),
            expanded,
            value,
            nodes_used = engine.arena.used(),
            "MCTS iteration complete"
        );
        Ok(())
    }

    /// Iterate until the budget is spent, then pick the most visited root move.
    pub fn run(mut self) -> Result<SearchResult, SearchError> {
        let started = Instant::now();

        match self.engine.config.budget {
            SearchBudget::Iterations(n) => {
                for _ in 0..n {
                    self.iterate()?;
                }
            }
            SearchBudget::Time(limit) => {
                while started.elapsed() < limit {
                    // Another expansion may not fit
                    if self.engine.arena.remaining() < G::ACTION_SPACE {
                        warn!(
                            iterations = self.iterations,
                            capacity = self.engine.arena.capacity(),
                            "Node arena full, stopping search before time limit"
                        );
                        break;
                    }
                    self.iterate()?;
                }
            }
        }

        let elapsed = started.elapsed();
        let arena = &self.engine.arena;
        let best = arena.get(arena.best_child().ok_or(SearchError::NoDecision)?);

        let result = SearchResult {
            mv: best.mv,
            visits: best.visit_count,
            value: best.mean_value,
            policy: arena.root_policy(G::ACTION_SPACE),
            iterations: self.iterations,
            nodes_used: arena.used(),
            elapsed,
        };

        debug!(
            iterations = result.iterations,
            nodes_used = result.nodes_used,
            elapsed_ms = result.elapsed.as_millis() as u64,
            mv = %result.mv,
            visits = result.visits,
            value = result.value,
            "MCTS search finished"
        );
        Ok(result)
    }

    /// The most visited root move so far.
    pub fn decide_action(&self) -> Result<Move, SearchError> {
        let arena = &self.engine.arena;
        arena
            .best_child()
            .map(|id| arena.get(id).mv)
            .ok_or(SearchError::NoDecision)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &NodeArena {
        &self.engine.arena
    }

    /// The working state. Equal to the searched position between iterations.
    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<G: Game>(
    state: &G,
    color: Color,
    config: MctsConfig,
) -> Result<SearchResult, SearchError> {
    MctsEngine::new(config).decide(state, color)
}

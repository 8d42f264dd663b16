//! Rollout policies for the evaluation phase.
//!
//! A policy picks the next move of a random play-out. The search enumerates
//! the legal positions itself and passes them in, so a policy only chooses.

use engine_core::{Game, Position};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Chooses play-out moves.
pub trait RolloutPolicy {
    /// Pick one of `legal` (never empty) for the player to move in `game`.
    fn choose<G: Game>(&mut self, game: &G, legal: &[Position], rng: &mut ChaCha20Rng)
        -> Position;
}

/// Uniformly random among the legal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRollout;

impl RolloutPolicy for UniformRollout {
    #[inline]
    fn choose<G: Game>(
        &mut self,
        _game: &G,
        legal: &[Position],
        rng: &mut ChaCha20Rng,
    ) -> Position {
        legal[rng.gen_range(0..legal.len())]
    }
}

/// Always the lowest legal position. Deterministic; useful for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegalRollout;

impl RolloutPolicy for FirstLegalRollout {
    #[inline]
    fn choose<G: Game>(
        &mut self,
        _game: &G,
        legal: &[Position],
        _rng: &mut ChaCha20Rng,
    ) -> Position {
        legal[0]
    }
}

//! Scoped rollback of a live game state
//!
//! The search mutates one working state destructively. [`UndoScope`] records
//! how many moves were applied when it was opened and undoes everything
//! applied after that point when it is dropped, whichever way the scope exits.
//!
//! # Example
//!
//! ```rust,ignore
//! use engine_core::UndoScope;
//!
//! let before = game.applied_move_count();
//! {
//!     let mut scope = UndoScope::new(&mut game);
//!     scope.apply(mv)?;
//!     assert_eq!(scope.depth(), 1);
//! } // move reverted here
//! assert_eq!(game.applied_move_count(), before);
//! ```

use std::ops::{Deref, DerefMut};

use crate::typed::{Game, IllegalMove, Move};

/// Guard that reverts every move applied through it (or through the borrowed
/// game) once it goes out of scope.
///
/// Scopes nest: a rollout opens its own scope on top of the selection scope,
/// and the inner one is rolled back first.
#[derive(Debug)]
pub struct UndoScope<'a, G: Game> {
    game: &'a mut G,
    base: usize,
}

impl<'a, G: Game> UndoScope<'a, G> {
    /// Open a scope at the current applied-move count.
    pub fn new(game: &'a mut G) -> Self {
        let base = game.applied_move_count();
        Self { game, base }
    }

    /// Apply a move inside this scope.
    #[inline]
    pub fn apply(&mut self, mv: Move) -> Result<(), IllegalMove> {
        self.game.apply(mv)
    }

    /// Moves applied since the scope was opened.
    #[inline]
    pub fn depth(&self) -> usize {
        self.game.applied_move_count().saturating_sub(self.base)
    }

    /// Applied-move count the scope rolls back to.
    #[inline]
    pub fn base(&self) -> usize {
        self.base
    }
}

impl<G: Game> Deref for UndoScope<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.game
    }
}

impl<G: Game> DerefMut for UndoScope<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.game
    }
}

impl<G: Game> Drop for UndoScope<'_, G> {
    fn drop(&mut self) {
        while self.game.applied_move_count() > self.base {
            if self.game.undo().is_none() {
                break;
            }
        }

        // A mismatch here means the working state no longer matches the
        // position the caller believes it is in.
        if !std::thread::panicking() {
            assert_eq!(
                self.game.applied_move_count(),
                self.base,
                "apply/undo desynchronized: scope opened at {} moves",
                self.base
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Race;
    use crate::typed::{Color, Position};

    #[test]
    fn test_scope_rolls_back_on_drop() {
        let mut game = Race::new(4);
        {
            let mut scope = UndoScope::new(&mut game);
            scope.apply(Move::new(Position(0), Color::Black)).unwrap();
            scope.apply(Move::new(Position(1), Color::White)).unwrap();
            assert_eq!(scope.depth(), 2);
            assert_eq!(scope.base(), 0);
        }
        assert_eq!(game, Race::new(4));
    }

    #[test]
    fn test_nested_scopes() {
        let mut game = Race::new(4);
        let mut outer = UndoScope::new(&mut game);
        outer.apply(Move::new(Position(0), Color::Black)).unwrap();
        {
            let mut inner = UndoScope::new(&mut *outer);
            assert_eq!(inner.base(), 1);
            inner.apply(Move::new(Position(1), Color::White)).unwrap();
            inner.apply(Move::new(Position(2), Color::Black)).unwrap();
            assert_eq!(inner.depth(), 2);
        }
        assert_eq!(outer.depth(), 1);
        assert_eq!(outer.applied_move_count(), 1);
    }

    #[test]
    fn test_scope_rolls_back_on_early_return() {
        fn play_until_error(game: &mut Race) -> Result<(), IllegalMove> {
            let mut scope = UndoScope::new(game);
            scope.apply(Move::new(Position(0), Color::Black))?;
            // Position 0 is taken, so this fails and the scope unwinds.
            scope.apply(Move::new(Position(0), Color::White))?;
            Ok(())
        }

        let mut game = Race::new(4);
        assert!(play_until_error(&mut game).is_err());
        assert_eq!(game.applied_move_count(), 0);
    }

    #[test]
    fn test_empty_scope_is_noop() {
        let mut game = Race::new(2);
        game.apply(Move::new(Position(1), Color::Black)).unwrap();
        {
            let scope = UndoScope::new(&mut game);
            assert_eq!(scope.depth(), 0);
        }
        assert_eq!(game.applied_move_count(), 1);
    }
}

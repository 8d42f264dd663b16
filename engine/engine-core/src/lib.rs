//! Core traits and types for the Playout search engine
//!
//! This crate provides the minimal collaborator interface the search needs:
//! - `Game`: typed game-state adapter with destructive apply/undo
//! - `Color`, `Position`, `Move`: what the search records in its tree
//! - `UndoScope`: guard that restores the live state on every exit path
//! - `GridBoard`: shared storage for the bundled grid games

pub mod board_game;
pub mod context;
pub mod game_utils;
pub mod typed;

// Re-export main types for convenience
pub use board_game::{GridBoard, Status};
pub use context::UndoScope;
pub use game_utils::{count_legal, legal_positions, play_sequence};
pub use typed::{Color, Game, IllegalMove, Move, Position};

/// Test utilities (internal use only)
#[cfg(test)]
pub(crate) mod test_utils {
    use crate::typed::{Color, Game, IllegalMove, Move, Position};

    /// Four claimable cells; whoever makes move number `limit` wins.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Race {
        claimed: [Option<Color>; 4],
        history: Vec<Move>,
        to_move: Color,
        limit: usize,
    }

    impl Race {
        pub fn new(limit: usize) -> Self {
            Self {
                claimed: [None; 4],
                history: Vec::new(),
                to_move: Color::Black,
                limit,
            }
        }
    }

    impl Game for Race {
        const ACTION_SPACE: usize = 4;

        fn apply(&mut self, mv: Move) -> Result<(), IllegalMove> {
            if !self.is_legal_move(mv.position, mv.color) {
                return Err(IllegalMove::new(mv, "cell unavailable"));
            }
            self.claimed[mv.position.index()] = Some(mv.color);
            self.history.push(mv);
            self.to_move = mv.color.opponent();
            Ok(())
        }

        fn undo(&mut self) -> Option<Move> {
            let mv = self.history.pop()?;
            self.claimed[mv.position.index()] = None;
            self.to_move = mv.color;
            Some(mv)
        }

        fn is_legal_move(&self, position: Position, color: Color) -> bool {
            !self.is_terminal()
                && color == self.to_move
                && position.index() < Self::ACTION_SPACE
                && self.claimed[position.index()].is_none()
        }

        fn is_terminal(&self) -> bool {
            self.history.len() >= self.limit
        }

        fn turn_color(&self) -> Color {
            self.to_move
        }

        fn set_turn_color(&mut self, color: Color) {
            self.to_move = color;
        }

        fn outcome(&self) -> Option<Color> {
            self.history.last().map(|mv| mv.color)
        }

        fn applied_move_count(&self) -> usize {
            self.history.len()
        }
    }
}

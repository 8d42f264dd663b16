//! Typed game-state adapter consumed by the search engine
//!
//! The search never owns game rules. It drives a [`Game`] destructively:
//! moves are applied in place and reverted with [`Game::undo`] in LIFO order.
//! Implementations only need to keep that contract; board layout, legality
//! and win detection stay inside the game crate.

use std::fmt;

/// Side to move in a two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Index into a game's action space. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(pub u16);

impl Position {
    /// Invalid position carried by sentinel moves.
    pub const NONE: Position = Position(u16::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "none")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A position tagged with the color of the player making the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub position: Position,
    pub color: Color,
}

impl Move {
    pub fn new(position: Position, color: Color) -> Self {
        Self { position, color }
    }

    /// Move with no position, used as the root of a search tree.
    pub fn sentinel(color: Color) -> Self {
        Self {
            position: Position::NONE,
            color,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.position.is_none()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.color, self.position)
    }
}

/// Error returned by [`Game::apply`] when the move breaks the rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal move {color}@{position}: {reason}")]
pub struct IllegalMove {
    pub position: Position,
    pub color: Color,
    pub reason: &'static str,
}

impl IllegalMove {
    pub fn new(mv: Move, reason: &'static str) -> Self {
        Self {
            position: mv.position,
            color: mv.color,
            reason,
        }
    }
}

/// Game-state adapter for two-player, alternating-turn, perfect-information games
///
/// # Contract
///
/// * `apply` mutates the state in place and must be reversible by `undo`.
/// * `undo` reverts the most recent still-applied move and returns it.
/// * `applied_move_count` grows by one per `apply` and shrinks by one per `undo`.
/// * `outcome` is only meaningful once `is_terminal` returns true.
///
/// # Example
///
/// ```rust
/// use engine_core::{Color, Game, IllegalMove, Move, Position};
///
/// /// First player to claim position 0 wins.
/// #[derive(Debug, Clone, Default)]
/// struct Grab {
///     history: Vec<Move>,
/// }
///
/// impl Game for Grab {
///     const ACTION_SPACE: usize = 1;
///
///     fn apply(&mut self, mv: Move) -> Result<(), IllegalMove> {
///         if !self.is_legal_move(mv.position, mv.color) {
///             return Err(IllegalMove::new(mv, "already claimed"));
///         }
///         self.history.push(mv);
///         Ok(())
///     }
///     fn undo(&mut self) -> Option<Move> { self.history.pop() }
///     fn is_legal_move(&self, position: Position, color: Color) -> bool {
///         self.history.is_empty() && position == Position(0) && color == self.turn_color()
///     }
///     fn is_terminal(&self) -> bool { !self.history.is_empty() }
///     fn turn_color(&self) -> Color {
///         self.history.last().map_or(Color::Black, |m| m.color.opponent())
///     }
///     fn set_turn_color(&mut self, _color: Color) {}
///     fn outcome(&self) -> Option<Color> { self.history.last().map(|m| m.color) }
///     fn applied_move_count(&self) -> usize { self.history.len() }
/// }
///
/// let mut game = Grab::default();
/// game.apply(Move::new(Position(0), Color::Black)).unwrap();
/// assert_eq!(game.outcome(), Some(Color::Black));
/// ```
pub trait Game: Clone + fmt::Debug {
    /// Number of positions enumerated when expanding a node.
    ///
    /// This bounds the branching factor and sizes the search arena.
    const ACTION_SPACE: usize;

    /// Apply a move to the live state.
    fn apply(&mut self, mv: Move) -> Result<(), IllegalMove>;

    /// Revert the most recently applied move.
    ///
    /// Returns `None` when there is nothing left to undo.
    fn undo(&mut self) -> Option<Move>;

    fn is_legal_move(&self, position: Position, color: Color) -> bool;

    fn is_terminal(&self) -> bool;

    /// Color of the player to move.
    fn turn_color(&self) -> Color;

    /// Force the color of the player to move.
    fn set_turn_color(&mut self, color: Color);

    fn opponent_of(&self, color: Color) -> Color {
        color.opponent()
    }

    /// Winner of a terminal position, `None` for a draw.
    fn outcome(&self) -> Option<Color>;

    /// Number of moves currently applied (used for checkpoint/rollback).
    fn applied_move_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent().opponent(), Color::Black);
    }

    #[test]
    fn test_position_none() {
        assert!(Position::NONE.is_none());
        assert!(!Position::NONE.is_some());
        assert!(Position(0).is_some());
        assert_eq!(Position(7).index(), 7);
    }

    #[test]
    fn test_sentinel_move() {
        let mv = Move::sentinel(Color::White);
        assert!(mv.is_sentinel());
        assert_eq!(mv.color, Color::White);
        assert!(!Move::new(Position(3), Color::Black).is_sentinel());
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::new(Position(4), Color::Black).to_string(), "black@4");
        assert_eq!(Move::sentinel(Color::White).to_string(), "white@none");

        let err = IllegalMove::new(Move::new(Position(2), Color::White), "occupied");
        assert_eq!(err.to_string(), "illegal move white@2: occupied");
    }
}

//! Shared helpers for driving a [`Game`]
//!
//! These work against the adapter trait only, so search code and tests can
//! enumerate moves and replay openings without knowing the board layout.

use crate::typed::{Game, IllegalMove, Move, Position};

/// Collect every legal position for the player to move into `out`.
///
/// `out` is cleared first so callers can reuse one buffer across calls.
/// Positions are pushed in ascending order.
///
/// # Example
/// ```
/// use engine_core::game_utils::legal_positions;
/// # use engine_core::{Color, Game, IllegalMove, Move, Position};
/// # #[derive(Debug, Clone)]
/// # struct Open;
/// # impl Game for Open {
/// #     const ACTION_SPACE: usize = 3;
/// #     fn apply(&mut self, mv: Move) -> Result<(), IllegalMove> { Err(IllegalMove::new(mv, "frozen")) }
/// #     fn undo(&mut self) -> Option<Move> { None }
/// #     fn is_legal_move(&self, p: Position, _c: Color) -> bool { p.0 != 1 }
/// #     fn is_terminal(&self) -> bool { false }
/// #     fn turn_color(&self) -> Color { Color::Black }
/// #     fn set_turn_color(&mut self, _c: Color) {}
/// #     fn outcome(&self) -> Option<Color> { None }
/// #     fn applied_move_count(&self) -> usize { 0 }
/// # }
///
/// let mut legal = Vec::new();
/// legal_positions(&Open, &mut legal);
/// assert_eq!(legal, vec![Position(0), Position(2)]);
/// ```
pub fn legal_positions<G: Game>(game: &G, out: &mut Vec<Position>) {
    debug_assert_action_space::<G>();
    out.clear();
    let color = game.turn_color();
    for index in 0..G::ACTION_SPACE {
        let position = Position(index as u16);
        if game.is_legal_move(position, color) {
            out.push(position);
        }
    }
}

/// Number of legal positions for the player to move.
pub fn count_legal<G: Game>(game: &G) -> usize {
    debug_assert_action_space::<G>();
    let color = game.turn_color();
    (0..G::ACTION_SPACE)
        .filter(|&index| game.is_legal_move(Position(index as u16), color))
        .count()
}

/// Every action-space index must be representable as a non-sentinel `Position`.
#[inline]
fn debug_assert_action_space<G: Game>() {
    debug_assert!(
        G::ACTION_SPACE <= Position::NONE.index(),
        "ACTION_SPACE {} does not fit in Position",
        G::ACTION_SPACE
    );
}

/// Apply a sequence of positions, each for whichever player is to move.
///
/// Stops at the first illegal move and returns its error; moves applied
/// before it stay applied.
pub fn play_sequence<G: Game>(game: &mut G, positions: &[u16]) -> Result<(), IllegalMove> {
    for &index in positions {
        let color = game.turn_color();
        game.apply(Move::new(Position(index), color))?;
    }
    Ok(())
}

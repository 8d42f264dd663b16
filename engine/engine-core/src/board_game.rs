//! Shared board storage for two-player grid games.
//!
//! TicTacToe and Connect4 both place one stone per move on a fixed grid and
//! need exact undo. [`GridBoard`] keeps the cells, the side to move and the
//! move history so each game only adds its own legality and win checks.

use crate::typed::{Color, Move};

/// Result of a position from the rules' point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ongoing,
    Won(Color),
    Draw,
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Status::Ongoing
    }

    /// Winning color, `None` for draws and ongoing games.
    pub fn winner(self) -> Option<Color> {
        match self {
            Status::Won(color) => Some(color),
            _ => None,
        }
    }
}

/// Grid of `CELLS` cells with an undo history.
///
/// Each history entry pairs the move with the cell it filled, because the
/// move's position is an action index (a column in Connect4), not a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBoard<const CELLS: usize> {
    cells: [Option<Color>; CELLS],
    history: Vec<(Move, usize)>,
    to_move: Color,
}

impl<const CELLS: usize> GridBoard<CELLS> {
    /// Create an empty board with `first` to move.
    pub fn new(first: Color) -> Self {
        Self {
            cells: [None; CELLS],
            history: Vec::with_capacity(CELLS),
            to_move: first,
        }
    }

    #[inline]
    pub fn cell(&self, cell: usize) -> Option<Color> {
        self.cells[cell]
    }

    #[inline]
    pub fn is_empty(&self, cell: usize) -> bool {
        self.cells[cell].is_none()
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn set_to_move(&mut self, color: Color) {
        self.to_move = color;
    }

    /// Moves currently on the board, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Move> {
        self.history.iter().map(|(mv, _)| mv)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_full(&self) -> bool {
        self.history.len() >= CELLS
    }

    /// Put `mv.color` on `cell` and pass the turn to the opponent.
    ///
    /// Callers validate the move first; the cell must be empty.
    pub fn place(&mut self, mv: Move, cell: usize) {
        debug_assert!(self.cells[cell].is_none(), "cell {cell} already occupied");
        self.cells[cell] = Some(mv.color);
        self.history.push((mv, cell));
        self.to_move = mv.color.opponent();
    }

    /// Remove the last placed stone and give the turn back to its owner.
    ///
    /// Returns the move together with the cell it had filled.
    pub fn take_back(&mut self) -> Option<(Move, usize)> {
        let (mv, cell) = self.history.pop()?;
        self.cells[cell] = None;
        self.to_move = mv.color;
        Some((mv, cell))
    }
}

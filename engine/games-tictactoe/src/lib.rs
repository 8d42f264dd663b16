//! TicTacToe game implementation for the Playout engine
//!
//! This crate provides a small reference implementation of the `Game`
//! adapter: an in-place board with exact undo, suitable for driving the
//! Monte Carlo search in tests and benchmarks.
//!
//! # Board Layout
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Move, Position};
//! use games_tictactoe::{TicTacToe, X};
//!
//! let mut game = TicTacToe::new();
//! game.apply(Move::new(Position(4), X)).unwrap();
//! assert_eq!(game.applied_move_count(), 1);
//!
//! game.undo();
//! assert_eq!(game, TicTacToe::new());
//! ```

use std::fmt;

use engine_core::{Color, Game, GridBoard, IllegalMove, Move, Position, Status};

/// Board dimensions
pub const BOARD_SIZE: usize = 9;

/// X moves first.
pub const X: Color = Color::Black;
pub const O: Color = Color::White;

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// side to move, move history and result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    board: GridBoard<BOARD_SIZE>,
    status: Status,
}

impl TicTacToe {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: GridBoard::new(X),
            status: Status::Ongoing,
        }
    }

    /// Play a sequence of positions from the initial state, alternating X and O.
    pub fn from_moves(positions: &[u16]) -> Result<Self, IllegalMove> {
        let mut game = Self::new();
        engine_core::play_sequence(&mut game, positions)?;
        Ok(game)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.status.is_over()
    }

    pub fn cell(&self, position: usize) -> Option<Color> {
        self.board.cell(position)
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u16> {
        if self.is_done() {
            return Vec::new();
        }

        (0..BOARD_SIZE as u16)
            .filter(|&pos| self.board.is_empty(pos as usize))
            .collect()
    }

    /// Bit-mask representation of legal moves.
    ///
    /// Bits 0-8 correspond to board positions 0-8. When the game is finished
    /// the mask is zeroed.
    pub fn legal_moves_mask(&self) -> u16 {
        if self.is_done() {
            return 0;
        }

        (0..BOARD_SIZE).fold(0u16, |mask, idx| {
            if self.board.is_empty(idx) {
                mask | (1u16 << idx)
            } else {
                mask
            }
        })
    }

    /// Check for winner on the board
    fn check_status(&self) -> Status {
        for line in &LINES {
            let [a, b, c] = *line;
            if let Some(color) = self.board.cell(a) {
                if self.board.cell(b) == Some(color) && self.board.cell(c) == Some(color) {
                    return Status::Won(color);
                }
            }
        }

        // Check for draw (board full but no winner)
        if self.board.is_full() {
            return Status::Draw;
        }

        Status::Ongoing
    }

    fn rejection(&self, mv: Move) -> Option<&'static str> {
        if self.is_done() {
            Some("game is over")
        } else if mv.position.index() >= BOARD_SIZE {
            Some("position out of range")
        } else if mv.color != self.board.to_move() {
            Some("not this color's turn")
        } else if !self.board.is_empty(mv.position.index()) {
            Some("position occupied")
        } else {
            None
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for TicTacToe {
    const ACTION_SPACE: usize = BOARD_SIZE;

    fn apply(&mut self, mv: Move) -> Result<(), IllegalMove> {
        if let Some(reason) = self.rejection(mv) {
            return Err(IllegalMove::new(mv, reason));
        }

        self.board.place(mv, mv.position.index());
        self.status = self.check_status();
        Ok(())
    }

    fn undo(&mut self) -> Option<Move> {
        let (mv, _) = self.board.take_back()?;
        // Play stops at the first win, so every earlier position was ongoing.
        self.status = Status::Ongoing;
        Some(mv)
    }

    fn is_legal_move(&self, position: Position, color: Color) -> bool {
        self.rejection(Move::new(position, color)).is_none()
    }

    fn is_terminal(&self) -> bool {
        self.is_done()
    }

    fn turn_color(&self) -> Color {
        self.board.to_move()
    }

    fn set_turn_color(&mut self, color: Color) {
        self.board.set_to_move(color);
    }

    fn outcome(&self) -> Option<Color> {
        self.status.winner()
    }

    fn applied_move_count(&self) -> usize {
        self.board.len()
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let cells: Vec<char> = (0..3)
                .map(|col| match self.board.cell(row * 3 + col) {
                    Some(color) if color == X => 'X',
                    Some(_) => 'O',
                    None => '.',
                })
                .collect();
            writeln!(f, "{} {} {}", cells[0], cells[1], cells[2])?;
        }
        Ok(())
    }
}

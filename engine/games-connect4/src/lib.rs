//! Connect 4 game implementation for the Playout engine
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! A move's position is the column index; the disc lands on the lowest
//! empty row of that column.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{Connect4, RED};
//!
//! let game = Connect4::from_moves(&[3, 3, 3]).unwrap();
//! assert_eq!(game.cell(3, 2), Some(RED));
//! assert_eq!(game.column_height(3), 3);
//! ```

use engine_core::{Color, Game, GridBoard, IllegalMove, Move, Position, Status};

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Red drops first.
pub const RED: Color = Color::Black;
pub const YELLOW: Color = Color::White;

/// Connect4 game state
///
/// Represents the complete state of a Connect4 game including the board,
/// side to move, column heights and result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect4 {
    board: GridBoard<BOARD_SIZE>,
    /// Number of discs in each column (0-6)
    column_heights: [u8; COLS],
    status: Status,
}

impl Connect4 {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: GridBoard::new(RED),
            column_heights: [0; COLS],
            status: Status::Ongoing,
        }
    }

    /// Drop discs into the given columns from the initial state, alternating colors.
    pub fn from_moves(columns: &[u16]) -> Result<Self, IllegalMove> {
        let mut game = Self::new();
        engine_core::play_sequence(&mut game, columns)?;
        Ok(game)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.status.is_over()
    }

    /// Disc at (col, row), row 0 being the bottom.
    pub fn cell(&self, col: usize, row: usize) -> Option<Color> {
        self.board.cell(Self::pos(col, row))
    }

    pub fn column_height(&self, col: usize) -> usize {
        self.column_heights[col] as usize
    }

    /// Get legal moves (columns that are not full)
    pub fn legal_moves(&self) -> Vec<u16> {
        if self.is_done() {
            return Vec::new();
        }

        (0..COLS as u16)
            .filter(|&col| self.column_heights[col as usize] < ROWS as u8)
            .collect()
    }

    /// Bit-mask representation of legal moves.
    ///
    /// Bits 0-6 correspond to columns 0-6. A bit set to 1 indicates the
    /// column is not full and a disc can be dropped there.
    pub fn legal_moves_mask(&self) -> u8 {
        if self.is_done() {
            return 0;
        }

        self.column_heights
            .iter()
            .enumerate()
            .fold(0u8, |mask, (col, &height)| {
                if height < ROWS as u8 {
                    mask | (1u8 << col)
                } else {
                    mask
                }
            })
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Result after a disc of `color` landed at (col, row).
    fn status_after(&self, col: usize, row: usize, color: Color) -> Status {
        // Direction vectors: horizontal, vertical, diagonal /, diagonal \
        let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        for (dc, dr) in directions {
            let count = 1 + self.run_length(col, row, dc, dr, color)
                + self.run_length(col, row, -dc, -dr, color);
            if count >= 4 {
                return Status::Won(color);
            }
        }

        // Check for draw (board full but no winner)
        if self.board.is_full() {
            return Status::Draw;
        }

        Status::Ongoing
    }

    /// Consecutive discs of `color` stepping away from (col, row), excluding the start.
    fn run_length(&self, col: usize, row: usize, dc: i32, dr: i32, color: Color) -> usize {
        let mut count = 0;
        let (mut c, mut r) = (col as i32 + dc, row as i32 + dr);
        while (0..COLS as i32).contains(&c) && (0..ROWS as i32).contains(&r) {
            if self.board.cell(Self::pos(c as usize, r as usize)) != Some(color) {
                break;
            }
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }

    fn rejection(&self, mv: Move) -> Option<&'static str> {
        let col = mv.position.index();
        if self.is_done() {
            Some("game is over")
        } else if col >= COLS {
            Some("column out of range")
        } else if mv.color != self.board.to_move() {
            Some("not this color's turn")
        } else if self.column_heights[col] >= ROWS as u8 {
            Some("column full")
        } else {
            None
        }
    }
}

impl Default for Connect4 {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Connect4 {
    const ACTION_SPACE: usize = COLS;

    fn apply(&mut self, mv: Move) -> Result<(), IllegalMove> {
        if let Some(reason) = self.rejection(mv) {
            return Err(IllegalMove::new(mv, reason));
        }

        let col = mv.position.index();
        let row = self.column_heights[col] as usize;
        self.board.place(mv, Self::pos(col, row));
        self.column_heights[col] += 1;
        self.status = self.status_after(col, row, mv.color);
        Ok(())
    }

    fn undo(&mut self) -> Option<Move> {
        let (mv, _) = self.board.take_back()?;
        self.column_heights[mv.position.index()] -= 1;
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

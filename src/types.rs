//! Core board-state types for the replay engine.
//!
//! This module defines the piece and board model shared by the tokenizer,
//! the origin resolver, the move applicator, and the display layer. The
//! board is stored top-down: row 0 is rank 8 (Black's back rank) and row 7
//! is rank 1, so `row = 8 - notated_rank`. All direction arithmetic in the
//! crate follows this convention: White pawns advance toward smaller row
//! indices.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Color & pieces
// ---------------------------------------------------------------------------

/// The color (side) of a chess piece or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the opposite color.
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the row delta of one forward pawn step.
    /// White moves toward row 0 (-1), Black toward row 7 (+1).
    pub fn pawn_step(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Returns the home row (back rank) index for this color.
    /// White's back rank is rank 1 (row 7), Black's is rank 8 (row 0).
    pub fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A chess piece type (without color information).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Parses an uppercase algebraic piece letter (`K`, `Q`, `R`, `B`, `N`).
    /// Returns `None` for anything else; pawn moves carry no letter.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'K' => Some(PieceKind::King),
            'Q' => Some(PieceKind::Queen),
            'R' => Some(PieceKind::Rook),
            'B' => Some(PieceKind::Bishop),
            'N' => Some(PieceKind::Knight),
            _ => None,
        }
    }

    /// Returns the algebraic letter for this kind (`P` for pawns).
    pub fn letter(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }
}

/// A chess piece with both kind and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// Creates a new piece.
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A square on the chessboard using 0-based file and row indices.
///
/// - `file`: 0 (a) to 7 (h)
/// - `row`: 0 (rank 8) to 7 (rank 1), counted top-down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: u8,
    pub row: u8,
}

impl Square {
    /// Creates a new square from 0-based file and row.
    pub fn new(file: u8, row: u8) -> Self {
        debug_assert!(file < 8 && row < 8, "Square out of bounds");
        Self { file, row }
    }

    /// Parses an algebraic square string (e.g. "e4") into a `Square`.
    /// Returns `None` for invalid input.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let row = b'8'.wrapping_sub(bytes[1]);
        if file < 8 && row < 8 {
            Some(Square { file, row })
        } else {
            None
        }
    }

    /// Converts the square to its algebraic string (e.g. "e4").
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, 8 - self.row)
    }

    /// Returns a new square offset by `(df, dr)`, or `None` if out of bounds.
    /// Positive `dr` moves down the displayed board (toward rank 1).
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let f = self.file as i8 + df;
        let r = self.row as i8 + dr;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            Some(Square::new(f as u8, r as u8))
        } else {
            None
        }
    }

    /// Returns a flat index (0..63) for the square.
    pub fn index(self) -> usize {
        (self.row as usize) * 8 + self.file as usize
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A board position as a flat 64-element array.
///
/// Each element is `Option<Piece>` — `None` means the square is empty.
/// Index mapping: `row * 8 + file`, row 0 at the top (rank 8). The replay
/// engine never mutates a stored position: it clones the previous board and
/// commits each move into the clone, so every historical state stays intact
/// once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub squares: [Option<Piece>; 64],
}

impl Default for Board {
    /// Returns an empty board.
    fn default() -> Self {
        Self {
            squares: [None; 64],
        }
    }
}

impl Board {
    /// Returns the piece at the given square, if any.
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Sets (or clears) the piece at the given square.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    /// Creates the standard starting position.
    pub fn starting_position() -> Self {
        let mut board = Board::default();

        let mut place = |file: u8, row: u8, kind: PieceKind, color: Color| {
            board.set(Square::new(file, row), Some(Piece::new(kind, color)));
        };

        // Black pieces (row 0 = rank 8)
        place(0, 0, PieceKind::Rook, Color::Black);
        place(1, 0, PieceKind::Knight, Color::Black);
        place(2, 0, PieceKind::Bishop, Color::Black);
        place(3, 0, PieceKind::Queen, Color::Black);
        place(4, 0, PieceKind::King, Color::Black);
        place(5, 0, PieceKind::Bishop, Color::Black);
        place(6, 0, PieceKind::Knight, Color::Black);
        place(7, 0, PieceKind::Rook, Color::Black);

        // Black pawns (row 1 = rank 7)
        for f in 0..8 {
            place(f, 1, PieceKind::Pawn, Color::Black);
        }

        // White pawns (row 6 = rank 2)
        for f in 0..8 {
            place(f, 6, PieceKind::Pawn, Color::White);
        }

        // White pieces (row 7 = rank 1)
        place(0, 7, PieceKind::Rook, Color::White);
        place(1, 7, PieceKind::Knight, Color::White);
        place(2, 7, PieceKind::Bishop, Color::White);
        place(3, 7, PieceKind::Queen, Color::White);
        place(4, 7, PieceKind::King, Color::White);
        place(5, 7, PieceKind::Bishop, Color::White);
        place(6, 7, PieceKind::Knight, Color::White);
        place(7, 7, PieceKind::Rook, Color::White);

        board
    }

    /// Converts the board to an 8×8 grid for rendering collaborators.
    /// `grid[0]` is rank 8 (the top row as displayed), `grid[7]` is rank 1.
    pub fn to_grid(&self) -> [[Option<Piece>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for row in 0..8u8 {
            for file in 0..8u8 {
                grid[row as usize][file as usize] = self.get(Square::new(file, row));
            }
        }
        grid
    }
}

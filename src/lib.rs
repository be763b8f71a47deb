//! # plyview — chess game replay from move notation
//!
//! plyview rebuilds the exact board position after every ply of a chess
//! game from its short algebraic move list, without a chess engine or a
//! legality oracle. It is a best-effort reconstructor for machine-recorded
//! games: each move token is parsed, the departing piece is found by a
//! backward geometric search from the destination, and the move is
//! committed onto a fresh copy of the previous position.
//!
//! ## Overview
//!
//! - Parse tokens like `e4`, `Nbd7`, `exd5`, `O-O-O`, or `dxe8=Q` into
//!   structured move records
//! - Resolve each record's origin square from the current position alone,
//!   honoring file and rank disambiguators
//! - Replay a whole game into a [`GameHistory`]: one immutable board per
//!   ply, starting position included
//! - Load games from CSV datasets ([`dataset`]), aggregate them
//!   ([`stats`]), and render positions in the terminal ([`display`])
//!
//! Anomalous input never aborts a replay. Junk characters are skipped
//! and unparseable tokens carry the previous position forward; a move
//! whose origin cannot be found still writes its destination, so the
//! history always ends up with one state per ply plus the start.
//!
//! ## Quick Start
//!
//! ```rust
//! use plyview::{GameHistory, PieceKind, Square};
//!
//! // Rebuild every position of a short game.
//! let history = GameHistory::build(&["e4", "e5", "Nf3", "Nc6"]);
//! assert_eq!(history.len(), 5);
//!
//! // Inspect the position after White's knight move.
//! let board = history.state_at(3).unwrap();
//! let knight = board.get(Square::from_algebraic("f3").unwrap()).unwrap();
//! assert_eq!(knight.kind, PieceKind::Knight);
//! ```
//!
//! ## Board orientation
//!
//! Boards are stored top-down: row 0 is rank 8 and row 7 is rank 1, the
//! order a board is read and displayed from White's side of the table.
//! [`Square::from_algebraic`] and [`Square::to_algebraic`] convert between
//! the two conventions.
//!
//! ## Key Types
//!
//! - [`Board`]: one position, 64 optional pieces
//! - [`MoveRecord`]: a parsed move token (castle, or piece/capture/
//!   destination/hints/promotion)
//! - [`GameHistory`]: all positions of a game, index 0 = starting position
//! - [`dataset::GameRecord`]: one finished game from a CSV dataset,
//!   including its move list

pub mod apply;
pub mod dataset;
pub mod display;
pub mod history;
pub mod notation;
pub mod resolver;
pub mod stats;
pub mod types;

pub use apply::apply_move;
pub use history::{GameHistory, HistoryError};
pub use notation::{CastleSide, MoveRecord};
pub use resolver::find_origin;
pub use types::{Board, Color, Piece, PieceKind, Square};

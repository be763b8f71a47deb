//! Committing parsed moves onto board states.
//!
//! Application is persistent: the previous position is cloned and the
//! move is written into the clone, so earlier states in a history are
//! never disturbed. No legality is enforced anywhere here; the move
//! text is trusted, and anomalies are absorbed into the closest
//! plausible board rather than reported as failures.

use crate::notation::{CastleSide, MoveRecord};
use crate::resolver;
use crate::types::{Board, Color, Piece, PieceKind, Square};

/// Applies one parsed move for `mover` to a copy of `prev`.
///
/// Castling shuffles whatever occupies the king and rook squares of the
/// mover's back rank. Promotions place the new piece and clear the pawn's
/// square one row backward. Normal moves resolve their origin through the
/// backward search; when that search fails the destination is still
/// written and the origin left untouched, which can leave a duplicated
/// piece on the board instead of aborting the replay.
pub fn apply_move(prev: &Board, record: &MoveRecord, mover: Color) -> Board {
    let mut board = prev.clone();
    match *record {
        MoveRecord::Castle(side) => castle(&mut board, side, mover),
        MoveRecord::Normal {
            promotion: Some(promo),
            dest,
            file_hint,
            ..
        } => promote(&mut board, mover, dest, file_hint, promo),
        MoveRecord::Normal {
            kind,
            capture,
            dest,
            file_hint,
            rank_hint,
            promotion: None,
        } => {
            let origin = resolver::find_origin(prev, mover, kind, dest, capture, file_hint, rank_hint);
            board.set(dest, Some(Piece::new(kind, mover)));
            match origin {
                Some(from) => board.set(from, None),
                None => {
                    log::warn!(
                        "No origin found for {} '{}'; destination written, origin untouched",
                        mover,
                        record
                    );
                }
            }
        }
    }
    board
}

/// Moves king and rook to their castled squares on the mover's back rank.
/// The squares' current occupants are copied as-is; nothing is validated.
fn castle(board: &mut Board, side: CastleSide, mover: Color) {
    let row = mover.home_row();
    let (king_to, rook_from, rook_to) = match side {
        CastleSide::Kingside => (6, 7, 5),
        CastleSide::Queenside => (2, 0, 3),
    };
    let king_from = Square::new(4, row);
    let rook_from = Square::new(rook_from, row);
    let king = board.get(king_from);
    let rook = board.get(rook_from);
    board.set(king_from, None);
    board.set(rook_from, None);
    board.set(Square::new(king_to, row), king);
    board.set(Square::new(rook_to, row), rook);
}

/// Places the promotion piece and clears the pawn's origin square: one row
/// backward from the destination, on the hinted file for capture
/// promotions, else the destination file.
fn promote(board: &mut Board, mover: Color, dest: Square, file_hint: Option<u8>, promo: PieceKind) {
    board.set(dest, Some(Piece::new(promo, mover)));
    let origin_row = dest.row as i8 - mover.pawn_step();
    if (0..8).contains(&origin_row) {
        let origin = Square::new(file_hint.unwrap_or(dest.file), origin_row as u8);
        board.set(origin, None);
    } else {
        log::warn!(
            "Promotion to {} has no pawn row behind it; origin not cleared",
            dest
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn record(token: &str) -> MoveRecord {
        MoveRecord::parse(token).unwrap()
    }

    fn count_pieces(board: &Board) -> usize {
        board.squares.iter().filter(|p| p.is_some()).count()
    }

    #[test]
    fn test_pawn_push_moves_the_pawn() {
        let start = Board::starting_position();
        let next = apply_move(&start, &record("e4"), Color::White);
        assert_eq!(next.get(sq("e2")), None, "the origin square is vacated");
        assert_eq!(
            next.get(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        // The previous state is untouched.
        assert_eq!(
            start.get(sq("e2")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn test_capture_replaces_the_target() {
        let mut board = Board::default();
        board.set(sq("e4"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.set(sq("d5"), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        let next = apply_move(&board, &record("exd5"), Color::White);
        assert_eq!(
            next.get(sq("d5")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(next.get(sq("e4")), None);
        assert_eq!(count_pieces(&next), 1, "the captured pawn is gone");
    }

    #[test]
    fn test_kingside_castle_white() {
        let mut board = Board::starting_position();
        board.set(sq("f1"), None);
        board.set(sq("g1"), None);
        let next = apply_move(&board, &record("O-O"), Color::White);
        assert_eq!(
            next.get(sq("g1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            next.get(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(next.get(sq("e1")), None);
        assert_eq!(next.get(sq("h1")), None);
    }

    #[test]
    fn test_queenside_castle_black() {
        let mut board = Board::starting_position();
        board.set(sq("b8"), None);
        board.set(sq("c8"), None);
        board.set(sq("d8"), None);
        let next = apply_move(&board, &record("O-O-O"), Color::Black);
        assert_eq!(
            next.get(sq("c8")),
            Some(Piece::new(PieceKind::King, Color::Black))
        );
        assert_eq!(
            next.get(sq("d8")),
            Some(Piece::new(PieceKind::Rook, Color::Black))
        );
        assert_eq!(next.get(sq("e8")), None);
        assert_eq!(next.get(sq("a8")), None);
    }

    #[test]
    fn test_promotion_places_the_new_piece() {
        let mut board = Board::default();
        board.set(sq("e7"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        let next = apply_move(&board, &record("e8=Q"), Color::White);
        assert_eq!(
            next.get(sq("e8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(next.get(sq("e7")), None);
    }

    #[test]
    fn test_black_promotion_direction() {
        let mut board = Board::default();
        board.set(sq("c2"), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        let next = apply_move(&board, &record("c1=N"), Color::Black);
        assert_eq!(
            next.get(sq("c1")),
            Some(Piece::new(PieceKind::Knight, Color::Black))
        );
        assert_eq!(next.get(sq("c2")), None);
    }

    #[test]
    fn test_capture_promotion_clears_the_hinted_file() {
        let mut board = Board::default();
        board.set(sq("d7"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.set(sq("e8"), Some(Piece::new(PieceKind::Rook, Color::Black)));
        let next = apply_move(&board, &record("dxe8=Q"), Color::White);
        assert_eq!(
            next.get(sq("e8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(next.get(sq("d7")), None);
        assert_eq!(count_pieces(&next), 1);
    }

    #[test]
    fn test_unresolved_origin_still_writes_the_destination() {
        let board = Board::default();
        let next = apply_move(&board, &record("Nf3"), Color::White);
        assert_eq!(
            next.get(sq("f3")),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );
        assert_eq!(count_pieces(&next), 1, "only the destination changes");
    }
}

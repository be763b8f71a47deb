//! Origin-square resolution by backward search from the destination.
//!
//! Move tokens name where a piece lands, not where it came from. This
//! module reconstructs the origin geometrically: starting at the
//! destination it searches outward along the lines the piece kind moves
//! on, and the first square holding a matching piece of the moving color
//! wins. Bishops are the one exception: when two of them reach the same
//! destination the search refuses to guess. There is no legality
//! checking, so pinned pieces, checks, and occupied paths beyond the
//! searched line are never considered.
//!
//! Disambiguator hints short-circuit the generic search: a file hint
//! restricts the scan to that file, a rank hint to that row, and both
//! together name the origin outright.

use crate::types::{Board, Color, Piece, PieceKind, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Finds the square the moving piece departed from.
///
/// `dest`, `capture`, and the hints come from the parsed token; `mover` is
/// the side making this ply. Returns `None` when no matching origin is
/// found; the caller decides how to absorb that.
pub fn find_origin(
    board: &Board,
    mover: Color,
    kind: PieceKind,
    dest: Square,
    capture: bool,
    file_hint: Option<u8>,
    rank_hint: Option<u8>,
) -> Option<Square> {
    if kind == PieceKind::Pawn {
        return if capture {
            pawn_capture_origin(board, mover, dest, file_hint)
        } else {
            pawn_push_origin(board, mover, dest)
        };
    }

    // Hints take precedence over the geometric search.
    if let (Some(file), Some(row)) = (file_hint, rank_hint) {
        let sq = Square::new(file, row);
        if holds(board, sq, mover, kind) {
            return Some(sq);
        }
        log::debug!("Hinted origin {} does not hold a matching piece", sq);
        return None;
    }
    if let Some(file) = file_hint {
        return scan_file(board, mover, kind, file);
    }
    if let Some(row) = rank_hint {
        return scan_row(board, mover, kind, row);
    }

    match kind {
        PieceKind::Knight => offset_origin(board, mover, kind, dest, &KNIGHT_OFFSETS),
        PieceKind::King => offset_origin(board, mover, kind, dest, &KING_OFFSETS),
        PieceKind::Bishop => bishop_origin(board, mover, dest),
        PieceKind::Rook => ray_origin(board, mover, kind, dest, &ROOK_DIRS),
        // Diagonals first, then straights; whichever matches first wins,
        // so a single found queen is never cleared twice.
        PieceKind::Queen => ray_origin(board, mover, kind, dest, &BISHOP_DIRS)
            .or_else(|| ray_origin(board, mover, kind, dest, &ROOK_DIRS)),
        PieceKind::Pawn => unreachable!("pawns are handled above"),
    }
}

/// True if `sq` holds the mover's piece of the given kind.
fn holds(board: &Board, sq: Square, mover: Color, kind: PieceKind) -> bool {
    board.get(sq) == Some(Piece::new(kind, mover))
}

/// Non-capture pawn move: walk backward from the destination along its
/// file until the edge and take the first pawn of the moving color. The
/// walk does not stop at occupied squares, which also covers the
/// double-step from the home rank.
fn pawn_push_origin(board: &Board, mover: Color, dest: Square) -> Option<Square> {
    let back = -mover.pawn_step();
    let mut cur = dest;
    while let Some(next) = cur.offset(0, back) {
        if holds(board, next, mover, PieceKind::Pawn) {
            return Some(next);
        }
        cur = next;
    }
    None
}

/// Capturing pawn move: the origin file is the token's hint and the origin
/// row is one step backward from the destination.
fn pawn_capture_origin(
    board: &Board,
    mover: Color,
    dest: Square,
    file_hint: Option<u8>,
) -> Option<Square> {
    let file = file_hint?;
    let row = dest.row as i8 - mover.pawn_step();
    if !(0..8).contains(&row) {
        return None;
    }
    let sq = Square::new(file, row as u8);
    holds(board, sq, mover, PieceKind::Pawn).then_some(sq)
}

/// Fixed-offset pieces (knight, king): probe each offset from the
/// destination in table order, first matching piece wins.
fn offset_origin(
    board: &Board,
    mover: Color,
    kind: PieceKind,
    dest: Square,
    offsets: &[(i8, i8)],
) -> Option<Square> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| dest.offset(df, dr))
        .find(|&sq| holds(board, sq, mover, kind))
}

/// Sliding pieces: walk each ray outward from the destination. Empty
/// squares extend the walk; the first occupied square either resolves the
/// search (matching piece) or ends that ray (anything else).
fn ray_origin(
    board: &Board,
    mover: Color,
    kind: PieceKind,
    dest: Square,
    dirs: &[(i8, i8)],
) -> Option<Square> {
    for &(df, dr) in dirs {
        let mut cur = dest;
        while let Some(next) = cur.offset(df, dr) {
            match board.get(next) {
                None => cur = next,
                Some(piece) if piece == Piece::new(kind, mover) => return Some(next),
                Some(_) => break,
            }
        }
    }
    None
}

/// Bishops walk the same diagonal rays but collect every candidate
/// instead of taking the first. Two bishops converging on one
/// destination without a disambiguator cannot be told apart, so the
/// search reports no origin and the caller leaves the board partially
/// updated.
fn bishop_origin(board: &Board, mover: Color, dest: Square) -> Option<Square> {
    let mut found: Option<Square> = None;
    for &(df, dr) in &BISHOP_DIRS {
        let mut cur = dest;
        while let Some(next) = cur.offset(df, dr) {
            match board.get(next) {
                None => cur = next,
                Some(piece) if piece == Piece::new(PieceKind::Bishop, mover) => {
                    if let Some(first) = found {
                        log::debug!(
                            "Bishops on {} and {} both reach {}; origin unresolved",
                            first,
                            next,
                            dest
                        );
                        return None;
                    }
                    found = Some(next);
                    break;
                }
                Some(_) => break,
            }
        }
    }
    found
}

/// File-hint scan: first matching piece on the hinted file, top row first.
fn scan_file(board: &Board, mover: Color, kind: PieceKind, file: u8) -> Option<Square> {
    (0..8)
        .map(|row| Square::new(file, row))
        .find(|&sq| holds(board, sq, mover, kind))
}

/// Rank-hint scan: first matching piece on the hinted row, a-file first.
fn scan_row(board: &Board, mover: Color, kind: PieceKind, row: u8) -> Option<Square> {
    (0..8)
        .map(|file| Square::new(file, row))
        .find(|&sq| holds(board, sq, mover, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board_with(pieces: &[(&str, PieceKind, Color)]) -> Board {
        let mut board = Board::default();
        for &(at, kind, color) in pieces {
            board.set(sq(at), Some(Piece::new(kind, color)));
        }
        board
    }

    #[test]
    fn test_pawn_push_single_step() {
        let board = Board::starting_position();
        let origin = find_origin(&board, Color::White, PieceKind::Pawn, sq("e3"), false, None, None);
        assert_eq!(origin, Some(sq("e2")), "e3 comes from the e2 pawn");
    }

    #[test]
    fn test_pawn_push_double_step() {
        let board = Board::starting_position();
        let origin = find_origin(&board, Color::White, PieceKind::Pawn, sq("e4"), false, None, None);
        assert_eq!(origin, Some(sq("e2")), "the backward walk spans the double step");
    }

    #[test]
    fn test_pawn_push_black_direction() {
        let board = Board::starting_position();
        let origin = find_origin(&board, Color::Black, PieceKind::Pawn, sq("c5"), false, None, None);
        assert_eq!(origin, Some(sq("c7")));
    }

    #[test]
    fn test_pawn_push_walks_past_occupied_squares() {
        // The backward walk does not stop at blockers; it takes the first
        // pawn of the moving color on the file.
        let board = board_with(&[
            ("e3", PieceKind::Knight, Color::Black),
            ("e2", PieceKind::Pawn, Color::White),
        ]);
        let origin = find_origin(&board, Color::White, PieceKind::Pawn, sq("e4"), false, None, None);
        assert_eq!(origin, Some(sq("e2")));
    }

    #[test]
    fn test_pawn_capture_uses_file_hint() {
        let board = board_with(&[
            ("e4", PieceKind::Pawn, Color::White),
            ("d5", PieceKind::Pawn, Color::Black),
        ]);
        let origin = find_origin(
            &board,
            Color::White,
            PieceKind::Pawn,
            sq("d5"),
            true,
            Some(4),
            None,
        );
        assert_eq!(origin, Some(sq("e4")));
    }

    #[test]
    fn test_pawn_capture_without_hint_is_unresolved() {
        let board = board_with(&[("e4", PieceKind::Pawn, Color::White)]);
        let origin = find_origin(&board, Color::White, PieceKind::Pawn, sq("d5"), true, None, None);
        assert_eq!(origin, None);
    }

    #[test]
    fn test_pawn_capture_verifies_origin_piece() {
        // Hinted square is empty: no pawn to move.
        let board = board_with(&[("d5", PieceKind::Pawn, Color::Black)]);
        let origin = find_origin(
            &board,
            Color::White,
            PieceKind::Pawn,
            sq("d5"),
            true,
            Some(4),
            None,
        );
        assert_eq!(origin, None);
    }

    #[test]
    fn test_knight_origin_from_starting_position() {
        let board = Board::starting_position();
        let origin = find_origin(&board, Color::White, PieceKind::Knight, sq("f3"), false, None, None);
        assert_eq!(origin, Some(sq("g1")), "Nf3 departs from g1");
    }

    #[test]
    fn test_knight_file_hint_selects_between_candidates() {
        let board = board_with(&[
            ("b8", PieceKind::Knight, Color::Black),
            ("f6", PieceKind::Knight, Color::Black),
        ]);
        let from_b = find_origin(
            &board,
            Color::Black,
            PieceKind::Knight,
            sq("d7"),
            false,
            Some(1),
            None,
        );
        assert_eq!(from_b, Some(sq("b8")), "Nbd7 names the b-file knight");
        let from_f = find_origin(
            &board,
            Color::Black,
            PieceKind::Knight,
            sq("d7"),
            false,
            Some(5),
            None,
        );
        assert_eq!(from_f, Some(sq("f6")), "Nfd7 names the f-file knight");
    }

    #[test]
    fn test_king_origin_adjacent() {
        let board = board_with(&[("e1", PieceKind::King, Color::White)]);
        let origin = find_origin(&board, Color::White, PieceKind::King, sq("e2"), false, None, None);
        assert_eq!(origin, Some(sq("e1")));
    }

    #[test]
    fn test_bishop_origin_along_clear_diagonal() {
        // After 1. e4, the f1 bishop can reach c4 through the vacated e2.
        let mut board = Board::starting_position();
        board.set(sq("e2"), None);
        board.set(sq("e4"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        let origin = find_origin(&board, Color::White, PieceKind::Bishop, sq("c4"), false, None, None);
        assert_eq!(origin, Some(sq("f1")));
    }

    #[test]
    fn test_two_bishops_on_crossing_diagonals_unresolved() {
        // Both bishops reach e6 and nothing in the token tells them
        // apart, so the search declines to pick one.
        let board = board_with(&[
            ("c4", PieceKind::Bishop, Color::White),
            ("g4", PieceKind::Bishop, Color::White),
        ]);
        let origin = find_origin(&board, Color::White, PieceKind::Bishop, sq("e6"), false, None, None);
        assert_eq!(origin, None);
    }

    #[test]
    fn test_bishop_behind_bishop_resolves_to_nearest() {
        // The h3 bishop sits on the same diagonal behind g4; the nearer
        // one blocks the ray and is the only candidate.
        let board = board_with(&[
            ("g4", PieceKind::Bishop, Color::White),
            ("h3", PieceKind::Bishop, Color::White),
        ]);
        let origin = find_origin(&board, Color::White, PieceKind::Bishop, sq("e6"), false, None, None);
        assert_eq!(origin, Some(sq("g4")));
    }

    #[test]
    fn test_rook_ray_stops_at_wrong_occupant() {
        let board = board_with(&[
            ("a1", PieceKind::Rook, Color::White),
            ("a2", PieceKind::Pawn, Color::White),
        ]);
        let origin = find_origin(&board, Color::White, PieceKind::Rook, sq("a3"), false, None, None);
        assert_eq!(origin, None, "the a2 pawn ends the downward ray before a1");
    }

    #[test]
    fn test_rook_rank_hint_selects_between_candidates() {
        let board = board_with(&[
            ("a1", PieceKind::Rook, Color::White),
            ("a5", PieceKind::Rook, Color::White),
        ]);
        let from_first = find_origin(
            &board,
            Color::White,
            PieceKind::Rook,
            sq("a3"),
            false,
            None,
            Some(7),
        );
        assert_eq!(from_first, Some(sq("a1")), "R1a3 names the rook on rank 1");
        let from_fifth = find_origin(
            &board,
            Color::White,
            PieceKind::Rook,
            sq("a3"),
            false,
            None,
            Some(3),
        );
        assert_eq!(from_fifth, Some(sq("a5")), "R5a3 names the rook on rank 5");
    }

    #[test]
    fn test_queen_diagonal_match_wins_over_straight() {
        let board = board_with(&[
            ("d1", PieceKind::Queen, Color::White),
            ("h1", PieceKind::Queen, Color::White),
        ]);
        let origin = find_origin(&board, Color::White, PieceKind::Queen, sq("h5"), false, None, None);
        assert_eq!(
            origin,
            Some(sq("d1")),
            "diagonal rays are searched before straight ones"
        );
    }

    #[test]
    fn test_both_hints_name_the_origin_exactly() {
        let board = board_with(&[("h4", PieceKind::Queen, Color::White)]);
        let origin = find_origin(
            &board,
            Color::White,
            PieceKind::Queen,
            sq("e1"),
            false,
            Some(7),
            Some(4),
        );
        assert_eq!(origin, Some(sq("h4")));
    }

    #[test]
    fn test_both_hints_fail_when_square_mismatches() {
        let board = Board::default();
        let origin = find_origin(
            &board,
            Color::White,
            PieceKind::Queen,
            sq("e1"),
            false,
            Some(7),
            Some(4),
        );
        assert_eq!(origin, None);
    }

    #[test]
    fn test_no_candidate_returns_none() {
        let board = Board::default();
        let origin = find_origin(&board, Color::White, PieceKind::Knight, sq("f3"), false, None, None);
        assert_eq!(origin, None);
    }
}

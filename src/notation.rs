//! Move-token parsing for short algebraic notation.
//!
//! A token describes a single ply the way game exports store it: an
//! optional piece letter, optional disambiguators, an optional capture
//! marker, the destination square, and optional promotion and check
//! suffixes. Examples: `e4`, `Nf3`, `exd5`, `Nbd7`, `R1a3`, `O-O`,
//! `dxe8=Q`, `Qxf7#`.
//!
//! Parsing is deliberately permissive. Check and mate suffixes are
//! stripped and unrecognized characters are skipped with a debug log;
//! the destination is whatever file letter and rank digit appear last in
//! the token. Only a token with no extractable destination at all fails
//! to parse.

use crate::types::{PieceKind, Square};

// ---------------------------------------------------------------------------
// Move records
// ---------------------------------------------------------------------------

/// Which side of the board a castling move targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    /// Short castling (`O-O`): king toward the h-file.
    Kingside,
    /// Long castling (`O-O-O`): king toward the a-file.
    Queenside,
}

/// A parsed move token.
///
/// `Normal` carries everything the origin resolver needs: the moving piece
/// kind, the destination, the capture flag, and any disambiguator hints the
/// token provided. Hints are origin coordinates, not destination ones: in
/// `Nbd7` the `b` says the knight departs from the b-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRecord {
    /// `O-O` or `O-O-O`.
    Castle(CastleSide),
    /// Any non-castling move.
    Normal {
        kind: PieceKind,
        capture: bool,
        dest: Square,
        /// Origin file from a disambiguator (0 = a), if the token had one.
        file_hint: Option<u8>,
        /// Origin row from a disambiguator (0 = rank 8), if the token had one.
        rank_hint: Option<u8>,
        /// Promotion target from an `=X` suffix.
        promotion: Option<PieceKind>,
    },
}

impl MoveRecord {
    /// Parses one move token.
    ///
    /// Returns `None` only when no destination square can be extracted
    /// (empty or fully junk tokens). Everything else parses: stray
    /// characters are skipped and logged at debug level.
    pub fn parse(token: &str) -> Option<MoveRecord> {
        let stripped = token.trim_end_matches(['+', '#']);

        match stripped {
            "O-O" => return Some(MoveRecord::Castle(CastleSide::Kingside)),
            "O-O-O" => return Some(MoveRecord::Castle(CastleSide::Queenside)),
            _ => {}
        }

        // Split the promotion suffix off before scanning, so its piece
        // letter can never be mistaken for a file or rank character.
        let (body, promotion) = match stripped.split_once('=') {
            Some((body, suffix)) => {
                let promo = suffix
                    .chars()
                    .next()
                    .and_then(|c| PieceKind::from_letter(c.to_ascii_uppercase()));
                if promo.is_none() {
                    log::debug!("Promotion suffix without a piece letter in '{}'", token);
                }
                (body, promo)
            }
            None => (stripped, None),
        };

        let mut kind = PieceKind::Pawn;
        let mut rest = body;
        if let Some(first) = body.chars().next()
            && let Some(k) = PieceKind::from_letter(first)
        {
            kind = k;
            rest = &body[1..];
        }

        // Left-to-right destination scan: the last file letter and rank
        // digit form the destination, earlier ones are origin hints.
        let mut capture = false;
        let mut files: Vec<u8> = Vec::new();
        let mut rows: Vec<u8> = Vec::new();
        for c in rest.chars() {
            match c {
                'a'..='h' => files.push(c as u8 - b'a'),
                '1'..='8' => rows.push(b'8' - c as u8),
                'x' => capture = true,
                other => {
                    log::debug!("Skipping character '{}' in move token '{}'", other, token);
                }
            }
        }

        let dest = Square::new(*files.last()?, *rows.last()?);
        let file_hint = files.len().checked_sub(2).map(|i| files[i]);
        let rank_hint = rows.len().checked_sub(2).map(|i| rows[i]);

        Some(MoveRecord::Normal {
            kind,
            capture,
            dest,
            file_hint,
            rank_hint,
            promotion,
        })
    }
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveRecord::Castle(CastleSide::Kingside) => write!(f, "O-O"),
            MoveRecord::Castle(CastleSide::Queenside) => write!(f, "O-O-O"),
            MoveRecord::Normal {
                kind,
                capture,
                dest,
                file_hint,
                rank_hint,
                promotion,
            } => {
                if *kind != PieceKind::Pawn {
                    write!(f, "{}", kind.letter())?;
                }
                if let Some(file) = file_hint {
                    write!(f, "{}", (b'a' + file) as char)?;
                }
                if let Some(row) = rank_hint {
                    write!(f, "{}", 8 - row)?;
                }
                if *capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", dest)?;
                if let Some(promo) = promotion {
                    write!(f, "={}", promo.letter())?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_normal(token: &str) -> (PieceKind, bool, Square, Option<u8>, Option<u8>, Option<PieceKind>) {
        match MoveRecord::parse(token) {
            Some(MoveRecord::Normal {
                kind,
                capture,
                dest,
                file_hint,
                rank_hint,
                promotion,
            }) => (kind, capture, dest, file_hint, rank_hint, promotion),
            other => panic!("Expected normal move for '{}', got {:?}", token, other),
        }
    }

    #[test]
    fn test_parse_pawn_push() {
        let (kind, capture, dest, file_hint, rank_hint, promotion) = parse_normal("e4");
        assert_eq!(kind, PieceKind::Pawn);
        assert!(!capture);
        assert_eq!(dest, Square::new(4, 4), "e4 is file 4, row 4");
        assert_eq!(file_hint, None);
        assert_eq!(rank_hint, None);
        assert_eq!(promotion, None);
    }

    #[test]
    fn test_parse_piece_move() {
        let (kind, capture, dest, ..) = parse_normal("Nf3");
        assert_eq!(kind, PieceKind::Knight);
        assert!(!capture);
        assert_eq!(dest, Square::from_algebraic("f3").unwrap());
    }

    #[test]
    fn test_parse_capture_flag() {
        let (kind, capture, dest, ..) = parse_normal("Bxe5");
        assert_eq!(kind, PieceKind::Bishop);
        assert!(capture, "'x' should set the capture flag");
        assert_eq!(dest, Square::from_algebraic("e5").unwrap());
    }

    #[test]
    fn test_parse_pawn_capture_keeps_origin_file() {
        let (kind, capture, dest, file_hint, ..) = parse_normal("exd5");
        assert_eq!(kind, PieceKind::Pawn);
        assert!(capture);
        assert_eq!(dest, Square::from_algebraic("d5").unwrap());
        assert_eq!(file_hint, Some(4), "the e-file prefix is the origin hint");
    }

    #[test]
    fn test_parse_file_disambiguator() {
        let (kind, _, dest, file_hint, rank_hint, _) = parse_normal("Nbd7");
        assert_eq!(kind, PieceKind::Knight);
        assert_eq!(dest, Square::from_algebraic("d7").unwrap());
        assert_eq!(file_hint, Some(1), "origin knight departs from the b-file");
        assert_eq!(rank_hint, None);
    }

    #[test]
    fn test_parse_rank_disambiguator() {
        let (kind, _, dest, file_hint, rank_hint, _) = parse_normal("R1a3");
        assert_eq!(kind, PieceKind::Rook);
        assert_eq!(dest, Square::from_algebraic("a3").unwrap());
        assert_eq!(file_hint, None);
        assert_eq!(rank_hint, Some(7), "rank 1 is row 7");
    }

    #[test]
    fn test_parse_castles() {
        assert_eq!(
            MoveRecord::parse("O-O"),
            Some(MoveRecord::Castle(CastleSide::Kingside))
        );
        assert_eq!(
            MoveRecord::parse("O-O-O"),
            Some(MoveRecord::Castle(CastleSide::Queenside))
        );
        assert_eq!(
            MoveRecord::parse("O-O+"),
            Some(MoveRecord::Castle(CastleSide::Kingside)),
            "check suffix should not defeat castle recognition"
        );
    }

    #[test]
    fn test_parse_promotion() {
        let (kind, capture, dest, _, _, promotion) = parse_normal("e8=Q");
        assert_eq!(kind, PieceKind::Pawn);
        assert!(!capture);
        assert_eq!(dest, Square::from_algebraic("e8").unwrap());
        assert_eq!(promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn test_parse_capture_promotion() {
        let (_, capture, dest, file_hint, _, promotion) = parse_normal("dxe8=Q");
        assert!(capture);
        assert_eq!(dest, Square::from_algebraic("e8").unwrap());
        assert_eq!(file_hint, Some(3));
        assert_eq!(promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn test_parse_promotion_letter_not_misread_as_file() {
        // A lowercase bishop suffix must not shift the destination.
        let (_, _, dest, file_hint, _, promotion) = parse_normal("a8=b");
        assert_eq!(dest, Square::from_algebraic("a8").unwrap());
        assert_eq!(file_hint, None);
        assert_eq!(promotion, Some(PieceKind::Bishop));
    }

    #[test]
    fn test_parse_strips_check_and_mate_suffixes() {
        let (_, _, dest, ..) = parse_normal("Qh5+");
        assert_eq!(dest, Square::from_algebraic("h5").unwrap());
        let (_, capture, dest, ..) = parse_normal("Qxf7#");
        assert!(capture);
        assert_eq!(dest, Square::from_algebraic("f7").unwrap());
    }

    #[test]
    fn test_parse_skips_annotation_characters() {
        let (kind, _, dest, ..) = parse_normal("Nf3!?");
        assert_eq!(kind, PieceKind::Knight);
        assert_eq!(dest, Square::from_algebraic("f3").unwrap());
    }

    #[test]
    fn test_parse_rejects_tokens_without_destination() {
        assert_eq!(MoveRecord::parse(""), None);
        assert_eq!(MoveRecord::parse("??"), None);
        assert_eq!(MoveRecord::parse("N"), None, "piece letter alone has no destination");
        assert_eq!(MoveRecord::parse("e"), None, "file alone has no destination");
    }

    #[test]
    fn test_display_rebuilds_canonical_tokens() {
        for token in ["e4", "Nf3", "exd5", "Nbd7", "R1a3", "O-O", "O-O-O", "dxe8=Q"] {
            let record = MoveRecord::parse(token).unwrap();
            assert_eq!(record.to_string(), token, "display should round-trip '{}'", token);
        }
    }
}

//! Terminal rendering and the interactive ply viewer.
//!
//! This module turns board states into something a person can look at:
//!
//! - Unicode chess glyphs per piece
//! - A colored board grid (rank 8 at the top, as stored)
//! - A plain-text board for non-terminal consumers
//! - An interactive viewer for stepping through a game's history
//!
//! The viewer's `json` command prints the current position as an 8×8
//! grid of cells, each `null` or a `{kind, color}` object.

use colored::Colorize;
use std::io::{self, Write};

use crate::history::GameHistory;
use crate::types::{Board, Color, Piece, PieceKind, Square};

/// Returns the Unicode chess glyph for a piece.
pub fn glyph(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::King) => '\u{2654}',
        (Color::White, PieceKind::Queen) => '\u{2655}',
        (Color::White, PieceKind::Rook) => '\u{2656}',
        (Color::White, PieceKind::Bishop) => '\u{2657}',
        (Color::White, PieceKind::Knight) => '\u{2658}',
        (Color::White, PieceKind::Pawn) => '\u{2659}',
        (Color::Black, PieceKind::King) => '\u{265A}',
        (Color::Black, PieceKind::Queen) => '\u{265B}',
        (Color::Black, PieceKind::Rook) => '\u{265C}',
        (Color::Black, PieceKind::Bishop) => '\u{265D}',
        (Color::Black, PieceKind::Knight) => '\u{265E}',
        (Color::Black, PieceKind::Pawn) => '\u{265F}',
    }
}

/// Formats a board as plain text, rank 8 at the top, `·` for empty
/// squares. Suitable for logs and piping; no colors.
pub fn format_board(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..8u8 {
        out.push_str(&format!("{}  ", 8 - row));
        for file in 0..8u8 {
            let cell = match board.get(Square::new(file, row)) {
                Some(piece) => glyph(piece),
                None => '·',
            };
            out.push(cell);
            if file < 7 {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out
}

/// Renders the board to the terminal with colors and piece glyphs.
///
/// White pieces are shown bold white, Black pieces bold blue. Empty dark
/// squares carry a dimmed dot so the board pattern stays visible.
pub fn print_board(board: &Board) {
    println!();
    println!("  +---+---+---+---+---+---+---+---+");

    for row in 0..8u8 {
        print!("{} ", 8 - row);
        for file in 0..8u8 {
            let sq = Square::new(file, row);
            let is_dark_square = (file + row) % 2 == 1;

            let piece_str = match board.get(sq) {
                Some(piece) => {
                    let symbol = glyph(piece).to_string();
                    if piece.color == Color::White {
                        symbol.white().bold().to_string()
                    } else {
                        symbol.blue().bold().to_string()
                    }
                }
                None => {
                    if is_dark_square {
                        "·".dimmed().to_string()
                    } else {
                        " ".to_string()
                    }
                }
            };

            print!("| {} ", piece_str);
        }
        println!("|");
        println!("  +---+---+---+---+---+---+---+---+");
    }
    println!("    a   b   c   d   e   f   g   h");
    println!();
}

/// Prints one position with a status line naming the ply and the move
/// that produced it.
pub fn print_position(board: &Board, moves: &[&str], ply: usize) {
    print_board(board);
    if ply == 0 {
        println!("Starting position — {} plies available", moves.len());
    } else if let Some(token) = ply.checked_sub(1).and_then(|i| moves.get(i)) {
        let side = if ply % 2 == 1 {
            "White".white().bold()
        } else {
            "Black".blue().bold()
        };
        println!(
            "Ply {}/{}: {} played {}",
            ply,
            moves.len(),
            side,
            token.green()
        );
    } else {
        println!("Ply {}/{}", ply, moves.len());
    }
    println!();
}

/// Prints the viewer's available commands.
fn print_viewer_help() {
    println!("{}", "Viewer commands:".yellow().bold());
    println!("  {}      - step one ply forward", "n".green());
    println!("  {}      - step one ply back", "p".green());
    println!("  {} {}   - jump to a ply (0 = starting position)", "g".green(), "N");
    println!("  {}      - jump to the starting position", "f".green());
    println!("  {}      - jump to the final position", "l".green());
    println!("  {}      - print the position as JSON", "json".green());
    println!("  {}      - show this help", "help".green());
    println!("  {}      - leave the viewer", "quit".green());
    println!();
}

/// Runs the interactive ply viewer for one game.
///
/// Starts at the initial position and steps through `history` on command.
/// The move list is only used for labeling; the positions come from the
/// prebuilt history.
pub fn run_viewer(title: &str, moves: &[&str], history: &GameHistory) {
    let border = "═".repeat(title.chars().count() + 4);
    println!();
    println!("{}", format!("╔{}╗", border).cyan());
    println!("{}", format!("║  {}  ║", title).cyan());
    println!("{}", format!("╚{}╝", border).cyan());
    println!();

    print_viewer_help();

    let last_ply = history.len() - 1;
    let mut ply = 0usize;
    if let Ok(board) = history.state_at(ply) {
        print_position(board, moves, ply);
    }

    loop {
        print!("ply {}/{} > ", ply, last_ply);
        io::stdout().flush().unwrap();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Could not read input.");
            continue;
        }
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            continue;
        }

        let mut words = input.split_whitespace();
        let command = words.next().unwrap_or_default();

        match command {
            "quit" | "exit" | "q" => {
                println!("Bye.");
                break;
            }
            "help" | "h" | "?" => {
                print_viewer_help();
            }
            "n" | "next" => {
                if ply < last_ply {
                    ply += 1;
                    if let Ok(board) = history.state_at(ply) {
                        print_position(board, moves, ply);
                    }
                } else {
                    println!("Already at the final position.");
                }
            }
            "p" | "prev" => {
                if ply > 0 {
                    ply -= 1;
                    if let Ok(board) = history.state_at(ply) {
                        print_position(board, moves, ply);
                    }
                } else {
                    println!("Already at the starting position.");
                }
            }
            "f" | "first" => {
                ply = 0;
                if let Ok(board) = history.state_at(ply) {
                    print_position(board, moves, ply);
                }
            }
            "l" | "last" => {
                ply = last_ply;
                if let Ok(board) = history.state_at(ply) {
                    print_position(board, moves, ply);
                }
            }
            "g" | "goto" => match words.next().map(str::parse::<usize>) {
                Some(Ok(target)) => match history.state_at(target) {
                    Ok(board) => {
                        ply = target;
                        print_position(board, moves, ply);
                    }
                    Err(e) => println!("{}: {}", "Error".red().bold(), e),
                },
                _ => println!("Usage: g <ply>"),
            },
            "json" | "j" => {
                if let Ok(board) = history.state_at(ply) {
                    println!("{}", serde_json::to_string_pretty(&board.to_grid()).unwrap());
                    println!();
                }
            }
            _ => {
                println!("Unknown command '{}'. Type {} for help.", input, "help".green());
            }
        }
    }
}

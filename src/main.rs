//! Command-line interface for replaying and inspecting chess games.
//!
//! ## Usage
//!
//! ```bash
//! # Tabulate the games in a dataset
//! plyview list --data games.csv --limit 10
//!
//! # Summary statistics (winner shares, openings, player ratings)
//! plyview stats --data games.csv
//!
//! # Step through one game interactively
//! plyview view --data games.csv --game abc123
//!
//! # Print a single position and exit
//! plyview view --data games.csv --game 0 --ply 17
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;

use plyview::dataset::{self, GameRecord};
use plyview::{display, stats, GameHistory};

/// plyview — replay chess games from CSV datasets in the terminal.
#[derive(Parser, Debug)]
#[command(name = "plyview")]
#[command(about = "Replay and inspect chess games from CSV datasets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the games in a dataset.
    List {
        /// Path to the games CSV file.
        #[arg(short, long)]
        data: String,

        /// Only show games involving this player id.
        #[arg(short, long)]
        player: Option<String>,

        /// Maximum number of rows to print.
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Print summary statistics for a dataset.
    Stats {
        /// Path to the games CSV file.
        #[arg(short, long)]
        data: String,

        /// How many entries per ranking table.
        #[arg(short, long, default_value_t = 5)]
        top: usize,
    },

    /// Replay one game and inspect its positions.
    View {
        /// Path to the games CSV file.
        #[arg(short, long)]
        data: String,

        /// Game to replay: its id, or a 0-based row index.
        #[arg(short, long)]
        game: String,

        /// Print the position after this ply and exit
        /// (without it the interactive viewer starts).
        #[arg(short = 'n', long)]
        ply: Option<usize>,
    },
}

fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            data,
            player,
            limit,
        } => {
            let games = dataset::load_games(&data).map_err(std::io::Error::other)?;
            run_list(&games, player.as_deref(), limit);
            Ok(())
        }
        Commands::Stats { data, top } => {
            let games = dataset::load_games(&data).map_err(std::io::Error::other)?;
            run_stats(&games, top);
            Ok(())
        }
        Commands::View { data, game, ply } => {
            let games = dataset::load_games(&data).map_err(std::io::Error::other)?;
            run_view(&games, &game, ply)
        }
    }
}

/// Prints a table of games, optionally filtered to one player.
fn run_list(games: &[GameRecord], player: Option<&str>, limit: usize) {
    let filtered: Vec<&GameRecord> = games
        .iter()
        .filter(|g| player.is_none_or(|p| g.involves(p)))
        .collect();

    match player {
        Some(p) => println!(
            "{}",
            format!("{} games involving {}", filtered.len(), p).yellow().bold()
        ),
        None => println!("{}", format!("{} games", filtered.len()).yellow().bold()),
    }
    println!(
        "{}",
        format!(
            "{:>4}  {:<10} {:<24} {:<24} {:<6} {:>5}  {}",
            "#", "id", "white", "black", "winner", "turns", "opening"
        )
        .bold()
    );

    for (i, game) in filtered.iter().take(limit).enumerate() {
        println!(
            "{:>4}  {:<10} {:<24} {:<24} {:<6} {:>5}  {}",
            i,
            game.id,
            format!("{} ({})", game.white_id, game.white_rating),
            format!("{} ({})", game.black_id, game.black_rating),
            game.winner.to_string(),
            game.turns,
            game.opening_name
        );
    }
    if filtered.len() > limit {
        println!("  ... and {} more", filtered.len() - limit);
    }
}

/// Prints the dataset-wide aggregates.
fn run_stats(games: &[GameRecord], top: usize) {
    println!("{}", format!("Dataset: {} games", games.len()).yellow().bold());
    println!();

    let shares = stats::winner_shares(games);
    println!("{}", "Winner shares".yellow().bold());
    println!("  white  {:>5.1}%", shares.white * 100.0);
    println!("  black  {:>5.1}%", shares.black * 100.0);
    println!("  draw   {:>5.1}%", shares.draw * 100.0);
    println!();

    println!("{}", format!("Top {} openings", top).yellow().bold());
    for (name, count) in stats::opening_counts(games).into_iter().take(top) {
        println!("  {:>5}  {}", count, name);
    }
    println!();

    println!(
        "{}",
        format!("Top {} players by average rating", top).yellow().bold()
    );
    for player in stats::top_players(games, top) {
        println!("  {:>6.0}  {}", player.rating, player.name);
    }
    println!();

    println!("{}", "Games per skill level".yellow().bold());
    for (level, count) in stats::skill_level_counts(games) {
        println!("  {:>5}  {}", count, level);
    }
}

/// Rebuilds one game's history and either prints a single position or
/// hands off to the interactive viewer.
fn run_view(games: &[GameRecord], key: &str, ply: Option<usize>) -> std::io::Result<()> {
    let record = find_game(games, key).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no game '{}' in the dataset", key),
        )
    })?;

    let moves = record.san_moves();
    let history = GameHistory::build(&moves);
    let title = format!(
        "{} ({}) vs {} ({}) - {}",
        record.white_id, record.white_rating, record.black_id, record.black_rating, record.opening_name
    );

    match ply {
        Some(target) => {
            let board = history.state_at(target).map_err(std::io::Error::other)?;
            println!("{}", title.cyan().bold());
            display::print_position(board, &moves, target);
            Ok(())
        }
        None => {
            display::run_viewer(&title, &moves, &history);
            Ok(())
        }
    }
}

/// Finds a game by id, falling back to a 0-based row index.
fn find_game<'a>(games: &'a [GameRecord], key: &str) -> Option<&'a GameRecord> {
    games
        .iter()
        .find(|g| g.id == key)
        .or_else(|| key.parse::<usize>().ok().and_then(|i| games.get(i)))
}

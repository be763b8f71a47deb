//! Loading finished games from CSV datasets.
//!
//! One row per game, in the column layout of the public lichess games
//! export: player ids and ratings, winner and victory status, opening
//! metadata, and a space-separated move list in short algebraic notation.
//! Columns not listed in [`GameRecord`] are ignored. Rows that fail to
//! deserialize are skipped with a warning; one bad line never sinks a
//! whole dataset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::Color;

/// Errors from dataset loading.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Who won a recorded game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    White,
    Black,
    Draw,
}

impl GameOutcome {
    /// The winning color, if the game was not drawn.
    pub fn winning_color(self) -> Option<Color> {
        match self {
            GameOutcome::White => Some(Color::White),
            GameOutcome::Black => Some(Color::Black),
            GameOutcome::Draw => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::White => write!(f, "white"),
            GameOutcome::Black => write!(f, "black"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// How a recorded game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VictoryStatus {
    Mate,
    Resign,
    OutOfTime,
    Draw,
}

impl fmt::Display for VictoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VictoryStatus::Mate => write!(f, "mate"),
            VictoryStatus::Resign => write!(f, "resign"),
            VictoryStatus::OutOfTime => write!(f, "outoftime"),
            VictoryStatus::Draw => write!(f, "draw"),
        }
    }
}

/// Rating bucket derived from a game's average rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Master,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "Beginner"),
            SkillLevel::Intermediate => write!(f, "Intermediate"),
            SkillLevel::Advanced => write!(f, "Advanced"),
            SkillLevel::Master => write!(f, "Master"),
        }
    }
}

/// One finished game as recorded in the dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameRecord {
    pub id: String,
    /// Game start as epoch milliseconds. Exports often store this in
    /// scientific notation, which the float parse accepts.
    pub created_at: f64,
    pub turns: u32,
    pub victory_status: VictoryStatus,
    pub winner: GameOutcome,
    pub white_id: String,
    pub white_rating: u32,
    pub black_id: String,
    pub black_rating: u32,
    /// Space-separated move tokens for the whole game.
    pub moves: String,
    pub opening_name: String,
    pub opening_ply: u32,
}

impl GameRecord {
    /// Mean of the two players' ratings, rounded down.
    pub fn average_rating(&self) -> u32 {
        (self.white_rating + self.black_rating) / 2
    }

    /// Rating bucket for this game: Master from 2000 up, Advanced from
    /// 1500, Intermediate from 1000, Beginner below that.
    pub fn skill_level(&self) -> SkillLevel {
        let avg = self.average_rating();
        if avg >= 2000 {
            SkillLevel::Master
        } else if avg >= 1500 {
            SkillLevel::Advanced
        } else if avg >= 1000 {
            SkillLevel::Intermediate
        } else {
            SkillLevel::Beginner
        }
    }

    /// The game's move tokens in ply order, as fed to the replay engine.
    pub fn san_moves(&self) -> Vec<&str> {
        self.moves.split_whitespace().collect()
    }

    /// True when `player` took part in this game on either side.
    pub fn involves(&self, player: &str) -> bool {
        self.white_id == player || self.black_id == player
    }

    /// The other player's id, if `player` took part in this game.
    pub fn opponent_of(&self, player: &str) -> Option<&str> {
        if self.white_id == player {
            Some(&self.black_id)
        } else if self.black_id == player {
            Some(&self.white_id)
        } else {
            None
        }
    }
}

/// Reads game records from any CSV source with a header row.
/// Undeserializable rows are skipped with a warning.
pub fn games_from_reader<R: Read>(reader: R) -> Vec<GameRecord> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut games = Vec::new();
    for (i, result) in csv_reader.deserialize::<GameRecord>().enumerate() {
        match result {
            Ok(record) => games.push(record),
            Err(err) => log::warn!("Skipping unreadable game row {}: {}", i + 1, err),
        }
    }
    games
}

/// Loads game records from a CSV file on disk.
pub fn load_games(path: impl AsRef<Path>) -> Result<Vec<GameRecord>, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let games = games_from_reader(BufReader::new(file));
    log::info!("Loaded {} games from {}", games.len(), path.display());
    Ok(games)
}

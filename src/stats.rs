//! Summary statistics over game records.
//!
//! Everything here is a pure function over a record slice: winner shares,
//! opening popularity, per-player rating averages, skill-level breakdowns,
//! and per-player match history. Outputs are deterministically ordered so
//! repeated runs print identically.

use std::collections::BTreeMap;

use crate::dataset::{GameOutcome, GameRecord, SkillLevel};
use crate::types::Color;

/// Fraction of games per winner category. All zero for an empty slice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WinnerShares {
    pub white: f64,
    pub black: f64,
    pub draw: f64,
}

/// Computes the share of games won by each side (and drawn).
pub fn winner_shares(games: &[GameRecord]) -> WinnerShares {
    let mut shares = WinnerShares::default();
    if games.is_empty() {
        return shares;
    }
    for game in games {
        match game.winner {
            GameOutcome::White => shares.white += 1.0,
            GameOutcome::Black => shares.black += 1.0,
            GameOutcome::Draw => shares.draw += 1.0,
        }
    }
    let total = games.len() as f64;
    shares.white /= total;
    shares.black /= total;
    shares.draw /= total;
    shares
}

/// Counts games per opening name, most played first (ties
/// alphabetically).
pub fn opening_counts(games: &[GameRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for game in games {
        *counts.entry(game.opening_name.as_str()).or_default() += 1;
    }
    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// A player's combined average rating across both colors.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRating {
    pub name: String,
    pub rating: f64,
}

/// Averages each player's rating per color, then combines the two color
/// averages into one figure per player. Sorted best first (ties
/// alphabetically).
pub fn player_ratings(games: &[GameRecord]) -> Vec<PlayerRating> {
    // (rating sum, game count) per player and color.
    let mut white: BTreeMap<&str, (u64, u32)> = BTreeMap::new();
    let mut black: BTreeMap<&str, (u64, u32)> = BTreeMap::new();
    for game in games {
        let w = white.entry(game.white_id.as_str()).or_default();
        w.0 += game.white_rating as u64;
        w.1 += 1;
        let b = black.entry(game.black_id.as_str()).or_default();
        b.0 += game.black_rating as u64;
        b.1 += 1;
    }

    let mut combined: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (name, (sum, count)) in white {
        combined.entry(name).or_default().push(sum as f64 / count as f64);
    }
    for (name, (sum, count)) in black {
        combined.entry(name).or_default().push(sum as f64 / count as f64);
    }

    let mut ratings: Vec<PlayerRating> = combined
        .into_iter()
        .map(|(name, sides)| PlayerRating {
            name: name.to_string(),
            rating: sides.iter().sum::<f64>() / sides.len() as f64,
        })
        .collect();
    ratings.sort_by(|a, b| b.rating.total_cmp(&a.rating).then_with(|| a.name.cmp(&b.name)));
    ratings
}

/// The `n` highest-rated players by combined average.
pub fn top_players(games: &[GameRecord], n: usize) -> Vec<PlayerRating> {
    let mut ratings = player_ratings(games);
    ratings.truncate(n);
    ratings
}

/// Counts games per derived skill level, weakest bucket first.
pub fn skill_level_counts(games: &[GameRecord]) -> Vec<(SkillLevel, usize)> {
    let mut counts: BTreeMap<SkillLevel, usize> = BTreeMap::new();
    for game in games {
        *counts.entry(game.skill_level()).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// One entry of a player's match history.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentGame<'a> {
    pub game: &'a GameRecord,
    pub opponent: &'a str,
    /// Outcome from the player's perspective, e.g. "won by mate".
    pub summary: String,
}

/// The player's `n` most recent games, newest first.
pub fn recent_games<'a>(games: &'a [GameRecord], player: &str, n: usize) -> Vec<RecentGame<'a>> {
    let mut involved: Vec<&GameRecord> = games.iter().filter(|g| g.involves(player)).collect();
    involved.sort_by(|a, b| {
        b.created_at
            .total_cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    involved.truncate(n);

    involved
        .into_iter()
        .map(|game| {
            let opponent = game.opponent_of(player).unwrap_or_default();
            let summary = match game.winner.winning_color() {
                Some(color) => {
                    let winner_id = match color {
                        Color::White => &game.white_id,
                        Color::Black => &game.black_id,
                    };
                    if winner_id == player {
                        format!("won by {}", game.victory_status)
                    } else {
                        format!("lost by {}", game.victory_status)
                    }
                }
                None => format!("ended with {}", game.victory_status),
            };
            RecentGame {
                game,
                opponent,
                summary,
            }
        })
        .collect()
}

//! Statistics calculation engine.
//!
//! Computes derived metrics from the stored roster and match history:
//! - Per-player standings, points and recent form
//! - Best-partner and nemesis chemistry insights
//! - League-wide teammate pair and rivalry rankings
//!
//! Everything here is a pure function over borrowed snapshots; no input is
//! mutated and repeated calls return identical results.

pub mod chemistry;
pub mod pairs;
pub mod standings;

pub use chemistry::{find_ideal_partner, find_nemesis};
pub use pairs::{top_rival_pairs, top_teammate_pairs};
pub use standings::{compute_standings, sort_table};

/// Calculate win rate from wins and games played.
pub fn win_rate(wins: u32, played: u32) -> f64 {
    if played == 0 {
        0.0
    } else {
        wins as f64 / played as f64
    }
}

/// League points: 3 per win, 1 per draw.
pub fn points(won: u32, drawn: u32) -> u32 {
    won * 3 + drawn
}

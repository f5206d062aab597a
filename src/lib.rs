//! # Pitchside
//!
//! A local five-a-side roster, match and standings tracker.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, matches, participations,
//!   derived records)
//! - **balance**: Position-aware team balancing engine
//! - **calculate**: Standings, chemistry and pairwise statistics
//! - **storage**: JSONL-backed roster and match repositories
//! - **config**: Configuration loading and validation
//!
//! The computation layers (`balance`, `calculate`) are pure functions over
//! borrowed snapshots: they never touch storage, never mutate their inputs,
//! and return identical results for identical inputs.

pub mod balance;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;

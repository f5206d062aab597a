//! Core data models for the tracker.

mod ids;
mod insights;
mod match_record;
mod player;
mod standings;

pub use ids::*;
pub use insights::*;
pub use match_record::*;
pub use player::*;
pub use standings::*;

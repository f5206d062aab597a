//! Roster player model.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Positional role on the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Role {
    /// Short label used in table output.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "GK",
            Role::Defender => "DEF",
            Role::Midfielder => "MID",
            Role::Forward => "FWD",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Goalkeeper => write!(f, "Goalkeeper"),
            Role::Defender => write!(f, "Defender"),
            Role::Midfielder => write!(f, "Midfielder"),
            Role::Forward => write!(f, "Forward"),
        }
    }
}

/// Mean of the four sub-ratings, rounded to one decimal.
pub fn overall_rating(technique: f64, physical: f64, tactics: f64, mental: f64) -> f64 {
    let mean = (technique + physical + tactics + mental) / 4.0;
    (mean * 10.0).round() / 10.0
}

/// A roster player with ability ratings on a 1-10 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: PlayerId,

    /// Full name
    pub name: String,

    /// Nickname shown in tables
    pub nickname: String,

    /// Age in years
    pub age: u32,

    /// Positional role
    pub role: Role,

    /// Technique rating
    pub technique: f64,

    /// Physical rating
    pub physical: f64,

    /// Tactics rating
    pub tactics: f64,

    /// Mental rating
    pub mental: f64,

    /// Mean of the four ratings, rounded to one decimal. Kept in sync by
    /// the constructors and builders.
    pub overall: f64,

    /// Primary strength (free text)
    pub strength: String,

    /// Primary weakness (free text)
    pub weakness: String,
}

impl Player {
    /// Create a new player with neutral 5.0 ratings.
    pub fn new(id: PlayerId, name: String, nickname: String, age: u32, role: Role) -> Self {
        Self {
            id,
            name,
            nickname,
            age,
            role,
            technique: 5.0,
            physical: 5.0,
            tactics: 5.0,
            mental: 5.0,
            overall: 5.0,
            strength: String::new(),
            weakness: String::new(),
        }
    }

    /// Builder method to set the four ability ratings. Recomputes the
    /// overall rating.
    pub fn with_ratings(mut self, technique: f64, physical: f64, tactics: f64, mental: f64) -> Self {
        self.technique = technique;
        self.physical = physical;
        self.tactics = tactics;
        self.mental = mental;
        self.overall = overall_rating(technique, physical, tactics, mental);
        self
    }

    /// Builder method to set the free-text notes.
    pub fn with_notes(mut self, strength: impl Into<String>, weakness: impl Into<String>) -> Self {
        self.strength = strength.into();
        self.weakness = weakness.into();
        self
    }

    /// Rating used as the defensive proxy when balancing teams.
    pub fn defense_stat(&self) -> f64 {
        self.tactics
    }
}

//! Derived standings models.

use serde::{Deserialize, Serialize};

use super::Player;

/// Result of a single match from one player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    /// Single-letter form used in table output.
    pub fn letter(&self) -> char {
        match self {
            MatchResult::Win => 'W',
            MatchResult::Draw => 'D',
            MatchResult::Loss => 'L',
        }
    }
}

/// A player's record derived from the full match history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStanding {
    /// The roster player this record belongs to
    pub player: Player,

    /// Games played
    pub played: u32,

    /// Wins
    pub won: u32,

    /// Draws
    pub drawn: u32,

    /// Losses
    pub lost: u32,

    /// Sum of winning margins minus losing margins
    pub goal_diff: i32,

    /// 3 per win, 1 per draw
    pub points: u32,

    /// Fraction of played matches won (0.0 when unplayed)
    pub win_rate: f64,

    /// Most recent results, newest first, at most five
    pub recent_form: Vec<MatchResult>,
}

impl PlayerStanding {
    /// All-zero record for a player with no recorded matches.
    pub fn empty(player: Player) -> Self {
        Self {
            player,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goal_diff: 0,
            points: 0,
            win_rate: 0.0,
            recent_form: Vec::new(),
        }
    }

    /// Form as a compact string, e.g. "WWLDW".
    pub fn form_string(&self) -> String {
        self.recent_form.iter().map(MatchResult::letter).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerId, Role};

    #[test]
    fn test_empty_standing() {
        let player = Player::new(
            PlayerId::from("p1"),
            "Mariano".to_string(),
            "Mariano".to_string(),
            52,
            Role::Goalkeeper,
        );
        let standing = PlayerStanding::empty(player);

        assert_eq!(standing.played, 0);
        assert_eq!(standing.points, 0);
        assert_eq!(standing.goal_diff, 0);
        assert!(standing.recent_form.is_empty());
    }

    #[test]
    fn test_form_string() {
        let player = Player::new(
            PlayerId::from("p1"),
            "Mariano".to_string(),
            "Mariano".to_string(),
            52,
            Role::Goalkeeper,
        );
        let mut standing = PlayerStanding::empty(player);
        standing.recent_form = vec![MatchResult::Win, MatchResult::Loss, MatchResult::Draw];

        assert_eq!(standing.form_string(), "WLD");
    }

    #[test]
    fn test_match_result_letters() {
        assert_eq!(MatchResult::Win.letter(), 'W');
        assert_eq!(MatchResult::Draw.letter(), 'D');
        assert_eq!(MatchResult::Loss.letter(), 'L');
    }

    #[test]
    fn test_standing_serialization() {
        let player = Player::new(
            PlayerId::from("p1"),
            "Mariano".to_string(),
            "Mariano".to_string(),
            52,
            Role::Goalkeeper,
        );
        let mut standing = PlayerStanding::empty(player);
        standing.recent_form = vec![MatchResult::Win];

        let json = serde_json::to_string(&standing).unwrap();
        let deserialized: PlayerStanding = serde_json::from_str(&json).unwrap();

        assert_eq!(standing.player.id, deserialized.player.id);
        assert_eq!(standing.recent_form, deserialized.recent_form);
    }
}

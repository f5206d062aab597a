//! Match result and participation models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EntityId, MatchId, PlayerId};

/// One of the two sides in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The opposing side.
    pub fn other(&self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Final outcome of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "A")]
    TeamA,
    #[serde(rename = "B")]
    TeamB,
    Draw,
}

impl Outcome {
    /// The winning side, if any.
    pub fn winning_side(&self) -> Option<Side> {
        match self {
            Outcome::TeamA => Some(Side::A),
            Outcome::TeamB => Some(Side::B),
            Outcome::Draw => None,
        }
    }
}

/// A completed match. Records are append-only: once stored they are never
/// edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier
    pub id: MatchId,

    /// Calendar day the match was played; used only for chronological
    /// ordering
    pub date: NaiveDate,

    /// Which side won
    pub outcome: Outcome,

    /// Winning margin in goals
    pub goal_margin: u32,
}

impl MatchRecord {
    /// Create a new match with a content-derived id from the date and the
    /// two side rosters.
    pub fn new(
        date: NaiveDate,
        outcome: Outcome,
        goal_margin: u32,
        side_a: &[PlayerId],
        side_b: &[PlayerId],
    ) -> Self {
        let join = |ids: &[PlayerId]| {
            ids.iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(",")
        };
        let id = EntityId::generate(&[&date.to_string(), &join(side_a), &join(side_b)]);

        Self {
            id,
            date,
            outcome,
            goal_margin,
        }
    }

    /// Create a match with a caller-supplied id.
    pub fn with_id(id: MatchId, date: NaiveDate, outcome: Outcome, goal_margin: u32) -> Self {
        Self {
            id,
            date,
            outcome,
            goal_margin,
        }
    }

    /// Winning margin with the draw rule applied: a drawn match contributes
    /// zero goals regardless of the stored value.
    pub fn effective_margin(&self) -> u32 {
        match self.outcome {
            Outcome::Draw => 0,
            _ => self.goal_margin,
        }
    }
}

/// Join row recording that a player took part in a match on a given side.
///
/// A player appears at most once per match; a match's participations split
/// its players into the two sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participation {
    /// Match this row belongs to
    pub match_id: MatchId,

    /// Player who took part
    pub player_id: PlayerId,

    /// Side the player was on
    pub side: Side,
}

impl Participation {
    /// Create a new participation row.
    pub fn new(match_id: MatchId, player_id: PlayerId, side: Side) -> Self {
        Self {
            match_id,
            player_id,
            side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
    }

    #[test]
    fn test_winning_side() {
        assert_eq!(Outcome::TeamA.winning_side(), Some(Side::A));
        assert_eq!(Outcome::TeamB.winning_side(), Some(Side::B));
        assert_eq!(Outcome::Draw.winning_side(), None);
    }

    #[test]
    fn test_effective_margin_zero_on_draw() {
        let record = MatchRecord::with_id(MatchId::from("m1"), date("2026-01-29"), Outcome::Draw, 3);
        assert_eq!(record.effective_margin(), 0);
    }

    #[test]
    fn test_effective_margin_on_win() {
        let record =
            MatchRecord::with_id(MatchId::from("m1"), date("2026-01-15"), Outcome::TeamA, 2);
        assert_eq!(record.effective_margin(), 2);
    }

    #[test]
    fn test_match_id_deterministic() {
        let side_a = vec![PlayerId::from("p1"), PlayerId::from("p4")];
        let side_b = vec![PlayerId::from("p2"), PlayerId::from("p5")];

        let m1 = MatchRecord::new(date("2026-01-15"), Outcome::TeamA, 2, &side_a, &side_b);
        let m2 = MatchRecord::new(date("2026-01-15"), Outcome::TeamA, 2, &side_a, &side_b);
        assert_eq!(m1.id, m2.id);

        let m3 = MatchRecord::new(date("2026-01-22"), Outcome::TeamA, 2, &side_a, &side_b);
        assert_ne!(m1.id, m3.id);
    }

    #[test]
    fn test_outcome_serialization_labels() {
        assert_eq!(serde_json::to_string(&Outcome::TeamA).unwrap(), "\"A\"");
        assert_eq!(serde_json::to_string(&Outcome::TeamB).unwrap(), "\"B\"");
        assert_eq!(serde_json::to_string(&Outcome::Draw).unwrap(), "\"Draw\"");
    }

    #[test]
    fn test_match_serialization() {
        let record =
            MatchRecord::with_id(MatchId::from("m1"), date("2026-01-15"), Outcome::TeamB, 1);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MatchRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.id, deserialized.id);
        assert_eq!(record.date, deserialized.date);
        assert_eq!(record.outcome, deserialized.outcome);
    }

    #[test]
    fn test_participation_serialization() {
        let row = Participation::new(MatchId::from("m1"), PlayerId::from("p1"), Side::B);
        let json = serde_json::to_string(&row).unwrap();
        let deserialized: Participation = serde_json::from_str(&json).unwrap();

        assert_eq!(row.match_id, deserialized.match_id);
        assert_eq!(row.side, deserialized.side);
    }
}

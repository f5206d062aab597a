//! Chemistry and pairwise insight models.

use serde::{Deserialize, Serialize};

use super::Player;

/// A player's most successful teammate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerInsight {
    /// The teammate
    pub partner: Player,

    /// Matches played on the same side
    pub matches_together: u32,

    /// Wins while on the same side
    pub wins_together: u32,

    /// Fraction of shared matches won
    pub win_rate: f64,
}

/// The opponent a player most often loses to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RivalInsight {
    /// The opponent
    pub rival: Player,

    /// Matches played on opposite sides
    pub matches_against: u32,

    /// Losses while facing this opponent
    pub losses_against: u32,

    /// Fraction of faced matches lost
    pub loss_rate: f64,
}

/// Aggregate record of two players on the same side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairStat {
    /// First player of the canonical pair
    pub player1: Player,

    /// Second player of the canonical pair
    pub player2: Player,

    /// Matches played together
    pub matches_together: u32,

    /// Matches won together
    pub wins_together: u32,

    /// Fraction of shared matches won
    pub win_rate: f64,
}

/// Head-to-head record of two players on opposite sides. The dominant
/// player is listed first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RivalryStat {
    /// The player winning the larger share of the head-to-head
    pub dominant: Player,

    /// The player on the losing end
    pub underdog: Player,

    /// Matches played against each other
    pub matches_against: u32,

    /// Head-to-head wins for the dominant player
    pub dominant_wins: u32,

    /// Dominant player's share of the head-to-head outcomes
    pub dominance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerId, Role};

    fn player(id: &str) -> Player {
        Player::new(
            PlayerId::from(id),
            id.to_string(),
            id.to_string(),
            30,
            Role::Midfielder,
        )
    }

    #[test]
    fn test_partner_insight_serialization() {
        let insight = PartnerInsight {
            partner: player("p2"),
            matches_together: 3,
            wins_together: 2,
            win_rate: 2.0 / 3.0,
        };

        let json = serde_json::to_string(&insight).unwrap();
        let deserialized: PartnerInsight = serde_json::from_str(&json).unwrap();

        assert_eq!(insight.partner.id, deserialized.partner.id);
        assert_eq!(insight.matches_together, deserialized.matches_together);
    }

    #[test]
    fn test_rivalry_stat_serialization() {
        let stat = RivalryStat {
            dominant: player("p1"),
            underdog: player("p2"),
            matches_against: 4,
            dominant_wins: 3,
            dominance: 0.75,
        };

        let json = serde_json::to_string(&stat).unwrap();
        let deserialized: RivalryStat = serde_json::from_str(&json).unwrap();

        assert_eq!(stat.dominant.id, deserialized.dominant.id);
        assert_eq!(stat.dominance, deserialized.dominance);
    }
}

//! Best-partner and nemesis analysis for a single player.

use std::collections::HashMap;

use crate::models::{
    MatchId, MatchRecord, Participation, PartnerInsight, Player, PlayerId, RivalInsight,
};

/// Minimum shared or faced matches before an insight is reported.
pub const MIN_SAMPLE: u32 = 1;

/// The teammate with whom the player wins most often.
///
/// Returns `None` when no teammate reaches the minimum sample. Ties on win
/// rate prefer the larger sample, then the lexicographically smallest id.
pub fn find_ideal_partner(
    player_id: &PlayerId,
    players: &[Player],
    matches: &[MatchRecord],
    participations: &[Participation],
) -> Option<PartnerInsight> {
    let match_index: HashMap<&MatchId, &MatchRecord> =
        matches.iter().map(|m| (&m.id, m)).collect();

    let mut counters: HashMap<&PlayerId, (u32, u32)> = HashMap::new();

    for row in participations.iter().filter(|r| &r.player_id == player_id) {
        let Some(record) = match_index.get(&row.match_id) else {
            continue;
        };
        let won = record.outcome.winning_side() == Some(row.side);

        let teammates = participations.iter().filter(|r| {
            r.match_id == row.match_id && r.side == row.side && &r.player_id != player_id
        });
        for teammate in teammates {
            let counter = counters.entry(&teammate.player_id).or_insert((0, 0));
            counter.1 += 1;
            if won {
                counter.0 += 1;
            }
        }
    }

    select_best(counters, players).map(|(partner, wins, total)| PartnerInsight {
        partner: partner.clone(),
        matches_together: total,
        wins_together: wins,
        win_rate: super::win_rate(wins, total),
    })
}

/// The opponent against whom the player loses most often.
///
/// Returns `None` when no opponent reaches the minimum sample. Same
/// tie-break rule as [`find_ideal_partner`].
pub fn find_nemesis(
    player_id: &PlayerId,
    players: &[Player],
    matches: &[MatchRecord],
    participations: &[Participation],
) -> Option<RivalInsight> {
    let match_index: HashMap<&MatchId, &MatchRecord> =
        matches.iter().map(|m| (&m.id, m)).collect();

    let mut counters: HashMap<&PlayerId, (u32, u32)> = HashMap::new();

    for row in participations.iter().filter(|r| &r.player_id == player_id) {
        let Some(record) = match_index.get(&row.match_id) else {
            continue;
        };
        let lost = record.outcome.winning_side() == Some(row.side.other());

        let opponents = participations
            .iter()
            .filter(|r| r.match_id == row.match_id && r.side != row.side);
        for opponent in opponents {
            let counter = counters.entry(&opponent.player_id).or_insert((0, 0));
            counter.1 += 1;
            if lost {
                counter.0 += 1;
            }
        }
    }

    select_best(counters, players).map(|(rival, losses, total)| RivalInsight {
        rival: rival.clone(),
        matches_against: total,
        losses_against: losses,
        loss_rate: super::win_rate(losses, total),
    })
}

/// Pick the candidate with the highest hit rate; ties prefer the larger
/// sample, then the lexicographically smallest id. Candidates missing from
/// the roster snapshot are skipped.
fn select_best<'a>(
    counters: HashMap<&PlayerId, (u32, u32)>,
    players: &'a [Player],
) -> Option<(&'a Player, u32, u32)> {
    let mut candidates: Vec<(&PlayerId, u32, u32)> = counters
        .into_iter()
        .filter(|(_, (_, total))| *total >= MIN_SAMPLE)
        .map(|(id, (hits, total))| (id, hits, total))
        .collect();

    candidates.sort_by(|a, b| {
        let rate_a = super::win_rate(a.1, a.2);
        let rate_b = super::win_rate(b.1, b.2);
        rate_b
            .partial_cmp(&rate_a)
            .unwrap()
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.0.cmp(b.0))
    });

    candidates.into_iter().find_map(|(id, hits, total)| {
        players.iter().find(|p| &p.id == id).map(|p| (p, hits, total))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Outcome, Role, Side};
    use chrono::NaiveDate;

    fn player(id: &str) -> Player {
        Player::new(
            PlayerId::from(id),
            id.to_string(),
            id.to_string(),
            30,
            Role::Midfielder,
        )
    }

    fn record(id: &str, day: &str, outcome: Outcome) -> MatchRecord {
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
        MatchRecord::with_id(MatchId::from(id), date, outcome, 1)
    }

    fn row(match_id: &str, player_id: &str, side: Side) -> Participation {
        Participation::new(MatchId::from(match_id), PlayerId::from(player_id), side)
    }

    #[test]
    fn test_no_matches_means_no_partner() {
        let players = vec![player("p1"), player("p2")];
        let result = find_ideal_partner(&PlayerId::from("p1"), &players, &[], &[]);
        assert!(result.is_none());
    }

    #[test]
    fn test_single_shared_match_qualifies() {
        let players = vec![player("p1"), player("p2")];
        let matches = vec![record("m1", "2026-01-15", Outcome::TeamA)];
        let participations = vec![row("m1", "p1", Side::A), row("m1", "p2", Side::A)];

        let insight =
            find_ideal_partner(&PlayerId::from("p1"), &players, &matches, &participations)
                .unwrap();

        assert_eq!(insight.partner.id.as_str(), "p2");
        assert_eq!(insight.matches_together, 1);
        assert_eq!(insight.wins_together, 1);
        assert_eq!(insight.win_rate, 1.0);
    }

    #[test]
    fn test_ever_present_teammate_wins_two_of_three() {
        // t1 shares all three of p1's matches; the opposition rotates.
        let players = vec![player("p1"), player("t1"), player("o1"), player("o2")];
        let matches = vec![
            record("m1", "2026-01-15", Outcome::TeamA),
            record("m2", "2026-01-22", Outcome::TeamA),
            record("m3", "2026-01-29", Outcome::TeamB),
        ];
        let participations = vec![
            row("m1", "p1", Side::A),
            row("m1", "t1", Side::A),
            row("m1", "o1", Side::B),
            row("m2", "p1", Side::A),
            row("m2", "t1", Side::A),
            row("m2", "o2", Side::B),
            row("m3", "p1", Side::A),
            row("m3", "t1", Side::A),
            row("m3", "o1", Side::B),
        ];

        let insight =
            find_ideal_partner(&PlayerId::from("p1"), &players, &matches, &participations)
                .unwrap();

        assert_eq!(insight.partner.id.as_str(), "t1");
        assert_eq!(insight.matches_together, 3);
        assert_eq!(insight.wins_together, 2);
        assert!((insight.win_rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_rate_prefers_larger_sample() {
        // t1: 1 win of 1. t2: 2 wins of 2. Same 100% rate.
        let players = vec![player("p1"), player("t1"), player("t2")];
        let matches = vec![
            record("m1", "2026-01-15", Outcome::TeamA),
            record("m2", "2026-01-22", Outcome::TeamA),
        ];
        let participations = vec![
            row("m1", "p1", Side::A),
            row("m1", "t1", Side::A),
            row("m1", "t2", Side::A),
            row("m2", "p1", Side::A),
            row("m2", "t2", Side::A),
        ];

        let insight =
            find_ideal_partner(&PlayerId::from("p1"), &players, &matches, &participations)
                .unwrap();

        assert_eq!(insight.partner.id.as_str(), "t2");
        assert_eq!(insight.matches_together, 2);
    }

    #[test]
    fn test_full_tie_prefers_smallest_id() {
        let players = vec![player("p1"), player("tb"), player("ta")];
        let matches = vec![record("m1", "2026-01-15", Outcome::TeamA)];
        let participations = vec![
            row("m1", "p1", Side::A),
            row("m1", "tb", Side::A),
            row("m1", "ta", Side::A),
        ];

        let insight =
            find_ideal_partner(&PlayerId::from("p1"), &players, &matches, &participations)
                .unwrap();

        assert_eq!(insight.partner.id.as_str(), "ta");
    }

    #[test]
    fn test_partner_dangling_candidate_is_skipped() {
        // "ghost" has the better rate but is gone from the roster.
        let players = vec![player("p1"), player("t1")];
        let matches = vec![
            record("m1", "2026-01-15", Outcome::TeamA),
            record("m2", "2026-01-22", Outcome::TeamB),
        ];
        let participations = vec![
            row("m1", "p1", Side::A),
            row("m1", "ghost", Side::A),
            row("m2", "p1", Side::A),
            row("m2", "t1", Side::A),
        ];

        let insight =
            find_ideal_partner(&PlayerId::from("p1"), &players, &matches, &participations)
                .unwrap();

        assert_eq!(insight.partner.id.as_str(), "t1");
        assert_eq!(insight.wins_together, 0);
    }

    #[test]
    fn test_nemesis_highest_loss_rate() {
        // p1 loses both matches against o1, wins the one against o2.
        let players = vec![player("p1"), player("o1"), player("o2")];
        let matches = vec![
            record("m1", "2026-01-15", Outcome::TeamB),
            record("m2", "2026-01-22", Outcome::TeamB),
            record("m3", "2026-01-29", Outcome::TeamA),
        ];
        let participations = vec![
            row("m1", "p1", Side::A),
            row("m1", "o1", Side::B),
            row("m2", "p1", Side::A),
            row("m2", "o1", Side::B),
            row("m3", "p1", Side::A),
            row("m3", "o2", Side::B),
        ];

        let insight =
            find_nemesis(&PlayerId::from("p1"), &players, &matches, &participations).unwrap();

        assert_eq!(insight.rival.id.as_str(), "o1");
        assert_eq!(insight.matches_against, 2);
        assert_eq!(insight.losses_against, 2);
        assert_eq!(insight.loss_rate, 1.0);
    }

    #[test]
    fn test_nemesis_draws_are_not_losses() {
        let players = vec![player("p1"), player("o1")];
        let matches = vec![record("m1", "2026-01-15", Outcome::Draw)];
        let participations = vec![row("m1", "p1", Side::A), row("m1", "o1", Side::B)];

        let insight =
            find_nemesis(&PlayerId::from("p1"), &players, &matches, &participations).unwrap();

        assert_eq!(insight.matches_against, 1);
        assert_eq!(insight.losses_against, 0);
        assert_eq!(insight.loss_rate, 0.0);
    }

    #[test]
    fn test_no_opponents_means_no_nemesis() {
        // Degenerate match with everyone on one side.
        let players = vec![player("p1"), player("t1")];
        let matches = vec![record("m1", "2026-01-15", Outcome::TeamA)];
        let participations = vec![row("m1", "p1", Side::A), row("m1", "t1", Side::A)];

        let insight = find_nemesis(&PlayerId::from("p1"), &players, &matches, &participations);
        assert!(insight.is_none());
    }

    #[test]
    fn test_dangling_match_reference_is_skipped() {
        let players = vec![player("p1"), player("t1")];
        let matches = vec![record("m1", "2026-01-15", Outcome::TeamA)];
        let participations = vec![
            row("m1", "p1", Side::A),
            row("m1", "t1", Side::A),
            row("gone", "p1", Side::A),
            row("gone", "t1", Side::A),
        ];

        let insight =
            find_ideal_partner(&PlayerId::from("p1"), &players, &matches, &participations)
                .unwrap();

        assert_eq!(insight.matches_together, 1);
    }
}

//! League-wide teammate pair and rivalry aggregation.
//!
//! Enumerates every same-side and cross-side pair per match; O(matches x
//! teamSize^2), which is fine at five-a-side scale.

use std::collections::HashMap;

use crate::models::{
    MatchId, MatchRecord, PairStat, Participation, Player, PlayerId, RivalryStat, Side,
};

/// Minimum shared or faced matches before a pair is ranked.
pub const MIN_PAIR_MATCHES: u32 = 2;

/// Default number of pairs returned by the ranking queries.
pub const DEFAULT_TOP_N: usize = 5;

/// Index participations into (side A, side B) rosters per match.
fn sides_by_match(
    participations: &[Participation],
) -> HashMap<&MatchId, (Vec<&PlayerId>, Vec<&PlayerId>)> {
    let mut index: HashMap<&MatchId, (Vec<&PlayerId>, Vec<&PlayerId>)> = HashMap::new();
    for row in participations {
        let entry = index.entry(&row.match_id).or_default();
        match row.side {
            Side::A => entry.0.push(&row.player_id),
            Side::B => entry.1.push(&row.player_id),
        }
    }
    index
}

/// Canonical (sorted) ordering of a pair, so (x, y) and (y, x) share one
/// aggregation bucket.
fn canonical_pair(x: &PlayerId, y: &PlayerId) -> (PlayerId, PlayerId) {
    if x <= y {
        (x.clone(), y.clone())
    } else {
        (y.clone(), x.clone())
    }
}

/// Rank teammate pairs by joint win rate, best first.
///
/// Pairs below [`MIN_PAIR_MATCHES`] shared matches are dropped, as are
/// pairs referencing players missing from the roster snapshot. Ties are
/// resolved by sample size, then canonical id order, so output is fully
/// deterministic.
pub fn top_teammate_pairs(
    players: &[Player],
    matches: &[MatchRecord],
    participations: &[Participation],
    top_n: usize,
) -> Vec<PairStat> {
    let index = sides_by_match(participations);
    let mut buckets: HashMap<(PlayerId, PlayerId), (u32, u32)> = HashMap::new();

    for record in matches {
        let Some((side_a, side_b)) = index.get(&record.id) else {
            continue;
        };

        for (side_players, side) in [(side_a, Side::A), (side_b, Side::B)] {
            let won = record.outcome.winning_side() == Some(side);
            for i in 0..side_players.len() {
                for j in (i + 1)..side_players.len() {
                    let key = canonical_pair(side_players[i], side_players[j]);
                    let counter = buckets.entry(key).or_insert((0, 0));
                    counter.1 += 1;
                    if won {
                        counter.0 += 1;
                    }
                }
            }
        }
    }

    let mut pairs: Vec<PairStat> = buckets
        .into_iter()
        .filter(|(_, (_, total))| *total >= MIN_PAIR_MATCHES)
        .filter_map(|((first, second), (wins, total))| {
            let player1 = players.iter().find(|p| p.id == first)?;
            let player2 = players.iter().find(|p| p.id == second)?;
            Some(PairStat {
                player1: player1.clone(),
                player2: player2.clone(),
                matches_together: total,
                wins_together: wins,
                win_rate: super::win_rate(wins, total),
            })
        })
        .collect();

    pairs.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap()
            .then_with(|| b.matches_together.cmp(&a.matches_together))
            .then_with(|| a.player1.id.cmp(&b.player1.id))
            .then_with(|| a.player2.id.cmp(&b.player2.id))
    });
    pairs.truncate(top_n);
    pairs
}

/// Rank rival pairs by how one-sided the head-to-head is, most lopsided
/// first. The dominant player is always reported first, regardless of the
/// canonical bucket ordering.
pub fn top_rival_pairs(
    players: &[Player],
    matches: &[MatchRecord],
    participations: &[Participation],
    top_n: usize,
) -> Vec<RivalryStat> {
    let index = sides_by_match(participations);
    // Wins are tracked from the canonically-first player's perspective.
    let mut buckets: HashMap<(PlayerId, PlayerId), (u32, u32)> = HashMap::new();

    for record in matches {
        let Some((side_a, side_b)) = index.get(&record.id) else {
            continue;
        };

        for &pa in side_a {
            for &pb in side_b {
                let first_is_a = pa <= pb;
                let key = canonical_pair(pa, pb);
                let counter = buckets.entry(key).or_insert((0, 0));
                counter.1 += 1;

                let first_won = match record.outcome.winning_side() {
                    Some(Side::A) => first_is_a,
                    Some(Side::B) => !first_is_a,
                    None => false,
                };
                if first_won {
                    counter.0 += 1;
                }
            }
        }
    }

    let mut rivals: Vec<RivalryStat> = buckets
        .into_iter()
        .filter(|(_, (_, total))| *total >= MIN_PAIR_MATCHES)
        .filter_map(|((first, second), (first_wins, total))| {
            let p1 = players.iter().find(|p| p.id == first)?;
            let p2 = players.iter().find(|p| p.id == second)?;

            let second_wins = total - first_wins;
            let (dominant, underdog, dominant_wins) = if first_wins >= second_wins {
                (p1.clone(), p2.clone(), first_wins)
            } else {
                (p2.clone(), p1.clone(), second_wins)
            };

            Some(RivalryStat {
                dominant,
                underdog,
                matches_against: total,
                dominant_wins,
                dominance: super::win_rate(dominant_wins, total),
            })
        })
        .collect();

    rivals.sort_by(|a, b| {
        b.dominance
            .partial_cmp(&a.dominance)
            .unwrap()
            .then_with(|| b.matches_against.cmp(&a.matches_against))
            .then_with(|| a.dominant.id.cmp(&b.dominant.id))
            .then_with(|| a.underdog.id.cmp(&b.underdog.id))
    });
    rivals.truncate(top_n);
    rivals
}

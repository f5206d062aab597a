//! Per-player standings derived from the match history.

use std::collections::HashMap;

use crate::models::{
    MatchId, MatchRecord, MatchResult, Participation, Player, PlayerId, PlayerStanding, Side,
};

/// Number of recent results kept in a player's form sequence.
pub const FORM_WINDOW: usize = 5;

/// Derive one standing per roster player, in roster order.
///
/// Matches are replayed in ascending date order per player so the form
/// sequence is built correctly, then reported newest first. Participations
/// pointing at unknown matches are skipped; a player with no recorded
/// matches gets an all-zero record.
pub fn compute_standings(
    players: &[Player],
    matches: &[MatchRecord],
    participations: &[Participation],
) -> Vec<PlayerStanding> {
    let match_index: HashMap<&MatchId, &MatchRecord> =
        matches.iter().map(|m| (&m.id, m)).collect();

    let mut by_player: HashMap<&PlayerId, Vec<&Participation>> = HashMap::new();
    for row in participations {
        by_player.entry(&row.player_id).or_default().push(row);
    }

    players
        .iter()
        .map(|player| {
            let mut rows: Vec<(&MatchRecord, Side)> = by_player
                .get(&player.id)
                .map(|rows| {
                    rows.iter()
                        .filter_map(|row| {
                            match_index.get(&row.match_id).map(|m| (*m, row.side))
                        })
                        .collect()
                })
                .unwrap_or_default();

            rows.sort_by_key(|(record, _)| record.date);

            let mut won = 0;
            let mut drawn = 0;
            let mut lost = 0;
            let mut goal_diff: i32 = 0;
            let mut results: Vec<MatchResult> = Vec::new();

            for (record, side) in rows {
                match record.outcome.winning_side() {
                    Some(winner) if winner == side => {
                        won += 1;
                        goal_diff += record.effective_margin() as i32;
                        results.push(MatchResult::Win);
                    }
                    Some(_) => {
                        lost += 1;
                        goal_diff -= record.effective_margin() as i32;
                        results.push(MatchResult::Loss);
                    }
                    None => {
                        drawn += 1;
                        results.push(MatchResult::Draw);
                    }
                }
            }

            let played = results.len() as u32;
            let recent_form: Vec<MatchResult> =
                results.iter().rev().take(FORM_WINDOW).copied().collect();

            PlayerStanding {
                player: player.clone(),
                played,
                won,
                drawn,
                lost,
                goal_diff,
                points: super::points(won, drawn),
                win_rate: super::win_rate(won, played),
                recent_form,
            }
        })
        .collect()
}

/// Order a standings table: points, then goal difference, then wins, all
/// descending. Remaining ties keep their input order (the sort is stable).
pub fn sort_table(standings: &mut [PlayerStanding]) {
    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_diff.cmp(&a.goal_diff))
            .then_with(|| b.won.cmp(&a.won))
    });
}

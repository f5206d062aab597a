//! Team balancing engine.
//!
//! Splits a selected pool of players into two sides in three passes:
//! goalkeepers in input order, defenders by snake draft on the defensive
//! stat, everyone else greedily onto the side with the lower running
//! average. Structural anomalies (missing goalkeepers, lopsided sides)
//! are reported as warnings, never as errors.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Player, PlayerId, Role, Side};

/// Player ids assigned to each side during one phase of the automatic pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideSplit {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
}

impl SideSplit {
    fn push(&mut self, side: Side, id: PlayerId) {
        match side {
            Side::A => self.team_a.push(id),
            Side::B => self.team_b.push(id),
        }
    }
}

/// How the automatic pass filled each slot. A goalkeeper reclassified as an
/// outfield player shows up under `outfield`, not `goalkeepers`. Manual
/// moves do not rewrite this; it always describes the automatic pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleBreakdown {
    pub goalkeepers: SideSplit,
    pub defenders: SideSplit,
    pub outfield: SideSplit,
}

/// Proposed split of the selected players into two sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamBalance {
    /// Side A roster
    pub team_a: Vec<Player>,

    /// Side B roster
    pub team_b: Vec<Player>,

    /// Mean overall rating of side A (0.0 when empty)
    pub avg_a: f64,

    /// Mean overall rating of side B (0.0 when empty)
    pub avg_b: f64,

    /// Absolute difference of the side averages
    pub difference: f64,

    /// Human-readable notes on structurally unusual inputs
    pub warnings: Vec<String>,

    /// Per-phase slot assignment from the automatic pass
    pub breakdown: RoleBreakdown,
}

impl TeamBalance {
    /// Players assigned to the given side.
    pub fn side(&self, side: Side) -> &[Player] {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// Move a player to the given side, recomputing averages and the
    /// imbalance score. Unknown ids and players already on the target side
    /// return the result unchanged.
    pub fn move_player(&self, player_id: &PlayerId, target: Side) -> TeamBalance {
        let mut moved = self.clone();

        let (from, to) = match target {
            Side::A => (&mut moved.team_b, &mut moved.team_a),
            Side::B => (&mut moved.team_a, &mut moved.team_b),
        };

        if let Some(pos) = from.iter().position(|p| &p.id == player_id) {
            let player = from.remove(pos);
            to.push(player);
            moved.recompute();
        }

        moved
    }

    fn recompute(&mut self) {
        self.avg_a = side_average(&self.team_a);
        self.avg_b = side_average(&self.team_b);
        self.difference = (self.avg_a - self.avg_b).abs();
    }
}

/// Mean overall rating of a side; an empty side averages 0.0.
fn side_average(team: &[Player]) -> f64 {
    if team.is_empty() {
        0.0
    } else {
        team.iter().map(|p| p.overall).sum::<f64>() / team.len() as f64
    }
}

/// Partition the selected players into two competitively even sides.
///
/// Never fails: degenerate inputs produce valid (possibly empty or
/// unbalanced) teams accompanied by warnings, and the caller decides
/// whether to accept or adjust.
pub fn balance_teams(selected: &[Player]) -> TeamBalance {
    let mut warnings = Vec::new();
    let mut breakdown = RoleBreakdown::default();

    let keepers: Vec<&Player> = selected
        .iter()
        .filter(|p| p.role == Role::Goalkeeper)
        .collect();
    let defenders: Vec<&Player> = selected
        .iter()
        .filter(|p| p.role == Role::Defender)
        .collect();
    let mut outfield: Vec<&Player> = selected
        .iter()
        .filter(|p| p.role != Role::Goalkeeper && p.role != Role::Defender)
        .collect();

    let mut team_a: Vec<Player> = Vec::new();
    let mut team_b: Vec<Player> = Vec::new();

    // Goalkeepers first, in input order: they are treated as roughly
    // interchangeable, so rating order does not matter here.
    match keepers.len() {
        0 => {
            warnings.push("no goalkeepers among the selected players".to_string());
        }
        1 => {
            warnings
                .push("only one goalkeeper selected: one side will play without one".to_string());
            team_a.push(keepers[0].clone());
            breakdown.goalkeepers.push(Side::A, keepers[0].id.clone());
        }
        _ => {
            team_a.push(keepers[0].clone());
            team_b.push(keepers[1].clone());
            breakdown.goalkeepers.push(Side::A, keepers[0].id.clone());
            breakdown.goalkeepers.push(Side::B, keepers[1].id.clone());

            let extras = &keepers[2..];
            if !extras.is_empty() {
                warnings.push(format!(
                    "{} extra goalkeeper(s) will play outfield: {}",
                    extras.len(),
                    extras
                        .iter()
                        .map(|p| p.nickname.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                outfield.extend_from_slice(extras);
            }
        }
    }

    // Defenders by snake draft on the defensive stat. Even rounds give the
    // first pick to B, odd rounds to A (B,A,A,B,B,A,...).
    let mut sorted_defenders = defenders;
    sorted_defenders.sort_by(|a, b| b.defense_stat().partial_cmp(&a.defense_stat()).unwrap());

    for (index, player) in sorted_defenders.iter().enumerate() {
        let odd_round = (index / 2) % 2 == 1;
        let first_pick = index % 2 == 0;
        let to_b = if first_pick { !odd_round } else { odd_round };

        if to_b {
            team_b.push((*player).clone());
            breakdown.defenders.push(Side::B, player.id.clone());
        } else {
            team_a.push((*player).clone());
            breakdown.defenders.push(Side::A, player.id.clone());
        }
    }

    // Everyone else strongest-first onto the side with the lower running
    // average. Ties go to the smaller side, then to A.
    outfield.sort_by(|a, b| b.overall.partial_cmp(&a.overall).unwrap());

    for player in outfield {
        let avg_a = side_average(&team_a);
        let avg_b = side_average(&team_b);

        let to_a = match avg_a.partial_cmp(&avg_b).unwrap() {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => team_a.len() <= team_b.len(),
        };

        if to_a {
            team_a.push(player.clone());
            breakdown.outfield.push(Side::A, player.id.clone());
        } else {
            team_b.push(player.clone());
            breakdown.outfield.push(Side::B, player.id.clone());
        }
    }

    if team_a.len().abs_diff(team_b.len()) > 1 {
        warnings.push(format!(
            "uneven side sizes: A has {}, B has {}",
            team_a.len(),
            team_b.len()
        ));
    }

    let mut result = TeamBalance {
        team_a,
        team_b,
        avg_a: 0.0,
        avg_b: 0.0,
        difference: 0.0,
        warnings,
        breakdown,
    };
    result.recompute();
    result
}

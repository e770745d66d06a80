//! Shared helpers for integration tests.
#![allow(dead_code)]

use pickleball_bracket_web::logic::group_label;
use pickleball_bracket_web::{
    record_score, regenerate_from_roster_with_rng, Stage, Tournament, TournamentConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn roster(n: usize) -> String {
    (0..n)
        .map(|i| format!("Player {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Singles tournament with `n` players, drawn with a fixed seed.
pub fn tournament(n: usize, config: TournamentConfig) -> Tournament {
    let mut rng = StdRng::seed_from_u64(7);
    regenerate_from_roster_with_rng("Test Cup", "admin", &roster(n), config, &mut rng).unwrap()
}

pub fn config(num_groups: usize) -> TournamentConfig {
    TournamentConfig {
        num_groups,
        ..TournamentConfig::default()
    }
}

/// Team id holding `position` (1-based) of group `group` once the group stage is played with
/// [`play_group_stage`].
pub fn seed(t: &Tournament, group: usize, position: usize) -> String {
    t.group_teams(&group_label(group))[position - 1].id.clone()
}

/// Score every group match so that, within each group, the team listed first beats everyone,
/// the second beats all but the first, and so on.
pub fn play_group_stage(t: &Tournament) -> Tournament {
    let fixtures: Vec<(String, String, String)> = t
        .group_matches()
        .map(|m| {
            (
                m.id.clone(),
                m.team_1.team_id().unwrap().clone(),
                m.team_2.team_id().unwrap().clone(),
            )
        })
        .collect();
    let mut next = t.clone();
    for (id, team_1, team_2) in fixtures {
        let (s1, s2) = if position_in_group(&next, &team_1) < position_in_group(&next, &team_2) {
            (11, 5)
        } else {
            (5, 11)
        };
        next = record_score(&next, &id, Some(s1), Some(s2)).unwrap();
    }
    next
}

fn position_in_group(t: &Tournament, team_id: &str) -> usize {
    let group = t.team(team_id).unwrap().group.clone().unwrap();
    t.group_teams(&group)
        .iter()
        .position(|team| team.id == team_id)
        .unwrap()
}

pub fn knockout_ids(t: &Tournament) -> Vec<String> {
    t.matches
        .iter()
        .filter(|m| m.stage == Stage::Knockout)
        .map(|m| m.id.clone())
        .collect()
}

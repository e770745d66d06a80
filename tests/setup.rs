//! Integration tests for rebuilding a tournament from a new roster.

mod common;

use common::{config, play_group_stage, roster, tournament};
use pickleball_bracket_web::{rebuild_from_roster, TournamentError};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn rebuild_keeps_identity_and_discards_results() {
    let played = play_group_stage(&tournament(4, config(1)));
    assert!(played.matches.iter().any(|m| m.score_1.is_some()));

    let mut rng = StdRng::seed_from_u64(5);
    let rebuilt = rebuild_from_roster(&played, &roster(6), Some(config(2)), &mut rng).unwrap();

    assert_eq!(rebuilt.id, played.id);
    assert_eq!(rebuilt.name, "Test Cup");
    assert_eq!(rebuilt.created_by, "admin");
    assert_eq!(rebuilt.teams.len(), 6);
    assert_eq!(rebuilt.config.num_groups, 2);
    assert_eq!(rebuilt.group_teams("Group B").len(), 3);
    assert!(rebuilt
        .matches
        .iter()
        .all(|m| m.score_1.is_none() && m.score_2.is_none() && m.winner_id.is_none()));
    assert!(rebuilt.teams.iter().all(|t| t.points == 0 && t.goals_scored == 0));
}

#[test]
fn rebuild_without_config_keeps_current_settings() {
    let t = tournament(8, config(2));
    let mut rng = StdRng::seed_from_u64(9);
    let rebuilt = rebuild_from_roster(&t, &roster(10), None, &mut rng).unwrap();
    assert_eq!(rebuilt.config, t.config);
    assert_eq!(rebuilt.teams.len(), 10);
    assert_eq!(rebuilt.id, t.id);
}

#[test]
fn rebuild_with_invalid_roster_is_an_error() {
    let t = tournament(4, config(1));
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        rebuild_from_roster(&t, "\n  \n", None, &mut rng),
        Err(TournamentError::EmptyRoster)
    );
}

//! Integration tests for roster parsing, team building, and group partitioning.

use pickleball_bracket_web::logic::{
    build_teams, group_label, pair_doubles, partition_groups, roster_lines,
};
use pickleball_bracket_web::{
    parse_roster, parse_roster_csv, regenerate_from_roster, Level, Player, Team, TeamMode,
    TournamentConfig, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn players(levels: &[Level]) -> Vec<Player> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| Player::new(i, format!("P{i}"), level))
        .collect()
}

#[test]
fn roster_lines_become_players_with_positional_ids() {
    let roster = "An - A\n\n  Binh - b \nChi\n - A\nDung, a";
    let players = parse_roster(roster);
    let summary: Vec<(&str, &str, Level)> = players
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str(), p.level))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("p-0", "An", Level::A),
            ("p-1", "Binh", Level::B),
            ("p-2", "Chi", Level::None),
            ("p-3", "Dung", Level::A),
        ]
    );
}

#[test]
fn csv_roster_skips_header_and_nameless_rows() {
    let sheet = "Name,Address,Level\nAn,Hanoi,a\n,Nowhere,B\nBinh,,\n";
    let players = parse_roster_csv(sheet.as_bytes()).unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "An");
    assert_eq!(players[0].address.as_deref(), Some("Hanoi"));
    assert_eq!(players[0].level, Level::A);
    assert_eq!(players[1].address, None);
    assert_eq!(players[1].level, Level::None);
    assert!(players.iter().all(|p| p.id.starts_with("p-import-")));
    assert_ne!(players[0].id, players[1].id);

    let lines = roster_lines(&players);
    assert_eq!(lines, "An - A\nBinh - None");
    let reparsed: Vec<(String, Level)> = parse_roster(&lines)
        .into_iter()
        .map(|p| (p.name, p.level))
        .collect();
    assert_eq!(
        reparsed,
        vec![("An".to_string(), Level::A), ("Binh".to_string(), Level::None)]
    );
}

#[test]
fn singles_builds_one_team_per_player() {
    let mut rng = StdRng::seed_from_u64(1);
    let teams = build_teams(players(&[Level::A, Level::None]), TeamMode::Singles, &mut rng);
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].id, "t-p-0");
    assert_eq!(teams[0].name, "P0");
    assert_eq!(teams[1].players.len(), 1);
}

#[test]
fn doubles_pairs_every_a_with_a_b() {
    let levels = [Level::A, Level::A, Level::A, Level::A, Level::B, Level::B, Level::B, Level::B];
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let teams = pair_doubles(players(&levels), &mut rng);
        assert_eq!(teams.len(), 4);
        for team in &teams {
            let tiers: HashSet<Level> = team.players.iter().map(|p| p.level).collect();
            assert_eq!(tiers, HashSet::from([Level::A, Level::B]));
        }
        let used: HashSet<&str> = teams
            .iter()
            .flat_map(|t| t.players.iter().map(|p| p.id.as_str()))
            .collect();
        assert_eq!(used.len(), 8);
    }
}

#[test]
fn doubles_pools_leftovers_and_drops_odd_player() {
    let mut rng = StdRng::seed_from_u64(3);
    // 3 A, 1 B, 1 untiered: one cross-tier pair, one pooled pair, one player left over.
    let levels = [Level::A, Level::A, Level::A, Level::B, Level::None];
    let teams = pair_doubles(players(&levels), &mut rng);
    assert_eq!(teams.len(), 2);
    let cross = teams
        .iter()
        .filter(|t| t.players.iter().any(|p| p.level == Level::B))
        .count();
    assert_eq!(cross, 1);
}

#[test]
fn doubles_team_id_ignores_draw_order() {
    let p = players(&[Level::A, Level::B]);
    let one = Team::doubles(p[0].clone(), p[1].clone());
    let two = Team::doubles(p[1].clone(), p[0].clone());
    assert_eq!(one.id, "team-p-0-p-1");
    assert_eq!(one.id, two.id);
    assert_eq!(one.name, "P0 / P1");
}

#[test]
fn groups_are_balanced_and_keep_every_team() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in 1..=20 {
        for groups in 1..=n.min(8) {
            let teams = build_teams(players(&vec![Level::None; n]), TeamMode::Singles, &mut rng);
            let split = partition_groups(teams, groups, &mut rng).unwrap();
            assert_eq!(split.len(), groups);
            let sizes: Vec<usize> = split.iter().map(|g| g.teams.len()).collect();
            let (min, max) = (sizes.iter().min().unwrap(), sizes.iter().max().unwrap());
            assert!(max - min <= 1, "sizes {sizes:?}");
            assert_eq!(sizes.iter().sum::<usize>(), n);
            for (i, group) in split.iter().enumerate() {
                assert_eq!(group.label, group_label(i));
                assert!(group
                    .teams
                    .iter()
                    .all(|t| t.group.as_deref() == Some(group.label.as_str())));
            }
        }
    }
}

#[test]
fn invalid_inputs_are_rejected_before_generation() {
    let config = TournamentConfig::default();
    assert_eq!(
        regenerate_from_roster("Cup", "", " \n\n", config.clone()),
        Err(TournamentError::EmptyRoster)
    );
    let zero = TournamentConfig {
        num_groups: 0,
        ..config.clone()
    };
    assert_eq!(
        regenerate_from_roster("Cup", "", "A\nB", zero),
        Err(TournamentError::InvalidGroupCount { groups: 0 })
    );
    let three = TournamentConfig {
        num_groups: 3,
        ..config
    };
    assert_eq!(
        regenerate_from_roster("Cup", "", "A\nB", three),
        Err(TournamentError::TooManyGroups { groups: 3, teams: 2 })
    );
}

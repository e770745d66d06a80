//! Setup: build a tournament from a roster (teams, groups, fixtures) and re-derive state.

use crate::logic::fixtures::generate_round_robin;
use crate::logic::groups::partition_groups;
use crate::logic::knockout::{derive_knockout, merge_forward};
use crate::logic::roster::parse_roster;
use crate::logic::standings::calculate_standings;
use crate::logic::teams::build_teams;
use crate::models::{Player, Stage, Tournament, TournamentConfig, TournamentError};
use rand::Rng;

/// Create a tournament from roster text, drawing teams and groups with the thread RNG.
pub fn regenerate_from_roster(
    name: &str,
    created_by: &str,
    roster: &str,
    config: TournamentConfig,
) -> Result<Tournament, TournamentError> {
    regenerate_from_roster_with_rng(name, created_by, roster, config, &mut rand::thread_rng())
}

/// Same as [`regenerate_from_roster`] with a caller-supplied random source.
pub fn regenerate_from_roster_with_rng<R: Rng + ?Sized>(
    name: &str,
    created_by: &str,
    roster: &str,
    config: TournamentConfig,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    build_tournament(name, created_by, parse_roster(roster), config, rng)
}

/// Create a tournament from already parsed players.
///
/// 1. Build teams for the configured mode.
/// 2. Partition them into groups.
/// 3. Generate each group's round robin.
/// 4. Derive standings and the (placeholder) knockout bracket.
pub fn build_tournament<R: Rng + ?Sized>(
    name: &str,
    created_by: &str,
    players: Vec<Player>,
    config: TournamentConfig,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    if players.is_empty() {
        return Err(TournamentError::EmptyRoster);
    }
    let teams = build_teams(players, config.mode, rng);
    let groups = partition_groups(teams, config.num_groups, rng)?;

    let mut teams = Vec::new();
    let mut matches = Vec::new();
    for group in groups {
        matches.extend(generate_round_robin(&group.teams, &group.label));
        teams.extend(group.teams);
    }
    log::info!(
        "Created tournament '{}': {} team(s) in {} group(s), {} group match(es)",
        name,
        teams.len(),
        config.num_groups,
        matches.len()
    );

    Ok(refresh(Tournament::new(name, created_by, teams, matches, config)))
}

/// Rebuild an existing tournament from a new roster, keeping its id, name, and creator.
/// All recorded results are discarded.
pub fn rebuild_from_roster<R: Rng + ?Sized>(
    tournament: &Tournament,
    roster: &str,
    config: Option<TournamentConfig>,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    let config = config.unwrap_or_else(|| tournament.config.clone());
    let rebuilt = regenerate_from_roster_with_rng(
        &tournament.name,
        &tournament.created_by,
        roster,
        config,
        rng,
    )?;
    Ok(Tournament {
        id: tournament.id,
        ..rebuilt
    })
}

/// Re-derive everything derived: the knockout bracket (carrying recorded knockout scores
/// forward) and every team's standings.
pub fn refresh(mut tournament: Tournament) -> Tournament {
    let previous = std::mem::take(&mut tournament.matches);
    let matches = if tournament.config.has_knockout {
        let knockout = derive_knockout(&tournament.teams, &tournament.config, &previous);
        merge_forward(&previous, knockout)
    } else {
        previous
            .into_iter()
            .filter(|m| m.stage == Stage::Group)
            .collect()
    };
    tournament.teams = calculate_standings(&tournament.teams, &matches);
    tournament.matches = matches;
    tournament
}

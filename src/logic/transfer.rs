//! Import/export: JSON snapshots, CSV results and standings sheets.
//!
//! Imports never touch the tournament they start from; a failed import leaves the caller's
//! current snapshot as it was.

use crate::logic::groups::{group_label, validate_group_count};
use crate::logic::scoring::clamp_score;
use crate::logic::setup::refresh;
use crate::logic::standings::{group_labels, group_table};
use crate::models::{GameMatch, Stage, TeamRef, Tournament, TournamentError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Pretty-printed JSON snapshot; [`import_json`] reads it back unchanged.
pub fn export_json(tournament: &Tournament) -> Result<String, TournamentError> {
    serde_json::to_string_pretty(tournament).map_err(|e| TournamentError::Export(e.to_string()))
}

/// Read a JSON snapshot, check it, and re-derive standings and bracket.
pub fn import_json(data: &str) -> Result<Tournament, TournamentError> {
    let mut tournament: Tournament = serde_json::from_str(data)?;
    validate(&tournament)?;
    for m in &mut tournament.matches {
        m.set_scores(m.score_1, m.score_2);
    }
    log::info!(
        "Imported tournament '{}' ({} teams, {} matches)",
        tournament.name,
        tournament.teams.len(),
        tournament.matches.len()
    );
    Ok(refresh(tournament))
}

/// Structural checks an imported snapshot must pass before it can replace live state.
fn validate(tournament: &Tournament) -> Result<(), TournamentError> {
    validate_group_count(tournament.config.num_groups, tournament.teams.len())
        .map_err(|e| TournamentError::Import(e.to_string()))?;
    let labels: HashSet<String> = (0..tournament.config.num_groups).map(group_label).collect();

    // Team id -> group label.
    let mut team_groups: HashMap<&str, &str> = HashMap::new();
    for team in &tournament.teams {
        let group = match team.group.as_deref() {
            Some(g) if labels.contains(g) => g,
            other => {
                return Err(TournamentError::Import(format!(
                    "team {} has group {:?} outside the configured groups",
                    team.id, other
                )));
            }
        };
        if team_groups.insert(team.id.as_str(), group).is_some() {
            return Err(TournamentError::Import(format!("duplicate team id {}", team.id)));
        }
    }
    let filled: HashSet<&str> = team_groups.values().copied().collect();
    if let Some(empty) = labels.iter().find(|l| !filled.contains(l.as_str())) {
        return Err(TournamentError::Import(format!("{empty} has no teams")));
    }

    let mut match_ids = HashSet::new();
    for m in &tournament.matches {
        if !match_ids.insert(m.id.as_str()) {
            return Err(TournamentError::Import(format!("duplicate match id {}", m.id)));
        }
        for side in [&m.team_1, &m.team_2] {
            match side {
                TeamRef::Resolved(id) if !team_groups.contains_key(id.as_str()) => {
                    return Err(TournamentError::Import(format!(
                        "match {} references unknown team {}",
                        m.id, id
                    )));
                }
                TeamRef::Resolved(id)
                    if m.stage == Stage::Group
                        && team_groups.get(id.as_str()) != Some(&m.round_name.as_str()) =>
                {
                    return Err(TournamentError::Import(format!(
                        "group match {} in {} has team {} from another group",
                        m.id, m.round_name, id
                    )));
                }
                TeamRef::Pending(_) if m.stage == Stage::Group => {
                    return Err(TournamentError::Import(format!(
                        "group match {} has a placeholder participant",
                        m.id
                    )));
                }
                _ => {}
            }
        }
        if let Some(slot) = m.slot {
            if slot.id() != m.id {
                return Err(TournamentError::Import(format!(
                    "match {} does not match its bracket slot {}",
                    m.id,
                    slot.id()
                )));
            }
        }
    }
    Ok(())
}

/// One row of the results sheet.
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    id: &'a str,
    stage: Stage,
    round: &'a str,
    team_1: String,
    score_1: Option<u32>,
    score_2: Option<u32>,
    team_2: String,
    winner: String,
}

/// Columns read back from an edited results sheet; the rest are ignored.
#[derive(Debug, Deserialize)]
struct ScoreRow {
    id: String,
    score_1: Option<i64>,
    score_2: Option<i64>,
}

/// Results sheet: one row per match with team names, scores, and winner.
pub fn results_csv(tournament: &Tournament) -> Result<String, TournamentError> {
    let rows = tournament.matches.iter().map(|m| ResultRow {
        id: &m.id,
        stage: m.stage,
        round: &m.round_name,
        team_1: tournament.display_name(&m.team_1),
        score_1: m.score_1,
        score_2: m.score_2,
        team_2: tournament.display_name(&m.team_2),
        winner: m
            .winner_id
            .as_ref()
            .map(|id| tournament.display_name(&TeamRef::team(id.clone())))
            .unwrap_or_default(),
    });
    write_csv(rows)
}

#[derive(Debug, Serialize)]
struct StandingRow<'a> {
    rank: usize,
    group: &'a str,
    team: &'a str,
    goal_difference: i64,
    points: u32,
}

/// Standings sheet: every group's ranked table, groups in label order.
pub fn standings_csv(tournament: &Tournament) -> Result<String, TournamentError> {
    let mut rows = Vec::new();
    let labels = group_labels(&tournament.teams);
    let tables: Vec<_> = labels
        .iter()
        .map(|label| (label, group_table(&tournament.teams, &tournament.matches, label)))
        .collect();
    for (label, table) in &tables {
        for (i, team) in table.iter().enumerate() {
            // Overall points (knockout included), as on the team record.
            let points = tournament.team(&team.id).map_or(team.points, |t| t.points);
            rows.push(StandingRow {
                rank: i + 1,
                group: label,
                team: &team.name,
                goal_difference: team.goal_difference(),
                points,
            });
        }
    }
    write_csv(rows)
}

fn write_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<String, TournamentError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| TournamentError::Export(e.to_string()))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| TournamentError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::Export(e.to_string()))
}

/// Apply an edited results sheet to an existing tournament, matching rows by match id.
///
/// Unknown ids are skipped. Rows for knockout slots whose participants are still undetermined
/// are retried after earlier rows have been applied, so a sheet holding a whole bracket's
/// results resolves round by round. Rows that never resolve are skipped.
pub fn apply_results_csv(tournament: &Tournament, data: &str) -> Result<Tournament, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());
    let mut pending: Vec<ScoreRow> = Vec::new();
    for row in rdr.deserialize() {
        pending.push(row?);
    }

    let mut next = tournament.clone();
    loop {
        let before = pending.len();
        let mut blocked = Vec::new();
        for row in pending {
            match next.matches.iter_mut().find(|m| m.id == row.id) {
                None => log::warn!("Results sheet: unknown match id {}, skipped", row.id),
                Some(m) if m.has_pending() && (row.score_1.is_some() || row.score_2.is_some()) => {
                    blocked.push(row)
                }
                Some(m) => set_row_scores(m, &row),
            }
        }
        next = refresh(next);
        if blocked.is_empty() || blocked.len() == before {
            for row in &blocked {
                log::warn!(
                    "Results sheet: match {} still has undetermined participants, skipped",
                    row.id
                );
            }
            break;
        }
        pending = blocked;
    }
    Ok(next)
}

fn set_row_scores(m: &mut GameMatch, row: &ScoreRow) {
    m.set_scores(row.score_1.map(clamp_score), row.score_2.map(clamp_score));
}

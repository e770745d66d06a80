//! Score entry and knockout settings: each edit returns a new, fully re-derived snapshot.

use crate::logic::setup::refresh;
use crate::models::{KnockoutConfigPatch, Tournament, TournamentError, MAX_SCORE};

/// Clamp a raw score into `0..=MAX_SCORE`.
pub fn clamp_score(raw: i64) -> u32 {
    u32::try_from(raw.clamp(0, i64::from(MAX_SCORE))).unwrap_or(MAX_SCORE)
}

/// Parse a score typed by a user. Blank or non-numeric input means "no score".
pub fn parse_score(input: &str) -> Option<u32> {
    input.trim().parse::<i64>().ok().map(clamp_score)
}

/// Record (or clear, with `None`) the scores of one match, then re-derive standings and the
/// bracket.
///
/// Scores for a match that still has a placeholder participant are rejected.
pub fn record_score(
    tournament: &Tournament,
    match_id: &str,
    score_1: Option<u32>,
    score_2: Option<u32>,
) -> Result<Tournament, TournamentError> {
    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    if (score_1.is_some() || score_2.is_some()) && tournament.matches[idx].has_pending() {
        return Err(TournamentError::PendingParticipants(match_id.to_string()));
    }

    let mut next = tournament.clone();
    next.matches[idx].set_scores(score_1, score_2);
    log::debug!(
        "Score {:?}-{:?} recorded for {} in '{}'",
        score_1,
        score_2,
        match_id,
        tournament.name
    );
    Ok(refresh(next))
}

/// Change the knockout settings and re-derive the bracket, keeping recorded scores for slots
/// that still exist.
pub fn update_knockout_config(tournament: &Tournament, patch: &KnockoutConfigPatch) -> Tournament {
    let mut next = tournament.clone();
    next.config = tournament.config.apply(patch);
    log::info!(
        "Knockout settings for '{}' now {:?}, shared third place: {}",
        next.name,
        next.config.knockout_type,
        next.config.shared_third_place
    );
    refresh(next)
}

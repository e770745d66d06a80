//! Final placings once the bracket is decided.

use crate::models::{GameMatch, KnockoutSlot, TeamId, Tournament};
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Podium {
    pub champion: TeamId,
    pub runner_up: TeamId,
    /// Both semifinal losers when third place is shared, otherwise the third-place winner.
    /// Empty until decided.
    pub third_place: Vec<TeamId>,
}

/// Placings, available once the final has a winner.
pub fn podium(tournament: &Tournament) -> Option<Podium> {
    let final_match = tournament.find_match(&KnockoutSlot::final_match().id())?;
    let champion = final_match.winner_id.clone()?;
    let runner_up = loser_id(final_match)?;

    let third_place = if tournament.config.shared_third_place {
        [KnockoutSlot::semi(1), KnockoutSlot::semi(2)]
            .iter()
            .filter_map(|slot| tournament.find_match(&slot.id()))
            .filter_map(loser_id)
            .collect()
    } else {
        tournament
            .find_match(&KnockoutSlot::third_place().id())
            .and_then(|m| m.winner_id.clone())
            .into_iter()
            .collect()
    };

    Some(Podium {
        champion,
        runner_up,
        third_place,
    })
}

fn loser_id(m: &GameMatch) -> Option<TeamId> {
    m.winner_id.as_ref()?;
    m.loser_ref().and_then(|r| r.team_id()).cloned()
}

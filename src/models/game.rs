//! Match, Stage, and knockout bracket slots.

use crate::models::team::{TeamId, TeamRef};
use serde::{Deserialize, Serialize};

/// Identifier for a match. Group matches are `m-group-<label>-<n>`; knockout ids come from
/// [`KnockoutSlot::id`] and are stable across bracket regeneration.
pub type MatchId = String;

/// Highest score a match side can hold; larger entries are capped.
pub const MAX_SCORE: u32 = 999;

/// Phase of the tournament this match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Group,
    Knockout,
}

/// Knockout round, earliest first.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutRound {
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    ThirdPlace,
    Final,
}

/// Position in the bracket: round plus 1-based index within the round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct KnockoutSlot {
    pub round: KnockoutRound,
    pub index: u8,
}

impl KnockoutSlot {
    pub fn round_of_16(index: u8) -> Self {
        Self {
            round: KnockoutRound::RoundOf16,
            index,
        }
    }

    pub fn quarter(index: u8) -> Self {
        Self {
            round: KnockoutRound::QuarterFinal,
            index,
        }
    }

    pub fn semi(index: u8) -> Self {
        Self {
            round: KnockoutRound::SemiFinal,
            index,
        }
    }

    pub fn third_place() -> Self {
        Self {
            round: KnockoutRound::ThirdPlace,
            index: 1,
        }
    }

    pub fn final_match() -> Self {
        Self {
            round: KnockoutRound::Final,
            index: 1,
        }
    }

    /// Match id assigned to this slot. Ids are the join key when scores are carried forward.
    pub fn id(&self) -> MatchId {
        match self.round {
            KnockoutRound::RoundOf16 => format!("ko-o{}", self.index),
            KnockoutRound::QuarterFinal => format!("ko-q{}", self.index),
            KnockoutRound::SemiFinal => format!("ko-semi-{}", self.index),
            KnockoutRound::ThirdPlace => "ko-third".to_string(),
            KnockoutRound::Final => "ko-final".to_string(),
        }
    }

    /// Display name for the slot.
    pub fn label(&self) -> String {
        match self.round {
            KnockoutRound::RoundOf16 => format!("Round of 16 - Match {}", self.index),
            KnockoutRound::QuarterFinal => format!("Quarterfinal {}", self.index),
            KnockoutRound::SemiFinal => format!("Semifinal {}", self.index),
            KnockoutRound::ThirdPlace => "Third place".to_string(),
            KnockoutRound::Final => "Final".to_string(),
        }
    }
}

/// A single match between two team slots.
///
/// `winner_id` is set only when both scores are present, unequal, and both sides are resolved
/// teams; it is always one of the two participants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub stage: Stage,
    /// Group label for group matches, slot label for knockout matches.
    pub round_name: String,
    /// Bracket position; `None` for group matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<KnockoutSlot>,
    pub team_1: TeamRef,
    pub team_2: TeamRef,
    #[serde(default)]
    pub score_1: Option<u32>,
    #[serde(default)]
    pub score_2: Option<u32>,
    #[serde(default)]
    pub winner_id: Option<TeamId>,
}

impl GameMatch {
    /// Unscored group-stage match between two known teams.
    pub fn group(id: MatchId, group: impl Into<String>, team_1: TeamId, team_2: TeamId) -> Self {
        Self {
            id,
            stage: Stage::Group,
            round_name: group.into(),
            slot: None,
            team_1: TeamRef::Resolved(team_1),
            team_2: TeamRef::Resolved(team_2),
            score_1: None,
            score_2: None,
            winner_id: None,
        }
    }

    /// Unscored knockout match; id and round name come from the slot.
    pub fn knockout(slot: KnockoutSlot, team_1: TeamRef, team_2: TeamRef) -> Self {
        Self {
            id: slot.id(),
            stage: Stage::Knockout,
            round_name: slot.label(),
            slot: Some(slot),
            team_1,
            team_2,
            score_1: None,
            score_2: None,
            winner_id: None,
        }
    }

    /// Both scores entered.
    pub fn is_scored(&self) -> bool {
        self.score_1.is_some() && self.score_2.is_some()
    }

    /// Either side is still a placeholder.
    pub fn has_pending(&self) -> bool {
        self.team_1.is_pending() || self.team_2.is_pending()
    }

    /// Set (or clear) both scores, capped at [`MAX_SCORE`], and recompute the winner.
    pub fn set_scores(&mut self, score_1: Option<u32>, score_2: Option<u32>) {
        self.score_1 = score_1.map(|s| s.min(MAX_SCORE));
        self.score_2 = score_2.map(|s| s.min(MAX_SCORE));
        self.refresh_winner();
    }

    /// Recompute `winner_id` from the scores and the current participants.
    pub fn refresh_winner(&mut self) {
        self.winner_id = self.winner_ref().and_then(TeamRef::team_id).cloned();
    }

    /// Side with the higher score, if decided.
    pub fn winner_ref(&self) -> Option<&TeamRef> {
        match (self.score_1, self.score_2) {
            (Some(s1), Some(s2)) if s1 > s2 => Some(&self.team_1),
            (Some(s1), Some(s2)) if s2 > s1 => Some(&self.team_2),
            _ => None,
        }
    }

    /// Side with the lower score, if decided.
    pub fn loser_ref(&self) -> Option<&TeamRef> {
        match (self.score_1, self.score_2) {
            (Some(s1), Some(s2)) if s1 > s2 => Some(&self.team_2),
            (Some(s1), Some(s2)) if s2 > s1 => Some(&self.team_1),
            _ => None,
        }
    }

    /// Whether the given team plays in this match.
    pub fn involves(&self, team_id: &str) -> bool {
        self.team_1.team_id().map(String::as_str) == Some(team_id)
            || self.team_2.team_id().map(String::as_str) == Some(team_id)
    }
}

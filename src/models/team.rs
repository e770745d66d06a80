//! Team, team references, and bracket placeholders.

use crate::models::game::KnockoutSlot;
use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// Identifier for a team (`t-<player id>` for singles, `team-<ids>` for doubles).
pub type TeamId = String;

/// A singles entrant or a doubles pair. Standings fields are derived from the match list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<Player>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub goals_scored: u32,
    #[serde(default)]
    pub goals_conceded: u32,
    /// Group label, assigned once at partition time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Team {
    /// One-player team for singles mode.
    pub fn singles(player: Player) -> Self {
        Self {
            id: format!("t-{}", player.id),
            name: player.name.clone(),
            players: vec![player],
            points: 0,
            goals_scored: 0,
            goals_conceded: 0,
            group: None,
        }
    }

    /// Two-player team. The id is derived from the sorted player ids so it does not depend
    /// on draw order.
    pub fn doubles(first: Player, second: Player) -> Self {
        let mut ids = [first.id.as_str(), second.id.as_str()];
        ids.sort_unstable();
        Self {
            id: format!("team-{}", ids.join("-")),
            name: format!("{} / {}", first.name, second.name),
            players: vec![first, second],
            points: 0,
            goals_scored: 0,
            goals_conceded: 0,
            group: None,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_scored) - i64::from(self.goals_conceded)
    }

    pub fn reset_standings(&mut self) {
        self.points = 0;
        self.goals_scored = 0;
        self.goals_conceded = 0;
    }
}

/// A bracket slot whose occupant is not known yet.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placeholder {
    /// `position`-th place of a group that has not finished.
    GroupRank { group: String, position: usize },
    /// The topology references a group the tournament does not have.
    MissingGroup { group: String },
    /// Best second-placed team across all groups.
    BestRunnerUp,
    WinnerOf { slot: KnockoutSlot },
    LoserOf { slot: KnockoutSlot },
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Placeholder::GroupRank { group, position } => match position {
                1 => write!(f, "1st {group}"),
                2 => write!(f, "2nd {group}"),
                3 => write!(f, "3rd {group}"),
                n => write!(f, "{n}th {group}"),
            },
            Placeholder::MissingGroup { group } => write!(f, "{group} (not created)"),
            Placeholder::BestRunnerUp => write!(f, "Best runner-up"),
            Placeholder::WinnerOf { slot } => write!(f, "Winner {}", slot.label()),
            Placeholder::LoserOf { slot } => write!(f, "Loser {}", slot.label()),
        }
    }
}

/// Who occupies one side of a match.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TeamRef {
    Resolved(TeamId),
    Pending(Placeholder),
}

impl TeamRef {
    pub fn team(id: impl Into<TeamId>) -> Self {
        TeamRef::Resolved(id.into())
    }

    pub fn team_id(&self) -> Option<&TeamId> {
        match self {
            TeamRef::Resolved(id) => Some(id),
            TeamRef::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TeamRef::Pending(_))
    }
}

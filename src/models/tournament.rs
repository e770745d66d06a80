//! Tournament snapshot, configuration, and errors.

use crate::models::game::{GameMatch, MatchId, Stage};
use crate::models::team::{Team, TeamRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Roster had no usable entries.
    EmptyRoster,
    /// Group count is zero or beyond the labelled range (A..Z).
    InvalidGroupCount { groups: usize },
    /// More groups than teams to fill them.
    TooManyGroups { groups: usize, teams: usize },
    /// No match with this id.
    MatchNotFound(MatchId),
    /// Match still has a placeholder participant and cannot take a score.
    PendingParticipants(MatchId),
    /// No tournament with this id in the store.
    TournamentNotFound(TournamentId),
    /// Malformed import data or a snapshot that breaks the model invariants.
    Import(String),
    /// Could not write an export sheet.
    Export(String),
    /// Store lock poisoned.
    StoreUnavailable,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyRoster => write!(f, "Roster has no players"),
            TournamentError::InvalidGroupCount { groups } => {
                write!(f, "Group count must be between 1 and {} (got {})", MAX_GROUPS, groups)
            }
            TournamentError::TooManyGroups { groups, teams } => {
                write!(f, "Cannot split {} team(s) into {} groups", teams, groups)
            }
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::PendingParticipants(id) => {
                write!(f, "Match {} has undetermined participants", id)
            }
            TournamentError::TournamentNotFound(_) => write!(f, "No tournament"),
            TournamentError::Import(msg) => write!(f, "Import failed: {}", msg),
            TournamentError::Export(msg) => write!(f, "Export failed: {}", msg),
            TournamentError::StoreUnavailable => write!(f, "Tournament store unavailable"),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<serde_json::Error> for TournamentError {
    fn from(e: serde_json::Error) -> Self {
        TournamentError::Import(e.to_string())
    }
}

impl From<csv::Error> for TournamentError {
    fn from(e: csv::Error) -> Self {
        TournamentError::Import(e.to_string())
    }
}

/// Group labels run from A to Z.
pub const MAX_GROUPS: usize = 26;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Singles (one player per team) or doubles (pairs).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamMode {
    #[default]
    Singles,
    Doubles,
}

/// How many teams per group advance to the knockout stage.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutType {
    Top1,
    #[default]
    Top2,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub num_groups: usize,
    pub mode: TeamMode,
    pub has_knockout: bool,
    pub knockout_type: KnockoutType,
    /// Both semifinal losers share third place instead of playing a decider.
    pub shared_third_place: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            num_groups: 1,
            mode: TeamMode::Singles,
            has_knockout: true,
            knockout_type: KnockoutType::Top2,
            shared_third_place: true,
        }
    }
}

/// Partial update of the knockout settings. Group count and team mode need a rebuild.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockoutConfigPatch {
    pub has_knockout: Option<bool>,
    pub knockout_type: Option<KnockoutType>,
    pub shared_third_place: Option<bool>,
}

impl TournamentConfig {
    pub fn apply(&self, patch: &KnockoutConfigPatch) -> Self {
        Self {
            has_knockout: patch.has_knockout.unwrap_or(self.has_knockout),
            knockout_type: patch.knockout_type.unwrap_or(self.knockout_type),
            shared_third_place: patch.shared_third_place.unwrap_or(self.shared_third_place),
            ..self.clone()
        }
    }
}

/// Full tournament snapshot: teams with standings, all matches, and configuration.
///
/// Every edit produces a new snapshot; nothing outside the engine mutates one in place.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(default)]
    pub created_by: String,
    pub teams: Vec<Team>,
    pub matches: Vec<GameMatch>,
    pub config: TournamentConfig,
}

impl Tournament {
    pub fn new(
        name: impl Into<String>,
        created_by: impl Into<String>,
        teams: Vec<Team>,
        matches: Vec<GameMatch>,
        config: TournamentConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_by: created_by.into(),
            teams,
            matches,
            config,
        }
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn find_match(&self, id: &str) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn group_matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(|m| m.stage == Stage::Group)
    }

    pub fn knockout_matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(|m| m.stage == Stage::Knockout)
    }

    /// Teams of one group, in team-list order.
    pub fn group_teams(&self, label: &str) -> Vec<&Team> {
        self.teams
            .iter()
            .filter(|t| t.group.as_deref() == Some(label))
            .collect()
    }

    /// Name to show for one side of a match: the team name, or the placeholder text.
    pub fn display_name(&self, team: &TeamRef) -> String {
        match team {
            TeamRef::Resolved(id) => self
                .team(id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| id.clone()),
            TeamRef::Pending(placeholder) => placeholder.to_string(),
        }
    }
}

//! Player and skill Level.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a player (`p-<index>` from a roster, `p-import-<uuid>` from imports).
pub type PlayerId = String;

/// Skill tier used when pairing doubles teams.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Level {
    A,
    B,
    #[default]
    None,
}

impl Level {
    /// Case-normalized tier token. Anything other than `a`/`b` is `None`.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "A" => Level::A,
            "B" => Level::B,
            _ => Level::None,
        }
    }

    /// True if `token` names a tier explicitly (`A`, `B`, or `None`).
    pub fn is_token(token: &str) -> bool {
        matches!(
            token.trim().to_ascii_uppercase().as_str(),
            "A" | "B" | "NONE"
        )
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::A => write!(f, "A"),
            Level::B => write!(f, "B"),
            Level::None => write!(f, "None"),
        }
    }
}

/// An entrant on the roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub level: Level,
}

impl Player {
    /// Player with a roster-position id (`p-<index>`).
    pub fn new(index: usize, name: impl Into<String>, level: Level) -> Self {
        Self {
            id: format!("p-{index}"),
            name: name.into(),
            address: None,
            level,
        }
    }

    /// Player with a collision-resistant id, for merging imported rosters into existing ones.
    pub fn imported(name: impl Into<String>, address: Option<String>, level: Level) -> Self {
        Self {
            id: format!("p-import-{}", Uuid::new_v4().simple()),
            name: name.into(),
            address,
            level,
        }
    }
}

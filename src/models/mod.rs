//! Data structures for the tournament: players, teams, matches, tournament snapshot.

mod game;
mod player;
mod team;
mod tournament;

pub use game::{GameMatch, KnockoutRound, KnockoutSlot, MatchId, Stage, MAX_SCORE};
pub use player::{Level, Player, PlayerId};
pub use team::{Placeholder, Team, TeamId, TeamRef};
pub use tournament::{
    KnockoutConfigPatch, KnockoutType, TeamMode, Tournament, TournamentConfig, TournamentError,
    TournamentId, MAX_GROUPS,
};

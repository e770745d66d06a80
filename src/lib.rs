//! Pickleball tournament web app: library with models, bracket engine, and tournament store.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    apply_results_csv, build_tournament, export_json, import_json, parse_roster,
    parse_roster_csv, parse_score, podium, rebuild_from_roster, record_score,
    regenerate_from_roster, regenerate_from_roster_with_rng, results_csv, standings_csv,
    update_knockout_config, Podium,
};
pub use models::{
    GameMatch, KnockoutConfigPatch, KnockoutRound, KnockoutSlot, KnockoutType, Level, MatchId,
    Placeholder, Player, PlayerId, Stage, Team, TeamId, TeamMode, TeamRef, Tournament,
    TournamentConfig, TournamentError, TournamentId, MAX_SCORE,
};
pub use store::{TournamentStore, TournamentSummary};

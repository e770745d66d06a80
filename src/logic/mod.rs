//! Tournament business logic: roster, teams, groups, fixtures, standings, knockout bracket.

mod fixtures;
mod groups;
mod knockout;
mod podium;
mod roster;
mod scoring;
mod setup;
mod standings;
mod teams;
mod transfer;

pub use fixtures::{generate_round_robin, pairings, FIVE_TEAM_ORDER, FOUR_TEAM_ORDER};
pub use groups::{group_label, partition_groups, validate_group_count, Group};
pub use knockout::{derive_knockout, merge_forward};
pub use podium::{podium, Podium};
pub use roster::{parse_roster, parse_roster_csv, roster_lines};
pub use scoring::{clamp_score, parse_score, record_score, update_knockout_config};
pub use setup::{
    build_tournament, rebuild_from_roster, refresh, regenerate_from_roster,
    regenerate_from_roster_with_rng,
};
pub use standings::{
    calculate_standings, compare_standing, group_is_finished, group_labels, group_table,
};
pub use teams::{build_teams, pair_doubles};
pub use transfer::{apply_results_csv, export_json, import_json, results_csv, standings_csv};

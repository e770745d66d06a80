//! Round-robin fixture generation for one group.

use crate::models::{GameMatch, Team};

/// Schedule for 4 teams: every pair once, nobody plays twice in a row.
pub const FOUR_TEAM_ORDER: [(usize, usize); 6] = [(0, 1), (2, 3), (0, 2), (1, 3), (0, 3), (1, 2)];

/// Schedule for 5 teams: every pair once, rest spread between each team's matches.
pub const FIVE_TEAM_ORDER: [(usize, usize); 10] = [
    (0, 1),
    (3, 4),
    (2, 1),
    (3, 0),
    (2, 4),
    (3, 1),
    (0, 4),
    (2, 3),
    (1, 4),
    (0, 2),
];

/// Index pairs for a group of `n` teams, in play order.
pub fn pairings(n: usize) -> Vec<(usize, usize)> {
    match n {
        4 => FOUR_TEAM_ORDER.to_vec(),
        5 => FIVE_TEAM_ORDER.to_vec(),
        _ => (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect(),
    }
}

/// Every match of a group's round robin, ids `m-group-<label>-<n>`.
pub fn generate_round_robin(teams: &[Team], label: &str) -> Vec<GameMatch> {
    pairings(teams.len())
        .into_iter()
        .enumerate()
        .map(|(idx, (i, j))| {
            GameMatch::group(
                format!("m-group-{label}-{idx}"),
                label,
                teams[i].id.clone(),
                teams[j].id.clone(),
            )
        })
        .collect()
}

//! Group partitioning: shuffle, then deal teams round-robin into labelled groups.

use crate::models::{Team, TournamentError, MAX_GROUPS};
use rand::seq::SliceRandom;
use rand::Rng;

/// A labelled subset of teams playing round robin among themselves.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Group {
    pub label: String,
    pub teams: Vec<Team>,
}

/// Label for the group at `index` (0 = "Group A").
pub fn group_label(index: usize) -> String {
    let letter = (b'A' + (index % MAX_GROUPS) as u8) as char;
    format!("Group {letter}")
}

/// Check a group count against the number of teams it must hold.
pub fn validate_group_count(num_groups: usize, num_teams: usize) -> Result<(), TournamentError> {
    if num_groups == 0 || num_groups > MAX_GROUPS {
        return Err(TournamentError::InvalidGroupCount { groups: num_groups });
    }
    if num_groups > num_teams {
        return Err(TournamentError::TooManyGroups {
            groups: num_groups,
            teams: num_teams,
        });
    }
    Ok(())
}

/// Split teams into `num_groups` groups whose sizes differ by at most one.
///
/// The team at shuffled position `i` goes to group `i % num_groups`; each team's `group` field
/// is set to its group's label.
pub fn partition_groups<R: Rng + ?Sized>(
    mut teams: Vec<Team>,
    num_groups: usize,
    rng: &mut R,
) -> Result<Vec<Group>, TournamentError> {
    validate_group_count(num_groups, teams.len())?;
    teams.shuffle(rng);

    let mut groups: Vec<Group> = (0..num_groups)
        .map(|i| Group {
            label: group_label(i),
            teams: Vec::new(),
        })
        .collect();
    for (i, mut team) in teams.into_iter().enumerate() {
        let group = &mut groups[i % num_groups];
        team.group = Some(group.label.clone());
        group.teams.push(team);
    }
    Ok(groups)
}

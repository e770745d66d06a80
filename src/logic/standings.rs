//! Standings: points and goals recomputed from scored matches, and per-group ranking.

use crate::models::{GameMatch, Stage, Team};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Recompute every team's points and goals from scratch.
///
/// Only matches with both scores and two resolved participants count. The winner of a match
/// gets one point; a draw gives nothing to either side. The result does not depend on match
/// order and running it twice gives the same teams.
pub fn calculate_standings<'a>(
    teams: &[Team],
    matches: impl IntoIterator<Item = &'a GameMatch>,
) -> Vec<Team> {
    let mut updated: Vec<Team> = teams
        .iter()
        .cloned()
        .map(|mut t| {
            t.reset_standings();
            t
        })
        .collect();
    let index: HashMap<&str, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    for m in matches {
        let (Some(s1), Some(s2)) = (m.score_1, m.score_2) else {
            continue;
        };
        let (Some(id1), Some(id2)) = (m.team_1.team_id(), m.team_2.team_id()) else {
            continue;
        };
        let (Some(&i1), Some(&i2)) = (index.get(id1.as_str()), index.get(id2.as_str())) else {
            continue;
        };
        add_goals(&mut updated[i1], s1, s2);
        add_goals(&mut updated[i2], s2, s1);
        match s1.cmp(&s2) {
            Ordering::Greater => updated[i1].points += 1,
            Ordering::Less => updated[i2].points += 1,
            Ordering::Equal => {}
        }
    }

    updated
}

fn add_goals(team: &mut Team, scored: u32, conceded: u32) {
    team.goals_scored = team.goals_scored.saturating_add(scored);
    team.goals_conceded = team.goals_conceded.saturating_add(conceded);
}

/// Ranking order: points, then goal difference, then goals scored (all descending).
pub fn compare_standing(a: &Team, b: &Team) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_scored.cmp(&a.goals_scored))
}

/// Group-stage matches of one group.
pub fn group_fixtures<'a>(matches: &'a [GameMatch], label: &'a str) -> impl Iterator<Item = &'a GameMatch> {
    matches
        .iter()
        .filter(move |m| m.stage == Stage::Group && m.round_name == label)
}

/// A group is finished once it has matches and all of them carry both scores.
pub fn group_is_finished(matches: &[GameMatch], label: &str) -> bool {
    let mut fixtures = group_fixtures(matches, label).peekable();
    fixtures.peek().is_some() && fixtures.all(GameMatch::is_scored)
}

/// Group labels present on the teams, sorted.
pub fn group_labels(teams: &[Team]) -> Vec<String> {
    let mut labels: Vec<String> = teams.iter().filter_map(|t| t.group.clone()).collect();
    labels.sort();
    labels.dedup();
    labels
}

/// Ranked table of one group, counting that group's own matches only.
///
/// Ties on points, goal difference, and goals scored between exactly two teams go to the
/// head-to-head winner; any other tie keeps team-list order.
pub fn group_table(teams: &[Team], matches: &[GameMatch], label: &str) -> Vec<Team> {
    let members: Vec<Team> = teams
        .iter()
        .filter(|t| t.group.as_deref() == Some(label))
        .cloned()
        .collect();
    let mut table = calculate_standings(&members, group_fixtures(matches, label));
    table.sort_by(compare_standing);

    let mut start = 0;
    while start < table.len() {
        let mut end = start + 1;
        while end < table.len() && compare_standing(&table[start], &table[end]) == Ordering::Equal {
            end += 1;
        }
        if end - start == 2
            && beat_head_to_head(&table[start + 1], &table[start], group_fixtures(matches, label))
        {
            table.swap(start, start + 1);
        }
        start = end;
    }
    table
}

/// True if `a` won more of its matches against `b` than it lost.
fn beat_head_to_head<'a>(a: &Team, b: &Team, matches: impl Iterator<Item = &'a GameMatch>) -> bool {
    let mut balance = 0i32;
    for m in matches.filter(|m| m.involves(&a.id) && m.involves(&b.id)) {
        match m.winner_ref().and_then(|w| w.team_id()) {
            Some(w) if *w == a.id => balance += 1,
            Some(w) if *w == b.id => balance -= 1,
            _ => {}
        }
    }
    balance > 0
}

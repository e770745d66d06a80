//! Knockout bracket derivation from group standings, and score merge-forward.
//!
//! The bracket is rebuilt from scratch on every change. Matches keep fixed ids per slot
//! (`ko-q1`, `ko-semi-2`, `ko-final`, ...) so scores already entered for a slot survive a
//! rebuild even when a placeholder in that slot has since resolved to a real team.

use crate::logic::groups::group_label;
use crate::logic::standings::{compare_standing, group_is_finished, group_table};
use crate::models::{
    GameMatch, KnockoutSlot, KnockoutType, Placeholder, Stage, Team, TeamRef, TournamentConfig,
};

/// Groups that can feed the bracket (A..H).
const BRACKET_GROUPS: usize = 8;

/// Derive the full knockout match list for the current standings.
///
/// `previous` is the current match list: its group matches decide who has finished, and its
/// knockout matches provide scores carried onto the new matches with the same id. Slots are
/// built earliest round first, so `winner_of`/`loser_of` see upstream results that were just
/// carried forward.
pub fn derive_knockout(
    teams: &[Team],
    config: &TournamentConfig,
    previous: &[GameMatch],
) -> Vec<GameMatch> {
    let mut bracket = Bracket {
        teams,
        previous,
        num_groups: config.num_groups,
        derived: Vec::new(),
    };

    match (config.num_groups, config.knockout_type) {
        (0..=1, KnockoutType::Top1) => {}
        (0..=1, KnockoutType::Top2) => {
            let (a1, a2) = (bracket.rank(0, 1), bracket.rank(0, 2));
            bracket.push(KnockoutSlot::final_match(), a1, a2);
        }
        (2, KnockoutType::Top1) => {
            let (a1, b1) = (bracket.rank(0, 1), bracket.rank(1, 1));
            bracket.push(KnockoutSlot::final_match(), a1, b1);
        }
        (2, KnockoutType::Top2) => {
            bracket.seed(KnockoutSlot::semi(1), (0, 1), (1, 2));
            bracket.seed(KnockoutSlot::semi(2), (1, 1), (0, 2));
        }
        (3..=4, KnockoutType::Top1) => {
            bracket.seed(KnockoutSlot::semi(1), (0, 1), (1, 1));
            let c1 = bracket.rank(2, 1);
            let fourth = if config.num_groups == 3 {
                bracket.best_runner_up()
            } else {
                bracket.rank(3, 1)
            };
            bracket.push(KnockoutSlot::semi(2), c1, fourth);
        }
        (3..=4, KnockoutType::Top2) => {
            bracket.seed(KnockoutSlot::quarter(1), (0, 1), (2, 2));
            bracket.seed(KnockoutSlot::quarter(2), (1, 1), (3, 2));
            bracket.seed(KnockoutSlot::quarter(3), (2, 1), (0, 2));
            bracket.seed(KnockoutSlot::quarter(4), (3, 1), (1, 2));
            bracket.advance(KnockoutSlot::semi, KnockoutSlot::quarter, 2);
        }
        (_, KnockoutType::Top1) => {
            for i in 0..4u8 {
                let g = usize::from(i) * 2;
                bracket.seed(KnockoutSlot::quarter(i + 1), (g, 1), (g + 1, 1));
            }
            bracket.advance(KnockoutSlot::semi, KnockoutSlot::quarter, 2);
        }
        (_, KnockoutType::Top2) => {
            for i in 0..4u8 {
                let g = usize::from(i) * 2;
                bracket.seed(KnockoutSlot::round_of_16(2 * i + 1), (g, 1), (g + 1, 2));
                bracket.seed(KnockoutSlot::round_of_16(2 * i + 2), (g + 1, 1), (g, 2));
            }
            bracket.advance(KnockoutSlot::quarter, KnockoutSlot::round_of_16, 4);
            bracket.advance(KnockoutSlot::semi, KnockoutSlot::quarter, 2);
        }
    }

    let semis = [KnockoutSlot::semi(1), KnockoutSlot::semi(2)];
    if semis.iter().all(|s| bracket.contains(s)) {
        if !config.shared_third_place {
            let (l1, l2) = (bracket.loser_of(semis[0]), bracket.loser_of(semis[1]));
            bracket.push(KnockoutSlot::third_place(), l1, l2);
        }
        let (w1, w2) = (bracket.winner_of(semis[0]), bracket.winner_of(semis[1]));
        bracket.push(KnockoutSlot::final_match(), w1, w2);
    }

    log::debug!(
        "Derived {} knockout match(es) for {} group(s), {:?}",
        bracket.derived.len(),
        config.num_groups,
        config.knockout_type
    );
    bracket.derived
}

/// Keep the group matches of `previous` and append `knockout`, copying scores recorded in
/// `previous` onto knockout matches with the same id.
pub fn merge_forward(previous: &[GameMatch], knockout: Vec<GameMatch>) -> Vec<GameMatch> {
    let mut merged: Vec<GameMatch> = previous
        .iter()
        .filter(|m| m.stage == Stage::Group)
        .cloned()
        .collect();
    merged.extend(knockout.into_iter().map(|m| carry_scores(previous, m)));
    merged
}

/// Copy scores from the previous knockout match with the same id, then recompute the winner
/// for the (possibly new) participants.
fn carry_scores(previous: &[GameMatch], mut next: GameMatch) -> GameMatch {
    if let Some(old) = previous
        .iter()
        .find(|m| m.stage == Stage::Knockout && m.id == next.id)
    {
        next.score_1 = old.score_1;
        next.score_2 = old.score_2;
    }
    next.refresh_winner();
    next
}

struct Bracket<'a> {
    teams: &'a [Team],
    previous: &'a [GameMatch],
    num_groups: usize,
    derived: Vec<GameMatch>,
}

impl Bracket<'_> {
    /// Team in `position` (1-based) of group `group`, or a placeholder while the group is
    /// unfinished or missing.
    fn rank(&self, group: usize, position: usize) -> TeamRef {
        let label = group_label(group);
        if group >= self.num_groups {
            return TeamRef::Pending(Placeholder::MissingGroup { group: label });
        }
        let pending = || TeamRef::Pending(Placeholder::GroupRank {
            group: label.clone(),
            position,
        });
        if !group_is_finished(self.previous, &label) {
            return pending();
        }
        group_table(self.teams, self.previous, &label)
            .get(position.wrapping_sub(1))
            .map(|t| TeamRef::team(t.id.clone()))
            .unwrap_or_else(pending)
    }

    /// Best second-placed team over all bracket groups, once every one of them has finished.
    fn best_runner_up(&self) -> TeamRef {
        let groups = self.num_groups.min(BRACKET_GROUPS);
        let labels: Vec<String> = (0..groups).map(group_label).collect();
        if !labels.iter().all(|l| group_is_finished(self.previous, l)) {
            return TeamRef::Pending(Placeholder::BestRunnerUp);
        }
        labels
            .iter()
            .filter_map(|l| group_table(self.teams, self.previous, l).into_iter().nth(1))
            .min_by(compare_standing)
            .map(|t| TeamRef::team(t.id))
            .unwrap_or(TeamRef::Pending(Placeholder::BestRunnerUp))
    }

    fn find(&self, slot: KnockoutSlot) -> Option<&GameMatch> {
        let id = slot.id();
        self.derived.iter().find(|m| m.id == id)
    }

    fn contains(&self, slot: &KnockoutSlot) -> bool {
        self.find(*slot).is_some()
    }

    /// Winner of an already derived slot, or a placeholder until it is decided.
    fn winner_of(&self, slot: KnockoutSlot) -> TeamRef {
        self.find(slot)
            .and_then(GameMatch::winner_ref)
            .filter(|r| !r.is_pending())
            .cloned()
            .unwrap_or(TeamRef::Pending(Placeholder::WinnerOf { slot }))
    }

    fn loser_of(&self, slot: KnockoutSlot) -> TeamRef {
        self.find(slot)
            .and_then(GameMatch::loser_ref)
            .filter(|r| !r.is_pending())
            .cloned()
            .unwrap_or(TeamRef::Pending(Placeholder::LoserOf { slot }))
    }

    fn push(&mut self, slot: KnockoutSlot, team_1: TeamRef, team_2: TeamRef) {
        let next = carry_scores(self.previous, GameMatch::knockout(slot, team_1, team_2));
        self.derived.push(next);
    }

    /// Slot between two group placings, each given as `(group index, position)`.
    fn seed(&mut self, slot: KnockoutSlot, first: (usize, usize), second: (usize, usize)) {
        let team_1 = self.rank(first.0, first.1);
        let team_2 = self.rank(second.0, second.1);
        self.push(slot, team_1, team_2);
    }

    /// Fill `count` slots of the next round with the winners of consecutive pairs of the
    /// previous round (slot n takes winners of 2n-1 and 2n).
    fn advance(&mut self, next: fn(u8) -> KnockoutSlot, from: fn(u8) -> KnockoutSlot, count: u8) {
        for n in 1..=count {
            let team_1 = self.winner_of(from(2 * n - 1));
            let team_2 = self.winner_of(from(2 * n));
            self.push(next(n), team_1, team_2);
        }
    }
}

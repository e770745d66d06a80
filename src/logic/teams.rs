//! Team building: singles (one team per player) or doubles (cross-tier pairs first).

use crate::models::{Level, Player, Team, TeamMode};
use rand::seq::SliceRandom;
use rand::Rng;

/// Build teams for the given mode.
pub fn build_teams<R: Rng + ?Sized>(players: Vec<Player>, mode: TeamMode, rng: &mut R) -> Vec<Team> {
    match mode {
        TeamMode::Singles => players.into_iter().map(Team::singles).collect(),
        TeamMode::Doubles => pair_doubles(players, rng),
    }
}

/// Pair players into doubles teams.
///
/// 1. Split by tier and shuffle each tier.
/// 2. Pop one A and one B player per team while both tiers last.
/// 3. Pool what is left (A, then B, then untiered) and pair from the end.
///
/// An odd player out is dropped (and logged).
pub fn pair_doubles<R: Rng + ?Sized>(players: Vec<Player>, rng: &mut R) -> Vec<Team> {
    let (mut tier_a, rest): (Vec<_>, Vec<_>) = players.into_iter().partition(|p| p.level == Level::A);
    let (mut tier_b, mut untiered): (Vec<_>, Vec<_>) = rest.into_iter().partition(|p| p.level == Level::B);
    tier_a.shuffle(rng);
    tier_b.shuffle(rng);
    untiered.shuffle(rng);

    let mut teams = Vec::new();
    while !tier_a.is_empty() && !tier_b.is_empty() {
        if let (Some(a), Some(b)) = (tier_a.pop(), tier_b.pop()) {
            teams.push(Team::doubles(a, b));
        }
    }

    let mut remaining: Vec<Player> = tier_a;
    remaining.append(&mut tier_b);
    remaining.append(&mut untiered);
    while remaining.len() >= 2 {
        if let (Some(first), Some(second)) = (remaining.pop(), remaining.pop()) {
            teams.push(Team::doubles(first, second));
        }
    }
    if let Some(odd) = remaining.pop() {
        log::warn!("Odd number of players: {} left without a partner", odd.name);
    }

    teams
}

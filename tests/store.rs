//! Integration tests for the in-memory tournament store.

mod common;

use common::{config, tournament};
use pickleball_bracket_web::{record_score, TournamentError, TournamentStore};
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;
use uuid::Uuid;

#[test]
fn insert_and_update_publish_snapshots() {
    let store = TournamentStore::new();
    let mut updates = store.subscribe();
    let t = store.insert(tournament(4, config(1))).unwrap();
    assert_eq!(updates.try_recv().unwrap(), t);
    assert_eq!(store.get(t.id).unwrap(), t);

    let first = t.group_matches().next().unwrap().id.clone();
    let next = store
        .update(t.id, |current| record_score(current, &first, Some(11), Some(2)))
        .unwrap();
    assert_eq!(next.id, t.id);
    assert_eq!(updates.try_recv().unwrap(), next);
    assert_eq!(store.get(t.id).unwrap(), next);
}

#[test]
fn failed_edit_keeps_snapshot_and_publishes_nothing() {
    let store = TournamentStore::new();
    let t = store.insert(tournament(8, config(2))).unwrap();
    let mut updates = store.subscribe();

    let result = store.update(t.id, |current| record_score(current, "ko-final", Some(1), Some(0)));
    assert_eq!(
        result,
        Err(TournamentError::PendingParticipants("ko-final".to_string()))
    );
    assert_eq!(store.get(t.id).unwrap(), t);
    assert!(matches!(updates.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn missing_tournament_is_reported() {
    let store = TournamentStore::new();
    let id = Uuid::new_v4();
    assert_eq!(store.get(id), Err(TournamentError::TournamentNotFound(id)));
    assert_eq!(
        store.update(id, |t| Ok(t.clone())),
        Err(TournamentError::TournamentNotFound(id))
    );
    assert_eq!(store.remove(id), Err(TournamentError::TournamentNotFound(id)));
}

#[test]
fn list_summarizes_and_remove_deletes() {
    let store = TournamentStore::new();
    let small = store.insert(tournament(4, config(1))).unwrap();
    let large = store.insert(tournament(8, config(2))).unwrap();

    let summaries = store.list().unwrap();
    assert_eq!(summaries.len(), 2);
    let large_summary = summaries.iter().find(|s| s.id == large.id).unwrap();
    assert_eq!(large_summary.teams, 8);
    assert_eq!(large_summary.matches, large.matches.len());
    assert_eq!(large_summary.name, "Test Cup");
    assert_eq!(large_summary.created_by, "admin");

    store.remove(small.id).unwrap();
    let remaining: Vec<Uuid> = store.list().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(remaining, vec![large.id]);
}

#[test]
fn inactive_tournaments_are_evicted() {
    let store = TournamentStore::new();
    let t = store.insert(tournament(4, config(1))).unwrap();
    assert_eq!(store.evict_inactive(Duration::from_secs(3600)).unwrap(), 0);
    assert!(store.get(t.id).is_ok());
    assert_eq!(store.evict_inactive(Duration::ZERO).unwrap(), 1);
    assert!(store.get(t.id).is_err());
}

//! In-memory tournament store: one snapshot per tournament id.
//!
//! Writes go through [`TournamentStore::update`], which holds the write lock while the engine
//! computes the next snapshot, so concurrent edits to a tournament are applied one after the
//! other. Every replaced snapshot is published on a broadcast channel for viewers.

use crate::models::{Tournament, TournamentError, TournamentId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

/// Snapshots buffered per subscriber before it starts lagging.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Per-tournament entry: snapshot + activity times (for listing and auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    updated_at: DateTime<Utc>,
    last_activity: Instant,
}

impl TournamentEntry {
    fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            updated_at: Utc::now(),
            last_activity: Instant::now(),
        }
    }
}

/// Listing view of a stored tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub created_by: String,
    pub teams: usize,
    pub matches: usize,
    pub updated_at: DateTime<Utc>,
}

pub struct TournamentStore {
    entries: RwLock<HashMap<TournamentId, TournamentEntry>>,
    updates: broadcast::Sender<Tournament>,
}

impl Default for TournamentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TournamentStore {
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            entries: RwLock::new(HashMap::new()),
            updates,
        }
    }

    /// Receive every snapshot stored from now on (all tournaments).
    pub fn subscribe(&self) -> broadcast::Receiver<Tournament> {
        self.updates.subscribe()
    }

    /// Store a new (or imported) tournament under its own id and publish it.
    pub fn insert(&self, tournament: Tournament) -> Result<Tournament, TournamentError> {
        let mut g = self
            .entries
            .write()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        g.insert(tournament.id, TournamentEntry::new(tournament.clone()));
        self.publish(&tournament);
        Ok(tournament)
    }

    /// Current snapshot. Reading counts as activity.
    pub fn get(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let mut g = self
            .entries
            .write()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        let entry = g
            .get_mut(&id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        entry.last_activity = Instant::now();
        Ok(entry.tournament.clone())
    }

    /// Replace a tournament with `edit(current)`.
    ///
    /// If `edit` fails the stored snapshot is left untouched and nothing is published.
    pub fn update<F>(&self, id: TournamentId, edit: F) -> Result<Tournament, TournamentError>
    where
        F: FnOnce(&Tournament) -> Result<Tournament, TournamentError>,
    {
        let mut g = self
            .entries
            .write()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        let entry = g
            .get_mut(&id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        entry.last_activity = Instant::now();
        let mut next = edit(&entry.tournament)?;
        next.id = id;
        entry.tournament = next.clone();
        entry.updated_at = Utc::now();
        self.publish(&next);
        Ok(next)
    }

    pub fn remove(&self, id: TournamentId) -> Result<(), TournamentError> {
        let mut g = self
            .entries
            .write()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        g.remove(&id)
            .map(|_| ())
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    /// Summaries of all tournaments, most recently updated first.
    pub fn list(&self) -> Result<Vec<TournamentSummary>, TournamentError> {
        let g = self
            .entries
            .read()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        let mut summaries: Vec<TournamentSummary> = g
            .values()
            .map(|e| TournamentSummary {
                id: e.tournament.id,
                name: e.tournament.name.clone(),
                created_by: e.tournament.created_by.clone(),
                teams: e.tournament.teams.len(),
                matches: e.tournament.matches.len(),
                updated_at: e.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    /// Drop tournaments with no activity for `timeout`. Returns how many were removed.
    pub fn evict_inactive(&self, timeout: Duration) -> Result<usize, TournamentError> {
        let mut g = self
            .entries
            .write()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        let before = g.len();
        g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
        Ok(before - g.len())
    }

    fn publish(&self, tournament: &Tournament) {
        // No subscribers is fine; the snapshot is still stored.
        let _ = self.updates.send(tournament.clone());
    }
}

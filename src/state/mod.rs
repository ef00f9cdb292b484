//! Screen state reducers.
//!
//! Each reducer owns a single UiState value published through a
//! `tokio::sync::watch` channel and accepts a closed set of events:
//! - `list`: album, artist and collector list screens
//! - `album_detail`: album detail with comments, tracks and local flags
//! - `artist_detail`: artist detail
//! - `collector_detail`: collector detail
//!
//! Synchronous events (flag toggles, text edits) are applied in place.
//! Events that hit the repository run as tasks in the reducer's
//! [`ScreenScope`]; dropping the reducer aborts whatever is still in flight.

mod album_detail;
mod artist_detail;
mod collector_detail;
mod list;

pub use album_detail::{AlbumDetailEvent, AlbumDetailReducer, AlbumDetailState};
pub use artist_detail::{ArtistDetailEvent, ArtistDetailReducer, ArtistDetailState};
pub use collector_detail::{CollectorDetailEvent, CollectorDetailReducer, CollectorDetailState};
pub use list::{
    AlbumListReducer, ArtistListReducer, CollectorListReducer, ListEvent, ListReducer, ListState,
};

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::task::JoinSet;

/// Task scope bound to one screen.
///
/// Tasks launched here are aborted by [`ScreenScope::cancel`] or when the
/// scope is dropped.
#[derive(Default)]
pub struct ScreenScope {
    tasks: Mutex<JoinSet<()>>,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn launch<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.tasks.lock();
        // Reap finished tasks so the set does not grow unbounded
        while tasks.try_join_next().is_some() {}
        tasks.spawn(task);
    }

    /// Abort every in-flight task.
    pub fn cancel(&self) {
        self.tasks.lock().abort_all();
    }

    /// Number of tasks that have not finished yet.
    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        let mut tasks = self.tasks.lock();
        while tasks.try_join_next().is_some() {}
        tasks.len()
    }
}

/// Load bookkeeping for a reducer.
///
/// Remembers the entity a detail screen targets, so a bare reload re-issues
/// the last `LoadById`, and hands out monotonic tickets so a response
/// superseded by a newer load is discarded.
#[derive(Debug, Default)]
pub(crate) struct LoadTracker {
    current_id: Mutex<Option<i64>>,
    sequence: AtomicU64,
    /// Last ticket whose response was applied
    settled: AtomicU64,
}

impl LoadTracker {
    pub fn set_target(&self, id: i64) {
        *self.current_id.lock() = Some(id);
    }

    pub fn target(&self) -> Option<i64> {
        *self.current_id.lock()
    }

    /// Start a new load and return its ticket.
    pub fn begin(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` belongs to the most recent load.
    pub fn is_latest(&self, ticket: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == ticket
    }

    /// Mark the load for `ticket` as complete.
    ///
    /// Returns false when a newer load has started; its response must be
    /// discarded.
    pub fn settle(&self, ticket: u64) -> bool {
        if !self.is_latest(ticket) {
            return false;
        }
        self.settled.store(ticket, Ordering::SeqCst);
        true
    }

    /// Whether the most recent load is still waiting for its response.
    pub fn is_pending(&self) -> bool {
        self.sequence.load(Ordering::SeqCst) != self.settled.load(Ordering::SeqCst)
    }
}

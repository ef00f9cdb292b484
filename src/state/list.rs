//! Generic list screen reducer.
//!
//! One reducer type drives the album, artist and collector lists. Loads are
//! cache-first through the repository; `Refresh` drops the cached list first.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::watch;

use super::{LoadTracker, ScreenScope};
use crate::catalog::{Album, Artist, Collector, ListRepository};

/// Snapshot of a list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub items: Vec<T>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// Load the list, served from cache when available
    Load,
    /// Bypass the cache and reload from the server
    Refresh,
}

struct ListCore<T> {
    repository: Arc<dyn ListRepository<T>>,
    state: watch::Sender<ListState<T>>,
    loads: LoadTracker,
}

/// Reducer for a list screen of `T`.
pub struct ListReducer<T> {
    core: Arc<ListCore<T>>,
    scope: ScreenScope,
}

pub type AlbumListReducer = ListReducer<Album>;
pub type ArtistListReducer = ListReducer<Artist>;
pub type CollectorListReducer = ListReducer<Collector>;

impl<T> ListReducer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(repository: Arc<dyn ListRepository<T>>) -> Self {
        let (state, _) = watch::channel(ListState::default());
        Self {
            core: Arc::new(ListCore {
                repository,
                state,
                loads: LoadTracker::default(),
            }),
            scope: ScreenScope::new(),
        }
    }

    pub fn state(&self) -> ListState<T> {
        self.core.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.core.state.subscribe()
    }

    /// Spawn the event's work into this screen's scope.
    pub fn on_event(&self, event: ListEvent) {
        if let Some(task) = Arc::clone(&self.core).reduce(event) {
            self.scope.launch(task);
        }
    }

    /// Apply `event` and wait for it to finish.
    pub async fn dispatch(&self, event: ListEvent) {
        if let Some(task) = Arc::clone(&self.core).reduce(event) {
            task.await;
        }
    }

    pub fn close(&self) {
        self.scope.cancel();
    }
}

impl<T> ListCore<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn update(&self, f: impl FnOnce(&mut ListState<T>)) {
        self.state.send_modify(f);
    }

    fn reduce(self: Arc<Self>, event: ListEvent) -> Option<BoxFuture<'static, ()>> {
        match event {
            ListEvent::Load => Some(self.load()),
            ListEvent::Refresh => {
                self.repository.invalidate_list();
                Some(self.load())
            }
        }
    }

    fn load(self: Arc<Self>) -> BoxFuture<'static, ()> {
        let ticket = self.loads.begin();
        self.update(|s| {
            s.loading = true;
            s.error = None;
        });

        async move {
            let outcome = self.repository.fetch_list().await;
            if !self.loads.settle(ticket) {
                return;
            }

            match outcome {
                Ok(items) => self.update(|s| {
                    s.loading = false;
                    s.items = items;
                }),
                Err(e) => self.update(|s| {
                    s.loading = false;
                    s.error = Some(e.to_string());
                }),
            }
        }
        .boxed()
    }
}

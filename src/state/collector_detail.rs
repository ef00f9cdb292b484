//! Collector detail screen reducer.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::watch;

use super::{LoadTracker, ScreenScope};
use crate::catalog::{Collector, CollectorAlbum, CollectorRepository, Performer};

#[derive(Debug, Clone, PartialEq)]
pub struct CollectorDetailState {
    pub loading: bool,
    pub error: Option<String>,
    pub collector: Option<Collector>,
    pub albums: Vec<CollectorAlbum>,
    pub favorite_performers: Vec<Performer>,
}

impl Default for CollectorDetailState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            collector: None,
            albums: Vec::new(),
            favorite_performers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorDetailEvent {
    LoadById(i64),
    Load,
}

struct CollectorDetailCore {
    repository: Arc<dyn CollectorRepository>,
    state: watch::Sender<CollectorDetailState>,
    loads: LoadTracker,
}

pub struct CollectorDetailReducer {
    core: Arc<CollectorDetailCore>,
    scope: ScreenScope,
}

impl CollectorDetailReducer {
    pub fn new(repository: Arc<dyn CollectorRepository>) -> Self {
        let (state, _) = watch::channel(CollectorDetailState::default());
        Self {
            core: Arc::new(CollectorDetailCore {
                repository,
                state,
                loads: LoadTracker::default(),
            }),
            scope: ScreenScope::new(),
        }
    }

    pub fn state(&self) -> CollectorDetailState {
        self.core.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectorDetailState> {
        self.core.state.subscribe()
    }

    pub fn on_event(&self, event: CollectorDetailEvent) {
        if let Some(task) = Arc::clone(&self.core).reduce(event) {
            self.scope.launch(task);
        }
    }

    pub async fn dispatch(&self, event: CollectorDetailEvent) {
        if let Some(task) = Arc::clone(&self.core).reduce(event) {
            task.await;
        }
    }

    pub fn close(&self) {
        self.scope.cancel();
    }
}

impl CollectorDetailCore {
    fn update(&self, f: impl FnOnce(&mut CollectorDetailState)) {
        self.state.send_modify(f);
    }

    fn reduce(self: Arc<Self>, event: CollectorDetailEvent) -> Option<BoxFuture<'static, ()>> {
        let id = match event {
            CollectorDetailEvent::LoadById(id) => {
                self.loads.set_target(id);
                id
            }
            CollectorDetailEvent::Load => self.loads.target()?,
        };
        Some(self.load(id))
    }

    fn load(self: Arc<Self>, id: i64) -> BoxFuture<'static, ()> {
        let ticket = self.loads.begin();
        self.update(|s| {
            s.loading = true;
            s.error = None;
        });

        async move {
            let outcome = self.repository.fetch_by_id(id).await;
            if !self.loads.settle(ticket) {
                tracing::debug!("Discarding stale response for collector {}", id);
                return;
            }

            match outcome {
                Ok(collector) => self.update(|s| {
                    s.loading = false;
                    s.albums = collector.albums.clone();
                    s.favorite_performers = collector.favorite_performers.clone();
                    s.collector = Some(collector);
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

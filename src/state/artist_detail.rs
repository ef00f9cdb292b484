//! Artist detail screen reducer.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::watch;

use super::{LoadTracker, ScreenScope};
use crate::catalog::{Artist, ArtistAlbum, ArtistRepository};

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistDetailState {
    pub loading: bool,
    pub error: Option<String>,
    pub artist: Option<Artist>,
    pub albums: Vec<ArtistAlbum>,
    pub is_liked: bool,
}

impl Default for ArtistDetailState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            artist: None,
            albums: Vec::new(),
            is_liked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistDetailEvent {
    LoadById(i64),
    Load,
    ToggleLike,
}

struct ArtistDetailCore {
    repository: Arc<dyn ArtistRepository>,
    state: watch::Sender<ArtistDetailState>,
    loads: LoadTracker,
}

pub struct ArtistDetailReducer {
    core: Arc<ArtistDetailCore>,
    scope: ScreenScope,
}

impl ArtistDetailReducer {
    pub fn new(repository: Arc<dyn ArtistRepository>) -> Self {
        let (state, _) = watch::channel(ArtistDetailState::default());
        Self {
            core: Arc::new(ArtistDetailCore {
                repository,
                state,
                loads: LoadTracker::default(),
            }),
            scope: ScreenScope::new(),
        }
    }

    pub fn state(&self) -> ArtistDetailState {
        self.core.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ArtistDetailState> {
        self.core.state.subscribe()
    }

    pub fn on_event(&self, event: ArtistDetailEvent) {
        if let Some(task) = Arc::clone(&self.core).reduce(event) {
            self.scope.launch(task);
        }
    }

    pub async fn dispatch(&self, event: ArtistDetailEvent) {
        if let Some(task) = Arc::clone(&self.core).reduce(event) {
            task.await;
        }
    }

    pub fn close(&self) {
        self.scope.cancel();
    }
}

impl ArtistDetailCore {
    fn update(&self, f: impl FnOnce(&mut ArtistDetailState)) {
        self.state.send_modify(f);
    }

    fn reduce(self: Arc<Self>, event: ArtistDetailEvent) -> Option<BoxFuture<'static, ()>> {
        match event {
            ArtistDetailEvent::LoadById(id) => {
                self.loads.set_target(id);
                Some(self.load(id))
            }
            ArtistDetailEvent::Load => {
                let id = self.loads.target()?;
                Some(self.load(id))
            }
            ArtistDetailEvent::ToggleLike => {
                self.update(|s| s.is_liked = !s.is_liked);
                None
            }
        }
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
                tracing::debug!("Discarding stale response for artist {}", id);
                return;
            }

            match outcome {
                Ok(artist) => self.update(|s| {
                    s.loading = false;
                    s.albums = artist.albums.clone();
                    s.artist = Some(artist);
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

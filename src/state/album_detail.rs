//! Album detail screen reducer.
//!
//! Loads one album, keeps its tracks and comments as derived lists, and
//! tracks screen-local flags (liked, saved, playing) plus the comment input
//! buffer. Comments are appended only after the server confirms them.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::watch;

use super::{LoadTracker, ScreenScope};
use crate::catalog::{Album, AlbumRepository, Comment, Track};

/// Snapshot of the album detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumDetailState {
    pub loading: bool,
    pub error: Option<String>,
    pub album: Option<Album>,
    pub tracks: Vec<Track>,
    pub comments: Vec<Comment>,
    pub is_liked: bool,
    pub is_saved: bool,
    pub is_playing: bool,
    /// Comment input buffer
    pub new_comment_text: String,
}

impl Default for AlbumDetailState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            album: None,
            tracks: Vec::new(),
            comments: Vec::new(),
            is_liked: false,
            is_saved: false,
            is_playing: false,
            new_comment_text: String::new(),
        }
    }
}

/// Everything the album detail screen can ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum AlbumDetailEvent {
    LoadById(i64),
    /// Reload the album last requested with `LoadById`
    Load,
    ToggleLike,
    ToggleSave,
    Play,
    Pause,
    UpdateText(String),
    AddComment { text: String, rating: i32 },
    /// Append a track locally; nothing is sent to the server
    AddTrack(Track),
}

struct AlbumDetailCore {
    repository: Arc<dyn AlbumRepository>,
    /// Collector comments are posted on behalf of
    collector_id: i64,
    state: watch::Sender<AlbumDetailState>,
    loads: LoadTracker,
    /// Comments posted and not yet answered
    submissions: AtomicUsize,
}

/// Reducer for the album detail screen.
pub struct AlbumDetailReducer {
    core: Arc<AlbumDetailCore>,
    scope: ScreenScope,
}

impl AlbumDetailReducer {
    pub fn new(repository: Arc<dyn AlbumRepository>, collector_id: i64) -> Self {
        let (state, _) = watch::channel(AlbumDetailState::default());
        Self {
            core: Arc::new(AlbumDetailCore {
                repository,
                collector_id,
                state,
                loads: LoadTracker::default(),
                submissions: AtomicUsize::new(0),
            }),
            scope: ScreenScope::new(),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> AlbumDetailState {
        self.core.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<AlbumDetailState> {
        self.core.state.subscribe()
    }

    /// Fire-and-forget entry point for the UI.
    ///
    /// Events that suspend are spawned into this screen's scope and must be
    /// dispatched from within a tokio runtime.
    pub fn on_event(&self, event: AlbumDetailEvent) {
        if let Some(task) = Arc::clone(&self.core).reduce(event) {
            self.scope.launch(task);
        }
    }

    /// Apply `event` and wait for any work it started.
    pub async fn dispatch(&self, event: AlbumDetailEvent) {
        if let Some(task) = Arc::clone(&self.core).reduce(event) {
            task.await;
        }
    }

    /// Abandon in-flight requests (screen teardown).
    pub fn close(&self) {
        self.scope.cancel();
    }
}

impl AlbumDetailCore {
    fn update(&self, f: impl FnOnce(&mut AlbumDetailState)) {
        self.state.send_modify(f);
    }

    /// Apply the synchronous part of `event`; return the suspending part.
    fn reduce(self: Arc<Self>, event: AlbumDetailEvent) -> Option<BoxFuture<'static, ()>> {
        match event {
            AlbumDetailEvent::LoadById(id) => {
                self.loads.set_target(id);
                Some(self.load(id))
            }
            AlbumDetailEvent::Load => match self.loads.target() {
                Some(id) => Some(self.load(id)),
                None => {
                    tracing::debug!("Reload requested before any album was loaded");
                    None
                }
            },
            AlbumDetailEvent::ToggleLike => {
                self.update(|s| s.is_liked = !s.is_liked);
                None
            }
            AlbumDetailEvent::ToggleSave => {
                self.update(|s| s.is_saved = !s.is_saved);
                None
            }
            AlbumDetailEvent::Play => {
                self.update(|s| s.is_playing = true);
                None
            }
            AlbumDetailEvent::Pause => {
                self.update(|s| s.is_playing = false);
                None
            }
            AlbumDetailEvent::UpdateText(text) => {
                self.update(|s| s.new_comment_text = text);
                None
            }
            AlbumDetailEvent::AddComment { text, rating } => {
                if text.trim().is_empty() {
                    return None;
                }
                // Post to the album on screen, not to a load still in flight
                let displayed = self.state.borrow().album.as_ref().map(|a| a.id);
                let Some(album_id) = displayed else {
                    tracing::debug!("Comment ignored: no album loaded");
                    return None;
                };
                self.submissions.fetch_add(1, Ordering::SeqCst);
                self.update(|s| s.loading = true);
                Some(self.add_comment(album_id, text, rating))
            }
            AlbumDetailEvent::AddTrack(track) => {
                self.update(|s| s.tracks.push(track));
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
                tracing::debug!("Discarding stale response for album {}", id);
                return;
            }

            let submitting = self.submissions.load(Ordering::SeqCst) > 0;
            match outcome {
                Ok(album) => self.update(|s| {
                    s.loading = submitting;
                    s.error = None;
                    s.tracks = album.tracks.clone();
                    s.comments = album.comments.clone();
                    s.album = Some(album);
                }),
                // Previously loaded data stays on screen
                Err(e) => self.update(|s| {
                    s.loading = submitting;
                    s.error = Some(e.to_string());
                }),
            }
        }
        .boxed()
    }

    fn add_comment(
        self: Arc<Self>,
        album_id: i64,
        text: String,
        rating: i32,
    ) -> BoxFuture<'static, ()> {
        async move {
            let draft = Comment {
                id: 0,
                description: text,
                rating,
            };
            let outcome = self
                .repository
                .create_comment(album_id, &draft, self.collector_id)
                .await;

            let busy =
                self.submissions.fetch_sub(1, Ordering::SeqCst) > 1 || self.loads.is_pending();
            self.update(|s| {
                s.loading = busy;
                if s.album.as_ref().map(|a| a.id) != Some(album_id) {
                    tracing::debug!(album_id, "Dropping comment reply, album no longer shown");
                    return;
                }
                match outcome {
                    Ok(comment) => {
                        s.comments.push(comment);
                        s.new_comment_text.clear();
                        s.error = None;
                    }
                    // Input buffer is kept so the user can retry
                    Err(e) => s.error = Some(e.to_string()),
                }
            });
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TransportError;
    use crate::catalog::dto::CommentDto;
    use crate::catalog::transport::ApiResponse;
    use crate::test_utils::{
        MockCatalogApi, album_dto, album_dto_with_comments, comment_dto, mock_repository, ok,
    };
    use proptest::prelude::*;
    use std::time::Duration;

    fn reducer(api: &Arc<MockCatalogApi>) -> AlbumDetailReducer {
        let (repository, _cache) = mock_repository(api);
        AlbumDetailReducer::new(repository, 1)
    }

    async fn loaded_reducer(api: &Arc<MockCatalogApi>) -> AlbumDetailReducer {
        api.set_album(ok(album_dto_with_comments(100, "Buscando América", 2)));
        let reducer = reducer(api);
        reducer.dispatch(AlbumDetailEvent::LoadById(100)).await;
        reducer
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = AlbumDetailState::default();
        assert!(state.loading);
        assert!(state.album.is_none());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_load_by_id_success() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;

        let state = reducer.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.album.as_ref().map(|a| a.id), Some(100));
        assert_eq!(state.comments.len(), 2);
        assert_eq!(state.tracks.len(), 1);
    }

    #[tokio::test]
    async fn test_load_by_id_twice_is_idempotent() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;
        let first = reducer.state();

        reducer.dispatch(AlbumDetailEvent::LoadById(100)).await;
        assert_eq!(reducer.state(), first);
    }

    #[tokio::test]
    async fn test_initial_load_failure() {
        let api = Arc::new(MockCatalogApi::new());
        api.set_album(Ok(ApiResponse::status(404, "Not Found")));
        let reducer = reducer(&api);

        reducer.dispatch(AlbumDetailEvent::LoadById(7)).await;

        let state = reducer.state();
        assert!(!state.loading);
        assert!(state.album.is_none());
        let error = state.error.unwrap();
        assert!(error.contains("404"));
        assert!(error.contains("Not Found"));
    }

    #[tokio::test]
    async fn test_failed_reload_preserves_album() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;

        api.set_album(Err(TransportError::Connection("Network error".to_string())));
        reducer.dispatch(AlbumDetailEvent::Load).await;

        let state = reducer.state();
        assert!(!state.loading);
        assert_eq!(state.album.as_ref().map(|a| a.id), Some(100));
        assert_eq!(state.comments.len(), 2);
        assert!(state.error.unwrap().contains("Error de conexión"));
    }

    #[tokio::test]
    async fn test_bare_load_reissues_last_target() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;
        assert_eq!(api.calls(), 1);

        reducer.dispatch(AlbumDetailEvent::Load).await;
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_bare_load_without_target_is_noop() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = reducer(&api);

        reducer.dispatch(AlbumDetailEvent::Load).await;
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_add_comment_success_appends_and_clears() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;
        api.set_comment(ok(CommentDto {
            id: 50,
            description: Some("hello".to_string()),
            rating: Some(5),
        }));

        reducer.dispatch(AlbumDetailEvent::UpdateText("hello".to_string())).await;
        reducer
            .dispatch(AlbumDetailEvent::AddComment {
                text: "hello".to_string(),
                rating: 5,
            })
            .await;

        let state = reducer.state();
        assert_eq!(state.comments.len(), 3);
        assert_eq!(state.comments.last().map(|c| c.id), Some(50));
        assert!(state.new_comment_text.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());

        let (album_id, payload) = api.last_comment_payload().unwrap();
        assert_eq!(album_id, 100);
        assert_eq!(payload.collector.id, 1);
    }

    #[tokio::test]
    async fn test_add_comment_failure_rolls_back() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;
        api.set_comment(Ok(ApiResponse::status(500, "Internal Server Error")));

        reducer.dispatch(AlbumDetailEvent::UpdateText("hello".to_string())).await;
        reducer
            .dispatch(AlbumDetailEvent::AddComment {
                text: "hello".to_string(),
                rating: 5,
            })
            .await;

        let state = reducer.state();
        assert_eq!(state.comments.len(), 2);
        assert!(state.error.is_some());
        assert!(!state.loading);
        assert_eq!(state.new_comment_text, "hello");
    }

    #[tokio::test]
    async fn test_comment_after_failed_load_targets_displayed_album() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;

        api.set_album(Ok(ApiResponse::status(404, "Not Found")));
        reducer.dispatch(AlbumDetailEvent::LoadById(7)).await;
        assert_eq!(reducer.state().album.as_ref().map(|a| a.id), Some(100));

        api.set_comment(ok(comment_dto(50, "sigue siendo 100")));
        reducer
            .dispatch(AlbumDetailEvent::AddComment {
                text: "sigue siendo 100".to_string(),
                rating: 4,
            })
            .await;

        let (album_id, _) = api.last_comment_payload().unwrap();
        assert_eq!(album_id, 100);
        let state = reducer.state();
        assert_eq!(state.comments.len(), 3);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_comment_reply_for_replaced_album_is_dropped() {
        let api = Arc::new(MockCatalogApi::new());
        api.set_album_for(1, Duration::ZERO, ok(album_dto_with_comments(1, "Uno", 1)));
        api.set_album_for(2, Duration::ZERO, ok(album_dto(2, "Dos")));
        api.set_comment(ok(comment_dto(60, "para el uno")));
        api.set_comment_delay(Duration::from_millis(100));
        let reducer = reducer(&api);
        reducer.dispatch(AlbumDetailEvent::LoadById(1)).await;

        reducer.on_event(AlbumDetailEvent::AddComment {
            text: "para el uno".to_string(),
            rating: 5,
        });
        reducer.dispatch(AlbumDetailEvent::LoadById(2)).await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        let (album_id, _) = api.last_comment_payload().unwrap();
        assert_eq!(album_id, 1);
        let state = reducer.state();
        assert_eq!(state.album.as_ref().map(|a| a.id), Some(2));
        assert!(state.comments.is_empty());
        assert!(state.error.is_none());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_comment_reply_keeps_loading_while_reload_in_flight() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;
        api.set_album_for(
            100,
            Duration::from_millis(100),
            ok(album_dto_with_comments(100, "Buscando América", 3)),
        );
        api.set_comment(ok(comment_dto(50, "rápido")));

        reducer.on_event(AlbumDetailEvent::Load);
        reducer
            .dispatch(AlbumDetailEvent::AddComment {
                text: "rápido".to_string(),
                rating: 5,
            })
            .await;
        assert!(reducer.state().loading);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let state = reducer.state();
        assert!(!state.loading);
        assert_eq!(state.comments.len(), 3);
    }

    #[tokio::test]
    async fn test_reload_keeps_loading_while_comment_in_flight() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;
        api.set_comment(ok(comment_dto(50, "lento")));
        api.set_comment_delay(Duration::from_millis(100));

        reducer.on_event(AlbumDetailEvent::AddComment {
            text: "lento".to_string(),
            rating: 5,
        });
        reducer.dispatch(AlbumDetailEvent::Load).await;
        assert!(reducer.state().loading);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let state = reducer.state();
        assert!(!state.loading);
        assert_eq!(state.comments.len(), 3);
    }

    #[tokio::test]
    async fn test_blank_comment_never_hits_transport() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;
        let calls = api.calls();

        for text in ["", "   "] {
            reducer
                .dispatch(AlbumDetailEvent::AddComment {
                    text: text.to_string(),
                    rating: 5,
                })
                .await;
        }

        assert_eq!(api.calls(), calls);
        assert!(reducer.state().error.is_none());
    }

    #[tokio::test]
    async fn test_add_track_is_local() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = loaded_reducer(&api).await;
        let calls = api.calls();

        reducer
            .dispatch(AlbumDetailEvent::AddTrack(Track {
                id: 0,
                name: "Bonus".to_string(),
                duration: "2:30".to_string(),
            }))
            .await;

        let state = reducer.state();
        assert_eq!(state.tracks.len(), 2);
        assert_eq!(state.tracks[1].name, "Bonus");
        assert_eq!(api.calls(), calls);
    }

    #[tokio::test]
    async fn test_play_pause() {
        let api = Arc::new(MockCatalogApi::new());
        let reducer = reducer(&api);

        reducer.on_event(AlbumDetailEvent::Play);
        assert!(reducer.state().is_playing);
        reducer.on_event(AlbumDetailEvent::Play);
        assert!(reducer.state().is_playing);
        reducer.on_event(AlbumDetailEvent::Pause);
        assert!(!reducer.state().is_playing);
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let api = Arc::new(MockCatalogApi::new());
        api.set_album_for(1, Duration::from_millis(100), ok(album_dto(1, "Slow")));
        api.set_album_for(2, Duration::ZERO, ok(album_dto(2, "Fast")));
        let reducer = reducer(&api);

        reducer.on_event(AlbumDetailEvent::LoadById(1));
        reducer.dispatch(AlbumDetailEvent::LoadById(2)).await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        let state = reducer.state();
        assert_eq!(state.album.map(|a| a.name), Some("Fast".to_string()));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let api = Arc::new(MockCatalogApi::new());
        api.set_album(ok(album_dto(100, "Observed")));
        let reducer = reducer(&api);
        let mut rx = reducer.subscribe();

        reducer.on_event(AlbumDetailEvent::LoadById(100));
        let state = rx
            .wait_for(|s| s.album.is_some())
            .await
            .map(|s| (*s).clone())
            .unwrap();
        assert_eq!(state.album.unwrap().name, "Observed");
    }

    #[tokio::test]
    async fn test_close_abandons_in_flight_load() {
        let api = Arc::new(MockCatalogApi::new());
        api.set_album_for(1, Duration::from_millis(100), ok(album_dto(1, "Late")));
        let reducer = reducer(&api);

        reducer.on_event(AlbumDetailEvent::LoadById(1));
        reducer.close();
        tokio::time::sleep(Duration::from_millis(200)).await;

        let state = reducer.state();
        assert!(state.album.is_none());
        assert!(state.loading);
    }

    proptest! {
        #[test]
        fn prop_is_playing_follows_last_play_or_pause(events in prop::collection::vec(any::<bool>(), 0..20)) {
            let api = Arc::new(MockCatalogApi::new());
            let reducer = reducer(&api);

            for &play in &events {
                reducer.on_event(if play { AlbumDetailEvent::Play } else { AlbumDetailEvent::Pause });
            }

            let expected = events.last().copied().unwrap_or(false);
            prop_assert_eq!(reducer.state().is_playing, expected);
        }

        #[test]
        fn prop_toggle_like_parity(toggles in 0usize..16) {
            let api = Arc::new(MockCatalogApi::new());
            let reducer = reducer(&api);

            for _ in 0..toggles {
                reducer.on_event(AlbumDetailEvent::ToggleLike);
                reducer.on_event(AlbumDetailEvent::ToggleSave);
            }

            let state = reducer.state();
            prop_assert_eq!(state.is_liked, toggles % 2 == 1);
            prop_assert_eq!(state.is_saved, toggles % 2 == 1);
        }

        #[test]
        fn prop_whitespace_comment_is_noop(text in "[ \t\n]{0,8}") {
            let api = Arc::new(MockCatalogApi::new());
            let reducer = reducer(&api);
            let before = reducer.state();

            reducer.on_event(AlbumDetailEvent::AddComment { text, rating: 3 });

            prop_assert_eq!(api.calls(), 0);
            prop_assert_eq!(reducer.state(), before);
        }
    }
}

//! Test utilities and fixtures for vinilos tests.
//!
//! This module provides DTO fixtures and a call-counting mock transport to
//! reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{MockCatalogApi, album_dto};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let api = Arc::new(MockCatalogApi::new());
//!     api.set_album(Ok(ApiResponse::ok(album_dto(1, "Test Album"))));
//!     // ... test logic
//!     assert_eq!(api.calls(), 1);
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::catalog::dto::{
    AlbumDto, CollectorDto, CommentDto, MusicianDto, NewAlbumPayload, NewCollectorPayload,
    NewCommentPayload, NewMusicianPayload, NewTrackPayload, TrackDto,
};
use crate::catalog::transport::{ApiResponse, CatalogApi, TransportError, TransportResult};
use crate::catalog::{CatalogCache, CatalogRepository};

/// Creates an album DTO with no nested collections.
pub fn album_dto(id: i64, name: &str) -> AlbumDto {
    AlbumDto {
        id,
        name: name.to_string(),
        cover: Some(format!("https://example.com/{}.jpg", id)),
        release_date: Some("1984-08-01T00:00:00.000Z".to_string()),
        description: Some("Test description".to_string()),
        genre: Some("Salsa".to_string()),
        record_label: Some("Elektra".to_string()),
        tracks: None,
        performers: None,
        comments: None,
    }
}

/// Creates an album DTO with one track and `comments` comments.
pub fn album_dto_with_comments(id: i64, name: &str, comments: usize) -> AlbumDto {
    AlbumDto {
        tracks: Some(vec![TrackDto {
            id: 1,
            name: "Track 1".to_string(),
            duration: Some("3:00".to_string()),
        }]),
        comments: Some(
            (0..comments as i64)
                .map(|i| comment_dto(i + 1, &format!("Comment {}", i + 1)))
                .collect(),
        ),
        ..album_dto(id, name)
    }
}

pub fn comment_dto(id: i64, description: &str) -> CommentDto {
    CommentDto {
        id,
        description: Some(description.to_string()),
        rating: Some(5),
    }
}

pub fn musician_dto(id: i64, name: &str) -> MusicianDto {
    MusicianDto {
        id,
        name: name.to_string(),
        image: None,
        description: Some("Test musician".to_string()),
        birth_date: Some("1948-07-16T00:00:00.000Z".to_string()),
        albums: None,
    }
}

pub fn collector_dto(id: i64, name: &str) -> CollectorDto {
    CollectorDto {
        id,
        name: name.to_string(),
        telephone: Some("3502457896".to_string()),
        email: Some("collector@example.com".to_string()),
        comments: None,
        favorite_performers: None,
        collector_albums: None,
    }
}

/// Repository over a mock transport and a fresh cache.
pub fn mock_repository(api: &Arc<MockCatalogApi>) -> (Arc<CatalogRepository>, Arc<CatalogCache>) {
    let cache = Arc::new(CatalogCache::new());
    let repository = Arc::new(CatalogRepository::new(api.clone(), cache.clone()));
    (repository, cache)
}

type Slot<T> = Mutex<Option<TransportResult<T>>>;

/// Mock transport that returns configured responses and counts calls.
///
/// Unconfigured endpoints fail with a connection error.
#[derive(Default)]
pub struct MockCatalogApi {
    calls: AtomicUsize,
    albums: Slot<Vec<AlbumDto>>,
    album: Slot<AlbumDto>,
    /// Per-id album responses with an artificial delay
    album_by_id: Mutex<HashMap<i64, (Duration, TransportResult<AlbumDto>)>>,
    created_album: Slot<AlbumDto>,
    comment: Slot<CommentDto>,
    /// Delay applied before a comment response is returned
    comment_delay: Mutex<Duration>,
    track: Slot<TrackDto>,
    musicians: Slot<Vec<MusicianDto>>,
    musician: Slot<MusicianDto>,
    created_musician: Slot<MusicianDto>,
    collectors: Slot<Vec<CollectorDto>>,
    collector: Slot<CollectorDto>,
    created_collector: Slot<CollectorDto>,
    album_payloads: Mutex<Vec<NewAlbumPayload>>,
    comment_payloads: Mutex<Vec<(i64, NewCommentPayload)>>,
    musician_payloads: Mutex<Vec<NewMusicianPayload>>,
    collector_payloads: Mutex<Vec<NewCollectorPayload>>,
}

impl MockCatalogApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of transport calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_albums(&self, result: TransportResult<Vec<AlbumDto>>) {
        *self.albums.lock() = Some(result);
    }

    pub fn set_album(&self, result: TransportResult<AlbumDto>) {
        *self.album.lock() = Some(result);
    }

    /// Respond to `get_album(id)` after `delay`.
    pub fn set_album_for(&self, id: i64, delay: Duration, result: TransportResult<AlbumDto>) {
        self.album_by_id.lock().insert(id, (delay, result));
    }

    pub fn set_created_album(&self, result: TransportResult<AlbumDto>) {
        *self.created_album.lock() = Some(result);
    }

    pub fn set_comment(&self, result: TransportResult<CommentDto>) {
        *self.comment.lock() = Some(result);
    }

    pub fn set_comment_delay(&self, delay: Duration) {
        *self.comment_delay.lock() = delay;
    }

    pub fn set_track(&self, result: TransportResult<TrackDto>) {
        *self.track.lock() = Some(result);
    }

    pub fn set_musicians(&self, result: TransportResult<Vec<MusicianDto>>) {
        *self.musicians.lock() = Some(result);
    }

    pub fn set_musician(&self, result: TransportResult<MusicianDto>) {
        *self.musician.lock() = Some(result);
    }

    pub fn set_created_musician(&self, result: TransportResult<MusicianDto>) {
        *self.created_musician.lock() = Some(result);
    }

    pub fn set_collectors(&self, result: TransportResult<Vec<CollectorDto>>) {
        *self.collectors.lock() = Some(result);
    }

    pub fn set_collector(&self, result: TransportResult<CollectorDto>) {
        *self.collector.lock() = Some(result);
    }

    pub fn set_created_collector(&self, result: TransportResult<CollectorDto>) {
        *self.created_collector.lock() = Some(result);
    }

    pub fn last_album_payload(&self) -> Option<NewAlbumPayload> {
        self.album_payloads.lock().last().cloned()
    }

    pub fn last_comment_payload(&self) -> Option<(i64, NewCommentPayload)> {
        self.comment_payloads.lock().last().cloned()
    }

    pub fn last_musician_payload(&self) -> Option<NewMusicianPayload> {
        self.musician_payloads.lock().last().cloned()
    }

    pub fn last_collector_payload(&self) -> Option<NewCollectorPayload> {
        self.collector_payloads.lock().last().cloned()
    }

    fn respond<T: Clone>(&self, slot: &Slot<T>) -> TransportResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        slot.lock().clone().unwrap_or_else(|| {
            Err(TransportError::Connection(
                "no response configured".to_string(),
            ))
        })
    }
}

/// Shorthand for a 200 response.
pub fn ok<T>(body: T) -> TransportResult<T> {
    Ok(ApiResponse::ok(body))
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
    async fn get_albums(&self) -> TransportResult<Vec<AlbumDto>> {
        self.respond(&self.albums)
    }

    async fn get_album(&self, id: i64) -> TransportResult<AlbumDto> {
        let scripted = self.album_by_id.lock().get(&id).cloned();
        match scripted {
            Some((delay, result)) => {
                self.calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                result
            }
            None => self.respond(&self.album),
        }
    }

    async fn create_album(&self, payload: &NewAlbumPayload) -> TransportResult<AlbumDto> {
        self.album_payloads.lock().push(payload.clone());
        self.respond(&self.created_album)
    }

    async fn create_comment(
        &self,
        album_id: i64,
        payload: &NewCommentPayload,
    ) -> TransportResult<CommentDto> {
        self.comment_payloads
            .lock()
            .push((album_id, payload.clone()));
        let result = self.respond(&self.comment);
        let delay = *self.comment_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn create_track(
        &self,
        _album_id: i64,
        _payload: &NewTrackPayload,
    ) -> TransportResult<TrackDto> {
        self.respond(&self.track)
    }

    async fn get_musicians(&self) -> TransportResult<Vec<MusicianDto>> {
        self.respond(&self.musicians)
    }

    async fn get_musician(&self, _id: i64) -> TransportResult<MusicianDto> {
        self.respond(&self.musician)
    }

    async fn create_musician(&self, payload: &NewMusicianPayload) -> TransportResult<MusicianDto> {
        self.musician_payloads.lock().push(payload.clone());
        self.respond(&self.created_musician)
    }

    async fn get_collectors(&self) -> TransportResult<Vec<CollectorDto>> {
        self.respond(&self.collectors)
    }

    async fn get_collector(&self, _id: i64) -> TransportResult<CollectorDto> {
        self.respond(&self.collector)
    }

    async fn create_collector(
        &self,
        payload: &NewCollectorPayload,
    ) -> TransportResult<CollectorDto> {
        self.collector_payloads.lock().push(payload.clone());
        self.respond(&self.created_collector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_endpoint_fails() {
        let api = MockCatalogApi::new();
        let result = api.get_albums().await;
        assert!(matches!(result, Err(TransportError::Connection(_))));
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn test_configured_response_is_repeatable() {
        let api = MockCatalogApi::new();
        api.set_album(ok(album_dto(1, "A")));
        assert_eq!(api.get_album(1).await.unwrap().body.unwrap().name, "A");
        assert_eq!(api.get_album(1).await.unwrap().body.unwrap().name, "A");
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_per_id_response_takes_precedence() {
        let api = MockCatalogApi::new();
        api.set_album(ok(album_dto(1, "Default")));
        api.set_album_for(2, Duration::ZERO, ok(album_dto(2, "Scripted")));
        assert_eq!(api.get_album(2).await.unwrap().body.unwrap().name, "Scripted");
        assert_eq!(api.get_album(1).await.unwrap().body.unwrap().name, "Default");
    }

    #[test]
    fn test_album_dto_with_comments() {
        let dto = album_dto_with_comments(1, "A", 3);
        assert_eq!(dto.comments.unwrap().len(), 3);
        assert_eq!(dto.tracks.unwrap().len(), 1);
    }
}

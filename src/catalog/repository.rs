//! Repository traits consumed by the reducers.
//!
//! These traits decouple screen logic from service adapter construction.
//! [`CatalogRepository`] is a pure pass-through to the adapters; tests can
//! substitute their own implementations or a mock transport underneath.

use std::sync::Arc;

use async_trait::async_trait;

use super::cache::CatalogCache;
use super::domain::{Album, Artist, Collector, Comment, Outcome, Track};
use super::service::{AlbumService, ArtistService, CollectorService};
use super::transport::CatalogApi;

#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn fetch_all(&self) -> Outcome<Vec<Album>>;

    async fn fetch_by_id(&self, id: i64) -> Outcome<Album>;

    async fn create(&self, album: &Album) -> Outcome<Album>;

    async fn create_comment(
        &self,
        album_id: i64,
        comment: &Comment,
        collector_id: i64,
    ) -> Outcome<Comment>;

    async fn create_track(&self, album_id: i64, track: &Track) -> Outcome<Track>;
}

#[async_trait]
pub trait ArtistRepository: Send + Sync {
    async fn fetch_all(&self) -> Outcome<Vec<Artist>>;

    async fn fetch_by_id(&self, id: i64) -> Outcome<Artist>;

    async fn create(&self, artist: &Artist) -> Outcome<Artist>;
}

#[async_trait]
pub trait CollectorRepository: Send + Sync {
    async fn fetch_all(&self) -> Outcome<Vec<Collector>>;

    async fn fetch_by_id(&self, id: i64) -> Outcome<Collector>;

    async fn create(&self, collector: &Collector) -> Outcome<Collector>;
}

/// List access for the generic list screens.
#[async_trait]
pub trait ListRepository<T>: Send + Sync {
    /// Cache-first list fetch.
    async fn fetch_list(&self) -> Outcome<Vec<T>>;

    /// Drop the cached list so the next fetch hits the network.
    fn invalidate_list(&self);
}

/// Delegating repository over the three service adapters.
pub struct CatalogRepository {
    albums: AlbumService,
    artists: ArtistService,
    collectors: CollectorService,
}

impl CatalogRepository {
    /// Build the adapters over a shared transport and cache.
    pub fn new(api: Arc<dyn CatalogApi>, cache: Arc<CatalogCache>) -> Self {
        Self {
            albums: AlbumService::new(Arc::clone(&api), Arc::clone(&cache)),
            artists: ArtistService::new(Arc::clone(&api), Arc::clone(&cache)),
            collectors: CollectorService::new(api, cache),
        }
    }
}

#[async_trait]
impl AlbumRepository for CatalogRepository {
    async fn fetch_all(&self) -> Outcome<Vec<Album>> {
        self.albums.fetch_all().await
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<Album> {
        self.albums.fetch_by_id(id).await
    }

    async fn create(&self, album: &Album) -> Outcome<Album> {
        self.albums.create(album).await
    }

    async fn create_comment(
        &self,
        album_id: i64,
        comment: &Comment,
        collector_id: i64,
    ) -> Outcome<Comment> {
        self.albums
            .create_comment(album_id, comment, collector_id)
            .await
    }

    async fn create_track(&self, album_id: i64, track: &Track) -> Outcome<Track> {
        self.albums.create_track(album_id, track).await
    }
}

#[async_trait]
impl ArtistRepository for CatalogRepository {
    async fn fetch_all(&self) -> Outcome<Vec<Artist>> {
        self.artists.fetch_all().await
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<Artist> {
        self.artists.fetch_by_id(id).await
    }

    async fn create(&self, artist: &Artist) -> Outcome<Artist> {
        self.artists.create(artist).await
    }
}

#[async_trait]
impl CollectorRepository for CatalogRepository {
    async fn fetch_all(&self) -> Outcome<Vec<Collector>> {
        self.collectors.fetch_all().await
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<Collector> {
        self.collectors.fetch_by_id(id).await
    }

    async fn create(&self, collector: &Collector) -> Outcome<Collector> {
        self.collectors.create(collector).await
    }
}

#[async_trait]
impl ListRepository<Album> for CatalogRepository {
    async fn fetch_list(&self) -> Outcome<Vec<Album>> {
        self.albums.fetch_all().await
    }

    fn invalidate_list(&self) {
        self.albums.invalidate_cache();
    }
}

#[async_trait]
impl ListRepository<Artist> for CatalogRepository {
    async fn fetch_list(&self) -> Outcome<Vec<Artist>> {
        self.artists.fetch_all().await
    }

    fn invalidate_list(&self) {
        self.artists.invalidate_cache();
    }
}

#[async_trait]
impl ListRepository<Collector> for CatalogRepository {
    async fn fetch_list(&self) -> Outcome<Vec<Collector>> {
        self.collectors.fetch_all().await
    }

    fn invalidate_list(&self) {
        self.collectors.invalidate_cache();
    }
}

//! Service adapters - one per entity.
//!
//! Each adapter calls the remote endpoint through [`CatalogApi`], classifies
//! the outcome, converts payloads via the adapter module, and consults the
//! [`CatalogCache`] for list fetches:
//! 1. List fetches are cache-first; a hit never touches the transport
//! 2. Single-item fetches always go to the network
//! 3. Successful writes invalidate the affected list
//!
//! Every operation returns an [`Outcome`]; transport failures are recovered
//! here and never travel further.

use std::future::Future;
use std::sync::Arc;

use super::adapter;
use super::cache::{CacheKey, Cacheable, CatalogCache};
use super::domain::{
    Action, Album, Artist, Collector, Comment, EntityKind, Outcome, ServiceError, Track,
};
use super::transport::{CatalogApi, TransportResult};

/// Describes one remote operation for outcome classification.
#[derive(Debug, Clone, Copy)]
struct Request {
    action: Action,
    entity: EntityKind,
    /// Label used in empty-body failures
    operation: &'static str,
}

const FETCH_ALBUMS: Request = Request {
    action: Action::Fetch,
    entity: EntityKind::Albums,
    operation: "Álbumes",
};
const FETCH_ALBUM: Request = Request {
    action: Action::Fetch,
    entity: EntityKind::Album,
    operation: "Álbum",
};
const CREATE_ALBUM: Request = Request {
    action: Action::Create,
    entity: EntityKind::Album,
    operation: "Crear álbum",
};
const CREATE_COMMENT: Request = Request {
    action: Action::Create,
    entity: EntityKind::Comment,
    operation: "Comentario",
};
const CREATE_TRACK: Request = Request {
    action: Action::Create,
    entity: EntityKind::Track,
    operation: "Canción",
};
const FETCH_ARTISTS: Request = Request {
    action: Action::Fetch,
    entity: EntityKind::Artists,
    operation: "Artistas",
};
const FETCH_ARTIST: Request = Request {
    action: Action::Fetch,
    entity: EntityKind::Artist,
    operation: "Artista",
};
const CREATE_ARTIST: Request = Request {
    action: Action::Create,
    entity: EntityKind::Artist,
    operation: "Crear artista",
};
const FETCH_COLLECTORS: Request = Request {
    action: Action::Fetch,
    entity: EntityKind::Collectors,
    operation: "Coleccionistas",
};
const FETCH_COLLECTOR: Request = Request {
    action: Action::Fetch,
    entity: EntityKind::Collector,
    operation: "Coleccionista",
};
const CREATE_COLLECTOR: Request = Request {
    action: Action::Create,
    entity: EntityKind::Collector,
    operation: "Crear coleccionista",
};

/// Classify a transport result and convert its body.
fn classify<D, T>(
    result: TransportResult<D>,
    request: Request,
    convert: impl FnOnce(D) -> T,
) -> Outcome<T> {
    let outcome = match result {
        Err(e) => Err(ServiceError::Connection(e.to_string())),
        Ok(response) if !response.is_success() => Err(ServiceError::Server {
            action: request.action,
            entity: request.entity,
            code: response.code,
            message: response.message,
        }),
        Ok(response) => match response.body {
            Some(body) => Ok(convert(body)),
            None => Err(ServiceError::EmptyBody {
                operation: request.operation,
            }),
        },
    };

    if let Err(ref e) = outcome {
        tracing::warn!("{} request failed: {}", request.operation, e);
    }
    outcome
}

/// Cache-first list fetch.
///
/// `fetch` is only invoked on a cache miss.
async fn fetch_list<D, T, F, Fut>(
    cache: &CatalogCache,
    request: Request,
    fetch: F,
    convert: fn(D) -> T,
) -> Outcome<Vec<T>>
where
    T: Cacheable,
    F: FnOnce() -> Fut,
    Fut: Future<Output = TransportResult<Vec<D>>>,
{
    if let Some(items) = cache.get::<T>() {
        tracing::debug!("Cache hit for {:?} ({} items)", T::KEY, items.len());
        return Ok(items);
    }

    tracing::debug!("Cache miss for {:?}, fetching", T::KEY);
    let items = classify(fetch().await, request, |body: Vec<D>| {
        body.into_iter().map(convert).collect::<Vec<T>>()
    })?;
    cache.put(items.clone());
    Ok(items)
}

/// Album service adapter
pub struct AlbumService {
    api: Arc<dyn CatalogApi>,
    cache: Arc<CatalogCache>,
}

impl AlbumService {
    pub fn new(api: Arc<dyn CatalogApi>, cache: Arc<CatalogCache>) -> Self {
        Self { api, cache }
    }

    /// All albums, served from cache when present.
    pub async fn fetch_all(&self) -> Outcome<Vec<Album>> {
        fetch_list(
            &self.cache,
            FETCH_ALBUMS,
            || self.api.get_albums(),
            adapter::to_album,
        )
        .await
    }

    /// One album with its tracks, performers and comments. Bypasses the cache.
    pub async fn fetch_by_id(&self, id: i64) -> Outcome<Album> {
        classify(self.api.get_album(id).await, FETCH_ALBUM, adapter::to_album)
    }

    /// Create an album and return it as the server stored it.
    pub async fn create(&self, album: &Album) -> Outcome<Album> {
        let payload = adapter::album_payload(album);
        let created = classify(
            self.api.create_album(&payload).await,
            CREATE_ALBUM,
            adapter::to_album,
        )?;
        self.cache.invalidate(CacheKey::Albums);
        tracing::info!("Created album {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Post a comment on an album on behalf of `collector_id`.
    pub async fn create_comment(
        &self,
        album_id: i64,
        comment: &Comment,
        collector_id: i64,
    ) -> Outcome<Comment> {
        let payload = adapter::comment_payload(comment, collector_id);
        let created = classify(
            self.api.create_comment(album_id, &payload).await,
            CREATE_COMMENT,
            adapter::to_comment,
        )?;
        self.cache.invalidate(CacheKey::Albums);
        Ok(created)
    }

    /// Add a track to an album on the server.
    pub async fn create_track(&self, album_id: i64, track: &Track) -> Outcome<Track> {
        let payload = adapter::track_payload(track);
        let created = classify(
            self.api.create_track(album_id, &payload).await,
            CREATE_TRACK,
            adapter::to_track,
        )?;
        self.cache.invalidate(CacheKey::Albums);
        Ok(created)
    }

    pub fn invalidate_cache(&self) {
        self.cache.invalidate(CacheKey::Albums);
    }
}

/// Artist (musician) service adapter
pub struct ArtistService {
    api: Arc<dyn CatalogApi>,
    cache: Arc<CatalogCache>,
}

impl ArtistService {
    pub fn new(api: Arc<dyn CatalogApi>, cache: Arc<CatalogCache>) -> Self {
        Self { api, cache }
    }

    pub async fn fetch_all(&self) -> Outcome<Vec<Artist>> {
        fetch_list(
            &self.cache,
            FETCH_ARTISTS,
            || self.api.get_musicians(),
            adapter::to_artist,
        )
        .await
    }

    pub async fn fetch_by_id(&self, id: i64) -> Outcome<Artist> {
        classify(
            self.api.get_musician(id).await,
            FETCH_ARTIST,
            adapter::to_artist,
        )
    }

    /// Register a musician and return it as the server stored it.
    pub async fn create(&self, artist: &Artist) -> Outcome<Artist> {
        let payload = adapter::musician_payload(artist);
        let created = classify(
            self.api.create_musician(&payload).await,
            CREATE_ARTIST,
            adapter::to_artist,
        )?;
        self.cache.invalidate(CacheKey::Artists);
        tracing::info!("Created artist {} ({})", created.id, created.name);
        Ok(created)
    }

    pub fn invalidate_cache(&self) {
        self.cache.invalidate(CacheKey::Artists);
    }
}

/// Collector service adapter
pub struct CollectorService {
    api: Arc<dyn CatalogApi>,
    cache: Arc<CatalogCache>,
}

impl CollectorService {
    pub fn new(api: Arc<dyn CatalogApi>, cache: Arc<CatalogCache>) -> Self {
        Self { api, cache }
    }

    pub async fn fetch_all(&self) -> Outcome<Vec<Collector>> {
        fetch_list(
            &self.cache,
            FETCH_COLLECTORS,
            || self.api.get_collectors(),
            adapter::to_collector,
        )
        .await
    }

    pub async fn fetch_by_id(&self, id: i64) -> Outcome<Collector> {
        classify(
            self.api.get_collector(id).await,
            FETCH_COLLECTOR,
            adapter::to_collector,
        )
    }

    pub async fn create(&self, collector: &Collector) -> Outcome<Collector> {
        let payload = adapter::collector_payload(collector);
        let created = classify(
            self.api.create_collector(&payload).await,
            CREATE_COLLECTOR,
            adapter::to_collector,
        )?;
        self.cache.invalidate(CacheKey::Collectors);
        tracing::info!("Created collector {} ({})", created.id, created.name);
        Ok(created)
    }

    pub fn invalidate_cache(&self) {
        self.cache.invalidate(CacheKey::Collectors);
    }
}

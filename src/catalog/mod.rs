//! Catalog data access - fetches albums, artists and collectors from the
//! Vinilos API.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`dto.rs`) - Exact API request/response shapes
//! - **Adapter** (`adapter.rs`) - Converts DTOs to domain models and back
//! - **Transport** (`transport.rs`) - Typed request per endpoint plus the HTTP client
//! - **Cache** (`cache.rs`) - Last successful list per entity collection
//! - **Services** (`service.rs`) - One adapter per entity; classifies outcomes
//! - **Repository** (`repository.rs`) - Traits the reducers depend on
//!
//! ```text
//! Reducer ─▶ Repository ─▶ Service ─┬─▶ CatalogCache
//!                                    └─▶ CatalogApi ─▶ HTTP
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use vinilos::catalog::{CatalogCache, CatalogRepository, HttpCatalogApi};
//!
//! let api = Arc::new(HttpCatalogApi::new("http://localhost:3000", timeout)?);
//! let repository = CatalogRepository::new(api, Arc::new(CatalogCache::new()));
//! let albums = AlbumRepository::fetch_all(&repository).await?;
//! ```

pub mod adapter;
pub mod cache;
pub mod domain;
pub mod dto;
pub mod repository;
pub mod service;
pub mod transport;

pub use cache::{CacheKey, CatalogCache};
pub use domain::{
    Album, Artist, ArtistAlbum, Collector, CollectorAlbum, Comment, Outcome, Performer,
    ServiceError, Track,
};
pub use repository::{
    AlbumRepository, ArtistRepository, CatalogRepository, CollectorRepository, ListRepository,
};
pub use service::{AlbumService, ArtistService, CollectorService};
pub use transport::{ApiResponse, CatalogApi, HttpCatalogApi, TransportError};

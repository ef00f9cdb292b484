//! Vinilos API Data Transfer Objects
//!
//! These types match what the Vinilos REST API returns and accepts.
//! DO NOT use these types outside the catalog module - convert to domain types.
//!
//! Nested collections are optional on the wire: list endpoints often omit
//! them, and the adapter substitutes empty collections.

use serde::{Deserialize, Serialize};

/// Album as returned by `/albums` and `/albums/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub cover: Option<String>,
    /// ISO-8601 timestamp, e.g. "1984-08-01T00:00:00.000Z"
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub record_label: Option<String>,
    #[serde(default)]
    pub tracks: Option<Vec<TrackDto>>,
    #[serde(default)]
    pub performers: Option<Vec<PerformerDto>>,
    #[serde(default)]
    pub comments: Option<Vec<CommentDto>>,
}

/// Track on an album
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub duration: Option<String>,
}

/// Comment on an album or by a collector
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommentDto {
    pub id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
}

/// Performer (musician or band) credited on an album
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PerformerDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Musician as returned by `/musicians`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicianDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub albums: Option<Vec<AlbumSummaryDto>>,
}

/// Album summary nested under musicians and collector albums
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummaryDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Collector as returned by `/collectors`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub comments: Option<Vec<CommentDto>>,
    #[serde(default)]
    pub favorite_performers: Option<Vec<PerformerDto>>,
    #[serde(default)]
    pub collector_albums: Option<Vec<CollectorAlbumDto>>,
}

/// Entry in a collector's collection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectorAlbumDto {
    pub id: i64,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub album: Option<AlbumSummaryDto>,
}

// ============================================================================
// Request payloads
// ============================================================================

/// Body for `POST /albums`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAlbumPayload {
    pub name: String,
    pub cover: String,
    pub release_date: String,
    pub description: String,
    pub genre: String,
    pub record_label: String,
}

/// Body for `POST /albums/{id}/comments`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCommentPayload {
    pub description: String,
    pub rating: i32,
    pub collector: CollectorRef,
}

/// Reference to an existing collector by id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectorRef {
    pub id: i64,
}

/// Body for `POST /musicians`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMusicianPayload {
    pub name: String,
    pub image: String,
    pub description: String,
    pub birth_date: String,
}

/// Body for `POST /collectors`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCollectorPayload {
    pub name: String,
    pub telephone: String,
    pub email: String,
}

/// Body for `POST /albums/{id}/tracks`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTrackPayload {
    pub name: String,
    pub duration: String,
}

//! Internal domain models for the catalog.
//!
//! These types are OUR types - they don't change when the remote API changes.
//! All wire payloads get converted into these types via the adapter.

use chrono::NaiveDate;

/// Result of every service adapter operation.
///
/// `Ok` is the success variant, `Err` carries the classified failure.
/// Nothing past the service boundary ever sees a raw transport error.
pub type Outcome<T> = Result<T, ServiceError>;

/// An album with its nested collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Album {
    pub id: i64,
    pub name: String,
    /// Cover image URL
    pub cover: String,
    pub release_date: Option<NaiveDate>,
    pub description: String,
    pub genre: String,
    pub record_label: String,
    pub tracks: Vec<Track>,
    pub performers: Vec<Performer>,
    pub comments: Vec<Comment>,
}

/// A track on an album.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub id: i64,
    pub name: String,
    /// Display duration, e.g. "4:05"
    pub duration: String,
}

/// A user comment on an album.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub description: String,
    /// Rating as submitted (the API expects 1-5)
    pub rating: i32,
}

/// A performer credited on an album or favourited by a collector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Performer {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub description: String,
}

/// A musician in the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub description: String,
    pub birth_date: Option<NaiveDate>,
    pub albums: Vec<ArtistAlbum>,
}

/// Album summary as listed under an artist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistAlbum {
    pub id: i64,
    pub name: String,
    pub cover: String,
    pub release_date: Option<NaiveDate>,
    pub genre: String,
}

/// A collector and the albums they own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collector {
    pub id: i64,
    pub name: String,
    pub telephone: String,
    pub email: String,
    pub comments: Vec<Comment>,
    pub favorite_performers: Vec<Performer>,
    pub albums: Vec<CollectorAlbum>,
}

/// An album entry in a collector's collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectorAlbum {
    pub id: i64,
    pub price: i64,
    /// Availability status, e.g. "Active" or "Inactive"
    pub status: String,
    pub album: Option<ArtistAlbum>,
}

/// Entity labels used when classifying failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Album,
    Albums,
    Artist,
    Artists,
    Collector,
    Collectors,
    Comment,
    Track,
}

impl EntityKind {
    /// User-facing label embedded in server failure messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Album => "álbum",
            EntityKind::Albums => "álbumes",
            EntityKind::Artist => "artista",
            EntityKind::Artists => "artistas",
            EntityKind::Collector => "coleccionista",
            EntityKind::Collectors => "coleccionistas",
            EntityKind::Comment => "comentario",
            EntityKind::Track => "canción",
        }
    }
}

/// What the adapter was doing when a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Create,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Fetch => "obtener",
            Action::Create => "crear",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

/// Classified failures produced at the service adapter boundary.
///
/// The `Display` output is what the reducers surface verbatim in
/// `error`, so the formats here are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The connection could not complete (timeout, DNS, socket, decode)
    #[error("Error de conexión: {0}")]
    Connection(String),

    /// A response arrived with a non-success status
    #[error("Error al {action} {}: {code} {message}", .entity.label())]
    Server {
        action: Action,
        entity: EntityKind,
        code: u16,
        message: String,
    },

    /// Success status with no parsable payload
    #[error("{operation} respuesta vacía")]
    EmptyBody { operation: &'static str },
}

impl Album {
    /// Release year, if the release date is known.
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date.map(|d| d.year())
    }
}

//! Adapter layer: Convert Vinilos DTOs to domain models and back
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! Absent optional collections become empty vectors here, so nothing
//! downstream has to re-check them.

use chrono::{DateTime, NaiveDate};

use super::domain::{
    Album, Artist, ArtistAlbum, Collector, CollectorAlbum, Comment, Performer, Track,
};
use super::dto;

/// Convert an album DTO to the domain model
pub fn to_album(dto: dto::AlbumDto) -> Album {
    Album {
        id: dto.id,
        name: dto.name,
        cover: dto.cover.unwrap_or_default(),
        release_date: dto.release_date.as_deref().and_then(parse_date),
        description: dto.description.unwrap_or_default(),
        genre: dto.genre.unwrap_or_default(),
        record_label: dto.record_label.unwrap_or_default(),
        tracks: collect(dto.tracks, to_track),
        performers: collect(dto.performers, to_performer),
        comments: collect(dto.comments, to_comment),
    }
}

pub fn to_track(dto: dto::TrackDto) -> Track {
    Track {
        id: dto.id,
        name: dto.name,
        duration: dto.duration.unwrap_or_default(),
    }
}

pub fn to_comment(dto: dto::CommentDto) -> Comment {
    Comment {
        id: dto.id,
        description: dto.description.unwrap_or_default(),
        rating: dto.rating.unwrap_or_default(),
    }
}

fn to_performer(dto: dto::PerformerDto) -> Performer {
    Performer {
        id: dto.id,
        name: dto.name,
        image: dto.image.unwrap_or_default(),
        description: dto.description.unwrap_or_default(),
    }
}

/// Convert a musician DTO to the domain artist
pub fn to_artist(dto: dto::MusicianDto) -> Artist {
    Artist {
        id: dto.id,
        name: dto.name,
        image: dto.image.unwrap_or_default(),
        description: dto.description.unwrap_or_default(),
        birth_date: dto.birth_date.as_deref().and_then(parse_date),
        albums: collect(dto.albums, to_album_summary),
    }
}

fn to_album_summary(dto: dto::AlbumSummaryDto) -> ArtistAlbum {
    ArtistAlbum {
        id: dto.id,
        name: dto.name,
        cover: dto.cover.unwrap_or_default(),
        release_date: dto.release_date.as_deref().and_then(parse_date),
        genre: dto.genre.unwrap_or_default(),
    }
}

/// Convert a collector DTO to the domain model
pub fn to_collector(dto: dto::CollectorDto) -> Collector {
    Collector {
        id: dto.id,
        name: dto.name,
        telephone: dto.telephone.unwrap_or_default(),
        email: dto.email.unwrap_or_default(),
        comments: collect(dto.comments, to_comment),
        favorite_performers: collect(dto.favorite_performers, to_performer),
        albums: collect(dto.collector_albums, to_collector_album),
    }
}

fn to_collector_album(dto: dto::CollectorAlbumDto) -> CollectorAlbum {
    CollectorAlbum {
        id: dto.id,
        price: dto.price.unwrap_or_default(),
        status: dto.status.unwrap_or_default(),
        album: dto.album.map(to_album_summary),
    }
}

// ============================================================================
// Domain -> payload
// ============================================================================

/// Build the creation payload for an album.
///
/// The id is not sent; the server assigns it.
pub fn album_payload(album: &Album) -> dto::NewAlbumPayload {
    dto::NewAlbumPayload {
        name: album.name.clone(),
        cover: album.cover.clone(),
        release_date: format_date(album.release_date),
        description: album.description.clone(),
        genre: album.genre.clone(),
        record_label: album.record_label.clone(),
    }
}

pub fn musician_payload(artist: &Artist) -> dto::NewMusicianPayload {
    dto::NewMusicianPayload {
        name: artist.name.clone(),
        image: artist.image.clone(),
        description: artist.description.clone(),
        birth_date: format_date(artist.birth_date),
    }
}

pub fn collector_payload(collector: &Collector) -> dto::NewCollectorPayload {
    dto::NewCollectorPayload {
        name: collector.name.clone(),
        telephone: collector.telephone.clone(),
        email: collector.email.clone(),
    }
}

pub fn comment_payload(comment: &Comment, collector_id: i64) -> dto::NewCommentPayload {
    dto::NewCommentPayload {
        description: comment.description.clone(),
        rating: comment.rating,
        collector: dto::CollectorRef { id: collector_id },
    }
}

pub fn track_payload(track: &Track) -> dto::NewTrackPayload {
    dto::NewTrackPayload {
        name: track.name.clone(),
        duration: track.duration.clone(),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn collect<D, T>(items: Option<Vec<D>>, convert: fn(D) -> T) -> Vec<T> {
    items
        .map(|items| items.into_iter().map(convert).collect())
        .unwrap_or_default()
}

/// Dates are sent as `YYYY-MM-DD`; a missing date is sent empty.
fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Parse an API date: full RFC 3339 timestamps or plain `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

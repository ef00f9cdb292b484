//! Album browsing and editing commands.

use tokio::runtime::Runtime;
use tracing::info;

use super::{Session, date_or_dash, fail_on};
use crate::catalog::{Album, AlbumRepository, Track};
use crate::error::{Error, ResultExt};
use crate::state::{AlbumDetailEvent, AlbumDetailReducer, AlbumListReducer, ListEvent};

/// List all albums
pub fn cmd_albums(rt: &Runtime, session: &Session, refresh: bool) -> anyhow::Result<()> {
    let state = rt.block_on(async {
        let reducer = AlbumListReducer::new(session.repository.clone());
        let event = if refresh {
            ListEvent::Refresh
        } else {
            ListEvent::Load
        };
        reducer.dispatch(event).await;
        reducer.state()
    });
    fail_on(state.error)?;

    if state.items.is_empty() {
        println!("No albums in the catalog.");
        return Ok(());
    }
    for album in &state.items {
        println!("{}", album_line(album));
    }
    println!("\n{} albums", state.items.len());
    Ok(())
}

/// Show one album with its tracks and comments
pub fn cmd_album(rt: &Runtime, session: &Session, id: i64) -> anyhow::Result<()> {
    let state = rt.block_on(async {
        let reducer = AlbumDetailReducer::new(session.repository.clone(), session.collector_id);
        reducer.dispatch(AlbumDetailEvent::LoadById(id)).await;
        reducer.state()
    });
    fail_on(state.error)?;

    let Some(album) = state.album else {
        anyhow::bail!("Album {} not loaded", id);
    };

    println!("{}", album.name);
    println!("{}", "=".repeat(album.name.chars().count()));
    println!("Released: {}", date_or_dash(album.release_date));
    println!("Genre:    {}", album.genre);
    println!("Label:    {}", album.record_label);
    if !album.performers.is_empty() {
        let names: Vec<&str> = album.performers.iter().map(|p| p.name.as_str()).collect();
        println!("Artists:  {}", names.join(", "));
    }
    if !album.description.is_empty() {
        println!("\n{}", album.description);
    }

    println!("\nTracks ({}):", state.tracks.len());
    for (i, track) in state.tracks.iter().enumerate() {
        println!("  {:>2}. {} [{}]", i + 1, track.name, track.duration);
    }

    println!("\nComments ({}):", state.comments.len());
    for comment in &state.comments {
        println!("  {} {}", stars(comment.rating), comment.description);
    }
    Ok(())
}

/// Create a new album
pub fn cmd_create_album(rt: &Runtime, session: &Session, album: &Album) -> anyhow::Result<()> {
    let created = rt
        .block_on(AlbumRepository::create(session.repository.as_ref(), album))
        .with_context(format!("creating \"{}\"", album.name))?;
    info!(id = created.id, "Album created");
    println!("Created album {}: {}", created.id, created.name);
    Ok(())
}

/// Comment on an album through the album detail screen logic
pub fn cmd_comment(
    rt: &Runtime,
    session: &Session,
    album_id: i64,
    text: &str,
    rating: i32,
) -> anyhow::Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(Error::invalid_input(format!("rating must be 1-5, got {}", rating)).into());
    }
    if text.trim().is_empty() {
        return Err(Error::invalid_input("comment text is empty").into());
    }

    let state = rt.block_on(async {
        let reducer = AlbumDetailReducer::new(session.repository.clone(), session.collector_id);
        reducer.dispatch(AlbumDetailEvent::LoadById(album_id)).await;
        if reducer.state().error.is_some() {
            return reducer.state();
        }

        reducer
            .dispatch(AlbumDetailEvent::UpdateText(text.to_string()))
            .await;
        reducer
            .dispatch(AlbumDetailEvent::AddComment {
                text: text.to_string(),
                rating,
            })
            .await;
        reducer.state()
    });
    fail_on(state.error)?;

    println!(
        "Comment added to album {} ({} comments)",
        album_id,
        state.comments.len()
    );
    Ok(())
}

/// Add a track to an album
pub fn cmd_add_track(
    rt: &Runtime,
    session: &Session,
    album_id: i64,
    name: &str,
    duration: &str,
) -> anyhow::Result<()> {
    let track = Track {
        id: 0,
        name: name.to_string(),
        duration: duration.to_string(),
    };
    let created = rt
        .block_on(session.repository.create_track(album_id, &track))
        .with_context(format!("album {}", album_id))?;
    println!(
        "Added track {} to album {}: {} [{}]",
        created.id, album_id, created.name, created.duration
    );
    Ok(())
}

/// One-line summary used by the album listing.
fn album_line(album: &Album) -> String {
    let year = album
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());
    format!("{:>5}  {}  {} ({})", album.id, year, album.name, album.genre)
}

fn stars(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

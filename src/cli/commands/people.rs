//! Artist and collector browsing commands.

use tokio::runtime::Runtime;

use super::{Session, date_or_dash, fail_on};
use crate::catalog::{Artist, ArtistRepository, Collector, CollectorAlbum, CollectorRepository};
use crate::error::ResultExt;
use crate::state::{
    ArtistDetailEvent, ArtistDetailReducer, ArtistListReducer, CollectorDetailEvent,
    CollectorDetailReducer, CollectorListReducer, ListEvent,
};

fn list_event(refresh: bool) -> ListEvent {
    if refresh {
        ListEvent::Refresh
    } else {
        ListEvent::Load
    }
}

/// List all artists
pub fn cmd_artists(rt: &Runtime, session: &Session, refresh: bool) -> anyhow::Result<()> {
    let state = rt.block_on(async {
        let reducer = ArtistListReducer::new(session.repository.clone());
        reducer.dispatch(list_event(refresh)).await;
        reducer.state()
    });
    fail_on(state.error)?;

    for artist in &state.items {
        println!(
            "{:>5}  {}  {}",
            artist.id,
            date_or_dash(artist.birth_date),
            artist.name
        );
    }
    println!("\n{} artists", state.items.len());
    Ok(())
}

/// Show one artist with their albums
pub fn cmd_artist(rt: &Runtime, session: &Session, id: i64) -> anyhow::Result<()> {
    let state = rt.block_on(async {
        let reducer = ArtistDetailReducer::new(session.repository.clone());
        reducer.dispatch(ArtistDetailEvent::LoadById(id)).await;
        reducer.state()
    });
    fail_on(state.error)?;

    let Some(artist) = state.artist else {
        anyhow::bail!("Artist {} not loaded", id);
    };

    println!("{}", artist.name);
    println!("Born: {}", date_or_dash(artist.birth_date));
    if !artist.description.is_empty() {
        println!("\n{}", artist.description);
    }
    println!("\nAlbums ({}):", state.albums.len());
    for album in &state.albums {
        println!("  {:>5}  {}  {}", album.id, date_or_dash(album.release_date), album.name);
    }
    Ok(())
}

/// Register a new musician
pub fn cmd_create_artist(rt: &Runtime, session: &Session, artist: &Artist) -> anyhow::Result<()> {
    let created = rt
        .block_on(ArtistRepository::create(session.repository.as_ref(), artist))
        .with_context(format!("creating \"{}\"", artist.name))?;
    println!("Created artist {}: {}", created.id, created.name);
    Ok(())
}

/// List all collectors
pub fn cmd_collectors(rt: &Runtime, session: &Session, refresh: bool) -> anyhow::Result<()> {
    let state = rt.block_on(async {
        let reducer = CollectorListReducer::new(session.repository.clone());
        reducer.dispatch(list_event(refresh)).await;
        reducer.state()
    });
    fail_on(state.error)?;

    for collector in &state.items {
        println!("{:>5}  {}  <{}>", collector.id, collector.name, collector.email);
    }
    println!("\n{} collectors", state.items.len());
    Ok(())
}

/// Show one collector with their collection
pub fn cmd_collector(rt: &Runtime, session: &Session, id: i64) -> anyhow::Result<()> {
    let state = rt.block_on(async {
        let reducer = CollectorDetailReducer::new(session.repository.clone());
        reducer.dispatch(CollectorDetailEvent::LoadById(id)).await;
        reducer.state()
    });
    fail_on(state.error)?;

    let Some(collector) = state.collector else {
        anyhow::bail!("Collector {} not loaded", id);
    };

    println!("{}", collector.name);
    println!("Phone: {}", collector.telephone);
    println!("Email: {}", collector.email);

    println!("\nCollection ({}):", state.albums.len());
    for entry in &state.albums {
        println!("  {}", collection_line(entry));
    }

    if !state.favorite_performers.is_empty() {
        println!("\nFavorite performers:");
        for performer in &state.favorite_performers {
            println!("  {}", performer.name);
        }
    }
    Ok(())
}

/// Register a new collector
pub fn cmd_create_collector(
    rt: &Runtime,
    session: &Session,
    collector: &Collector,
) -> anyhow::Result<()> {
    let created = rt
        .block_on(CollectorRepository::create(
            session.repository.as_ref(),
            collector,
        ))
        .with_context(format!("creating \"{}\"", collector.name))?;
    println!("Created collector {}: {}", created.id, created.name);
    Ok(())
}

fn collection_line(entry: &CollectorAlbum) -> String {
    let name = entry
        .album
        .as_ref()
        .map(|a| a.name.as_str())
        .unwrap_or("(unknown album)");
    format!("{} - ${} [{}]", name, entry.price, entry.status)
}

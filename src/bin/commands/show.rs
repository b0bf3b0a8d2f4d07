use super::utils::format_duration;
use asynccloud::{Playlist, SearchItem, SoundCloudClient, Track, User};

pub async fn handle_resolve(
    client: &SoundCloudClient,
    url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match client.resolve(url).await? {
        Some(SearchItem::Track(track)) => print_track(&track),
        Some(SearchItem::User(user)) => print_user(&user),
        Some(SearchItem::Playlist(playlist)) => print_playlist(&playlist),
        None => println!("Nothing found at {url}"),
    }
    Ok(())
}

pub async fn handle_track(
    client: &SoundCloudClient,
    id: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    match client.get_track(id).await? {
        Some(track) => print_track(&track),
        None => println!("No track with id {id}"),
    }
    Ok(())
}

pub async fn handle_user(
    client: &SoundCloudClient,
    user: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let found = match user.parse::<u64>() {
        Ok(id) => client.get_user(id).await?,
        Err(_) => client.get_user_by_username(user).await?,
    };
    match found {
        Some(user) => print_user(&user),
        None => println!("No user '{user}'"),
    }
    Ok(())
}

pub fn print_track(track: &Track) {
    println!("🎵 {} [{}]", track.title, format_duration(track.duration));
    println!("   by {} ({})", track.user.username, track.user.permalink_url);
    println!("   id {}  {}", track.id, track.permalink_url);
    if let Some(plays) = track.playback_count {
        println!("   {plays} plays");
    }
    if let Some(genre) = track.genre.as_deref().filter(|g| !g.is_empty()) {
        println!("   genre: {genre}");
    }
}

pub fn print_user(user: &User) {
    println!("👤 {} ({})", user.username, user.permalink_url);
    println!("   id {}  {}", user.id, user.urn);
    if let Some(followers) = user.followers_count {
        println!("   {followers} followers");
    }
    if let Some(tracks) = user.track_count {
        println!("   {tracks} tracks");
    }
}

pub fn print_playlist(playlist: &Playlist) {
    let kind = if playlist.is_album { "💿" } else { "📃" };
    println!("{kind} {} ({} tracks)", playlist.title, playlist.track_count);
    println!("   by {}", playlist.user.username);
    println!("   id {}  {}", playlist.id, playlist.permalink_url);
}

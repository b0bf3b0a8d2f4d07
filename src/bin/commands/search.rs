use super::show::{print_playlist, print_track, print_user};
use super::SearchKind;
use asynccloud::{AsyncPaginatedIterator, Params, SearchItem, SoundCloudClient};

/// Largest page SoundCloud serves
const MAX_PAGE_SIZE: usize = 200;

fn page_params(limit: usize) -> Params {
    Params::new().limit(limit.clamp(1, MAX_PAGE_SIZE) as u32)
}

pub async fn handle_search(
    client: &SoundCloudClient,
    query: &str,
    kind: SearchKind,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = page_params(limit);
    let mut shown = 0;

    match kind {
        SearchKind::All => {
            for item in client.search(query, params).take(limit).await? {
                match item {
                    SearchItem::Track(track) => print_track(&track),
                    SearchItem::User(user) => print_user(&user),
                    SearchItem::Playlist(playlist) => print_playlist(&playlist),
                }
                shown += 1;
            }
        }
        SearchKind::Tracks => {
            for track in client.search_tracks(query, params).take(limit).await? {
                print_track(&track);
                shown += 1;
            }
        }
        SearchKind::Users => {
            for user in client.search_users(query, params).take(limit).await? {
                print_user(&user);
                shown += 1;
            }
        }
        SearchKind::Albums => {
            for album in client.search_albums(query, params).take(limit).await? {
                print_playlist(&album);
                shown += 1;
            }
        }
        SearchKind::Playlists => {
            for playlist in client.search_playlists(query, params).take(limit).await? {
                print_playlist(&playlist);
                shown += 1;
            }
        }
    }

    if shown == 0 {
        println!("No results for '{query}'");
    }
    Ok(())
}

pub async fn handle_user_tracks(
    client: &SoundCloudClient,
    user_id: u64,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracks = client.get_user_tracks(user_id, page_params(limit));
    let mut shown = 0;
    while shown < limit {
        let Some(track) = tracks.next().await? else {
            break;
        };
        print_track(&track);
        shown += 1;
    }

    if shown == 0 {
        println!("No tracks for user {user_id}");
    } else {
        log::debug!("Listed {shown} tracks over {} pages", tracks.current_page());
    }
    Ok(())
}

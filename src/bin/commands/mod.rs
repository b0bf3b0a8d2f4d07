pub mod comments;
pub mod search;
pub mod show;
pub mod utils;

use asynccloud::{SessionPersistence, SoundCloudClient};
use clap::{Subcommand, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKind {
    /// Users, tracks and playlists mixed
    All,
    Tracks,
    Users,
    Albums,
    /// Playlists that are not albums
    Playlists,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the client id in use and save it for later runs
    ///
    /// Usage examples:
    /// # Scrape a fresh client id, ignoring the saved one
    /// asynccloud client-id --refresh
    ClientId {
        /// Scrape a new client id even when one is saved
        #[arg(long)]
        refresh: bool,
    },

    /// Show whatever a soundcloud.com URL points to
    ///
    /// Usage examples:
    /// asynccloud resolve https://soundcloud.com/forss/flickermood
    Resolve {
        /// Full soundcloud.com URL
        url: String,
    },

    /// Show a track
    Track {
        /// Track id
        id: u64,
    },

    /// Show a user, by numeric id or by permalink
    ///
    /// Usage examples:
    /// asynccloud user 3207
    /// asynccloud user forss
    User {
        /// User id or permalink
        user: String,
    },

    /// Search SoundCloud
    ///
    /// Usage examples:
    /// # First 10 tracks about the moon
    /// asynccloud search moon --kind tracks --limit 10
    Search {
        /// Search query
        query: String,

        /// What to search for
        #[arg(long, value_enum, default_value = "all")]
        kind: SearchKind,

        /// Maximum number of results to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// List comments on a track
    ///
    /// Usage examples:
    /// # Comments with like counts (needs an auth token)
    /// asynccloud comments 1032303631 --interactions --limit 30
    Comments {
        /// Track id
        track_id: u64,

        /// Include like counts and likes by you and by the creator
        #[arg(long)]
        interactions: bool,

        /// Maximum number of comments to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// List tracks uploaded by a user
    UserTracks {
        /// User id
        id: u64,

        /// Maximum number of tracks to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Check whether the client id and auth token are accepted
    Validate,
}

pub async fn execute_command(
    command: Commands,
    client: &SoundCloudClient,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::ClientId { refresh } => {
            if refresh {
                let client_id = asynccloud::bootstrap::generate_client_id(client).await?;
                client.set_client_id(client_id);
                SessionPersistence::save_session(&client.get_session())?;
            }
            println!("{}", client.client_id());
            Ok(())
        }
        Commands::Resolve { url } => show::handle_resolve(client, &url).await,
        Commands::Track { id } => show::handle_track(client, id).await,
        Commands::User { user } => show::handle_user(client, &user).await,
        Commands::Search { query, kind, limit } => {
            search::handle_search(client, &query, kind, limit).await
        }
        Commands::Comments {
            track_id,
            interactions,
            limit,
        } => comments::handle_comments(client, track_id, interactions, limit).await,
        Commands::UserTracks { id, limit } => search::handle_user_tracks(client, id, limit).await,
        Commands::Validate => utils::handle_validate(client).await,
    }
}

use asynccloud::{ClientConfig, SessionPersistence, SoundCloudClient};

/// Build a client, reusing the saved client id when there is one.
///
/// 1. An explicit client id (flag or environment) wins
/// 2. Otherwise the saved session's client id is used
/// 3. Otherwise a client id is scraped from soundcloud.com and saved
pub async fn load_or_create_client(
    client_id: Option<String>,
    auth_token: Option<String>,
) -> Result<SoundCloudClient, Box<dyn std::error::Error>> {
    let saved = match SessionPersistence::load_session() {
        Ok(saved) => saved,
        Err(e) => {
            log::warn!("Ignoring unreadable session file: {e}");
            let _ = SessionPersistence::remove_session();
            None
        }
    };

    let mut config = ClientConfig::new();
    config.client_id = client_id.or_else(|| saved.as_ref().map(|s| s.client_id.clone()));
    config.auth_token = auth_token.or_else(|| saved.and_then(|s| s.auth_token));
    let scraped = config.client_id.is_none();

    let http_client = http_client::native::NativeClient::new();
    let client = SoundCloudClient::connect(Box::new(http_client), config).await?;

    if scraped {
        log::debug!("Saving scraped client id");
        if let Err(e) = SessionPersistence::save_session(&client.get_session()) {
            eprintln!("⚠️  Warning: Failed to save session: {e}");
        }
    }

    Ok(client)
}

pub async fn handle_validate(client: &SoundCloudClient) -> Result<(), Box<dyn std::error::Error>> {
    let client_id_ok = client.is_client_id_valid().await?;
    println!(
        "{} client id",
        if client_id_ok { "✅ valid" } else { "❌ rejected" }
    );

    if client.auth_state().is_authenticated() {
        let token_ok = client.is_auth_token_valid().await?;
        println!(
            "{} auth token",
            if token_ok { "✅ valid" } else { "❌ rejected" }
        );
    } else {
        println!("➖ no auth token set");
    }
    Ok(())
}

/// Format milliseconds as `m:ss` or `h:mm:ss`
pub fn format_duration(millis: u64) -> String {
    let seconds = millis / 1000;
    let (hours, minutes, seconds) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

use asynccloud::{AsyncPaginatedIterator, BasicComment, Params, SoundCloudClient};

fn print_comment(comment: &BasicComment) {
    let at = comment
        .timestamp
        .map(super::utils::format_duration)
        .unwrap_or_else(|| "-".to_string());
    println!("💬 [{at}] {}: {}", comment.user.username, comment.body);
}

pub async fn handle_comments(
    client: &SoundCloudClient,
    track_id: u64,
    interactions: bool,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = Params::new().limit(limit.clamp(1, 200) as u32);

    if interactions {
        if !client.auth_state().is_authenticated() {
            eprintln!("⚠️  --interactions needs an auth token (--auth-token or SOUNDCLOUD_AUTH_TOKEN)");
        }
        let mut comments = client.get_track_comments_with_interactions(track_id, 0, params);
        for entry in comments.take(limit).await? {
            print_comment(&entry.comment);
            let mut flags = Vec::new();
            if entry.liked_by_user {
                flags.push("liked by you");
            }
            if entry.liked_by_creator {
                flags.push("liked by creator");
            }
            if flags.is_empty() {
                println!("   ❤️  {}", entry.likes);
            } else {
                println!("   ❤️  {} ({})", entry.likes, flags.join(", "));
            }
        }
        return Ok(());
    }

    let mut comments = client.get_track_comments(track_id, 0, params);
    for comment in comments.take(limit).await? {
        print_comment(&comment);
    }
    Ok(())
}

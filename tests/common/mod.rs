#![allow(dead_code)]
use asynccloud::test_utils::ScriptedTransport;
use asynccloud::SoundCloudClient;
use serde_json::{json, Value};

pub const CLIENT_ID: &str = "test-client-id";
pub const API: &str = "https://api-v2.soundcloud.com";

/// A client wired to a scripted transport, plus the handle for assertions
pub fn scripted_client() -> (SoundCloudClient, ScriptedTransport) {
    let transport = ScriptedTransport::new();
    let client = SoundCloudClient::new(Box::new(transport.clone()), CLIENT_ID);
    (client, transport)
}

pub fn user_json(id: u64, username: &str) -> Value {
    json!({
        "id": id,
        "urn": format!("soundcloud:users:{id}"),
        "username": username,
        "permalink": username,
        "permalink_url": format!("https://soundcloud.com/{username}"),
        "kind": "user",
        "followers_count": 10
    })
}

pub fn track_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "urn": format!("soundcloud:tracks:{id}"),
        "kind": "track",
        "title": title,
        "permalink_url": format!("https://soundcloud.com/artist/{id}"),
        "duration": 180000,
        "waveform_url": "https://wave.sndcdn.com/x_m.json",
        "user_id": 77,
        "user": user_json(77, "artist")
    })
}

pub fn playlist_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "urn": format!("soundcloud:playlists:{id}"),
        "kind": "playlist",
        "title": title,
        "permalink_url": format!("https://soundcloud.com/artist/sets/{id}"),
        "track_count": 1,
        "user_id": 77,
        "user": user_json(77, "artist"),
        "tracks": [{"id": 1, "kind": "track"}]
    })
}

pub fn comment_json(id: u64) -> Value {
    json!({
        "id": id,
        "kind": "comment",
        "body": format!("comment {id}"),
        "created_at": "2023-01-01T00:00:00Z",
        "timestamp": 1000,
        "track_id": 5,
        "user_id": 2,
        "user": user_json(2, "listener"),
        "self": {"urn": format!("soundcloud:comments:{id}")}
    })
}

/// A collection page, optionally pointing at the next one
pub fn page(items: Vec<Value>, next_href: Option<&str>) -> Value {
    match next_href {
        Some(next) => json!({"collection": items, "next_href": next}),
        None => json!({"collection": items, "next_href": null}),
    }
}

pub fn tracks(ids: std::ops::RangeInclusive<u64>) -> Vec<Value> {
    ids.map(|id| track_json(id, &format!("Track {id}"))).collect()
}

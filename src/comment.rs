use crate::user::BasicUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `self` reference every comment carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfReference {
    pub urn: String,
}

/// A comment as listed under a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicComment {
    pub id: u64,
    pub kind: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// Position in the track, in milliseconds.
    pub timestamp: Option<u64>,
    pub track_id: u64,
    pub user_id: u64,
    pub user: BasicUser,
    #[serde(rename = "self")]
    pub self_reference: SelfReference,
}

impl BasicComment {
    /// The comment's urn, used to correlate it with GraphQL interaction rows.
    pub fn urn(&self) -> &str {
        &self.self_reference.urn
    }
}

/// The track a user comment was left on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentTrack {
    pub id: u64,
    pub kind: String,
    pub title: Option<String>,
    pub permalink_url: Option<String>,
    pub user_id: Option<u64>,
}

/// A comment as listed under a user, carrying the track it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(flatten)]
    pub comment: BasicComment,
    pub track: CommentTrack,
}

crate::impl_decode!(BasicComment, Comment);

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::Decode;
    use serde_json::{json, Value};

    pub(crate) fn comment_json(id: u64) -> Value {
        json!({
            "id": id,
            "kind": "comment",
            "body": format!("comment {id}"),
            "created_at": "2023-01-01T00:00:00Z",
            "timestamp": 1234,
            "track_id": 1,
            "user_id": 2,
            "user": {
                "id": 2,
                "urn": "soundcloud:users:2",
                "username": "listener",
                "permalink": "listener",
                "permalink_url": "https://soundcloud.com/listener",
                "kind": "user"
            },
            "self": {"urn": format!("soundcloud:comments:{id}")}
        })
    }

    #[test]
    fn test_basic_comment_urn() {
        let comment = BasicComment::decode(&comment_json(5)).unwrap();
        assert_eq!(comment.urn(), "soundcloud:comments:5");
        assert_eq!(comment.body, "comment 5");
    }

    #[test]
    fn test_user_comment_requires_track() {
        assert!(Comment::decode(&comment_json(5)).is_err());

        let mut value = comment_json(6);
        value["track"] = json!({"id": 1, "kind": "track", "title": "Song"});
        let comment = Comment::decode(&value).unwrap();
        assert_eq!(comment.track.title.as_deref(), Some("Song"));
        assert_eq!(comment.comment.urn(), "soundcloud:comments:6");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user as embedded in other resources (track uploader, comment author, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicUser {
    pub id: u64,
    pub urn: String,
    pub username: String,
    pub permalink: String,
    pub permalink_url: String,
    pub kind: String,
    pub avatar_url: Option<String>,
    pub full_name: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// A full user profile.
///
/// Returned by [`SoundCloudClient::get_user`](crate::SoundCloudClient::get_user),
/// [`SoundCloudClient::get_me`](crate::SoundCloudClient::get_me) and every
/// user collection (followers, likers, reposters, search results).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub urn: String,
    pub username: String,
    pub permalink: String,
    pub permalink_url: String,
    pub kind: String,
    pub avatar_url: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    #[serde(default)]
    pub verified: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub followers_count: Option<u64>,
    pub followings_count: Option<u64>,
    pub track_count: Option<u64>,
    pub playlist_count: Option<u64>,
    pub likes_count: Option<u64>,
    pub reposts_count: Option<u64>,
    pub comments_count: Option<u64>,
}

impl User {
    /// Reduce a full profile to its embedded form.
    pub fn to_basic(&self) -> BasicUser {
        BasicUser {
            id: self.id,
            urn: self.urn.clone(),
            username: self.username.clone(),
            permalink: self.permalink.clone(),
            permalink_url: self.permalink_url.clone(),
            kind: self.kind.clone(),
            avatar_url: self.avatar_url.clone(),
            full_name: self.full_name.clone(),
            city: self.city.clone(),
            country_code: self.country_code.clone(),
            verified: self.verified,
        }
    }
}

/// An email address attached to the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmail {
    pub address: String,
    pub confirmed: bool,
    pub primary: bool,
    pub id: Option<u64>,
    pub urn: Option<String>,
    pub user_id: Option<String>,
}

/// A link from a user's profile (website, social network, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebProfile {
    pub url: String,
    pub network: String,
    pub title: String,
    pub username: Option<String>,
    pub kind: Option<String>,
}

crate::impl_decode!(BasicUser, User, UserEmail, WebProfile);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Decode;
    use serde_json::json;

    #[test]
    fn test_user_decodes_with_sparse_fields() {
        let value = json!({
            "id": 1,
            "urn": "soundcloud:users:1",
            "username": "someone",
            "permalink": "someone",
            "permalink_url": "https://soundcloud.com/someone",
            "kind": "user",
            "followers_count": 12,
            "created_at": "2015-03-01T10:00:00Z"
        });

        let user = User::decode(&value).unwrap();
        assert_eq!(user.username, "someone");
        assert_eq!(user.followers_count, Some(12));
        assert!(!user.verified);
        assert!(user.created_at.is_some());
        assert_eq!(user.to_basic().urn, "soundcloud:users:1");
    }

    #[test]
    fn test_user_requires_username() {
        let value = json!({"id": 1, "kind": "track", "title": "not a user"});
        assert!(User::decode(&value).is_err());
    }
}

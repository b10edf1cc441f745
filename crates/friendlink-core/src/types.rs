//! Wire types for the add-friend exchange.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /add_friend`: `{"friend_id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddFriendRequest {
    pub friend_id: String,
}

impl AddFriendRequest {
    pub fn new(friend_id: impl Into<String>) -> Self {
        Self {
            friend_id: friend_id.into(),
        }
    }
}

/// Friend record returned by the backend on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub spotify_user_id: Option<String>,
}

impl Friend {
    /// Best human-readable name: display name, then Spotify ID. Empty strings
    /// count as missing.
    pub fn label(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.spotify_user_id.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Response body of `POST /add_friend`. Both shapes share one struct since the
/// backend may send either field regardless of status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddFriendResponse {
    #[serde(default)]
    pub friend: Option<Friend>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AddFriendResponse {
    /// Decode a reply body leniently. Only non-JSON is an error; a field of an
    /// unexpected type (a numeric ID, a nested error object) counts as absent.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        let data: Value = serde_json::from_str(body)?;
        let friend = data.get("friend").filter(|f| f.is_object()).map(|f| Friend {
            display_name: string_field(f, "display_name"),
            spotify_user_id: string_field(f, "spotify_user_id"),
        });
        Ok(Self {
            friend,
            error: string_field(&data, "error"),
        })
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(String::from)
}

/// What a transport hands back before the body is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx, same as `Response.ok` in the browser.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

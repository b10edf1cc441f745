//! Submission error taxonomy. Every variant is recovered at the form boundary
//! and rendered as a failure outcome; none escape to the caller.

use thiserror::Error;

/// Fixed message shown when no identifier can be pulled out of the input.
pub const PARSE_ERROR_MESSAGE: &str = "Could not parse a Spotify user ID from that URL.";

/// Used when a non-success response carries no `error` field.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum SubmitError {
    /// No identifier in the supplied text. No request was made.
    #[error("{}", PARSE_ERROR_MESSAGE)]
    Unparseable,

    /// Non-success status; carries the backend's `error` field or the fallback.
    #[error("{0}")]
    Backend(String),

    /// Response body was not the JSON we expected.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Success status without a friend record.
    #[error("response is missing a friend record")]
    MissingFriend,

    /// Connection refused, timeout, body read failure.
    #[error("request failed: {0}")]
    Transport(String),
}

impl SubmitError {
    /// Text for the feedback line. The parse error is shown as-is; everything
    /// that happened after a request was attempted gets the error prefix.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Unparseable => PARSE_ERROR_MESSAGE.to_string(),
            other => format!("Error!!⚠️ {}", other),
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for SubmitError {
    fn from(e: reqwest::Error) -> Self {
        SubmitError::Transport(e.to_string())
    }
}

//! Identifier extraction — pulls a Spotify user ID out of a pasted profile URL.
//!
//! `https://open.spotify.com/user/alice123?si=xyz` → `alice123`.

use tracing::debug;
use url::Url;

/// Path segment that precedes the identifier.
pub const USER_SEGMENT: &str = "user";

/// Extract the user identifier from raw text.
///
/// Trims the input, parses it as an absolute URL, splits the path on `/` and
/// returns the segment after the first one equal to [`USER_SEGMENT`]. The
/// segment comes back as it appears in the path, percent-encoding included.
/// An empty following segment (`.../user/`) counts as no identifier.
pub fn extract_friend_id(raw: &str) -> Option<String> {
    let url = match Url::parse(raw.trim()) {
        Ok(url) => url,
        Err(e) => {
            debug!("Not a URL ({}): {:?}", e, raw);
            return None;
        }
    };

    let mut segments = url.path().split('/');
    segments.find(|s| *s == USER_SEGMENT)?;
    segments
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

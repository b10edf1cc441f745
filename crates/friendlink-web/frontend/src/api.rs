//! HTTP fetch calls to the dev server, which rewrites them to the backend.

use gloo_net::http::Request;
use tracing::debug;
use web_sys::RequestCredentials;

use friendlink_core::client::FriendApi;
use friendlink_core::config::ADD_FRIEND_PATH;
use friendlink_core::error::SubmitError;
use friendlink_core::types::{AddFriendRequest, RawReply};

/// Same-origin fetch with the browser's session cookie.
pub struct BrowserClient;

impl FriendApi for BrowserClient {
    async fn post_add_friend(&self, request: &AddFriendRequest) -> Result<RawReply, SubmitError> {
        let resp = Request::post(ADD_FRIEND_PATH)
            .credentials(RequestCredentials::Include)
            .header("Content-Type", "application/json")
            .json(request)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        debug!("POST {} -> {}", ADD_FRIEND_PATH, status);

        Ok(RawReply { status, body })
    }
}

fn transport(e: gloo_net::Error) -> SubmitError {
    SubmitError::Transport(e.to_string())
}

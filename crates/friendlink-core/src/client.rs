//! Transport seam for the add-friend call.
//!
//! A [`FriendApi`] performs exactly one HTTP exchange and returns the status
//! and body untouched; interpretation lives in [`crate::form`]. The terminal
//! frontend uses [`HttpClient`] (reqwest), the browser frontend brings its own.

use crate::error::SubmitError;
use crate::types::{AddFriendRequest, RawReply};

/// One `POST /add_friend` exchange.
#[allow(async_fn_in_trait)]
pub trait FriendApi {
    async fn post_add_friend(&self, request: &AddFriendRequest) -> Result<RawReply, SubmitError>;
}

#[cfg(feature = "http")]
pub use self::http::HttpClient;

#[cfg(feature = "http")]
mod http {
    use anyhow::Result;
    use reqwest::header::{CONTENT_TYPE, COOKIE};
    use tracing::debug;
    use url::Url;

    use super::FriendApi;
    use crate::config::Config;
    use crate::error::SubmitError;
    use crate::types::{AddFriendRequest, RawReply};

    /// reqwest-backed client. Cheap to clone; clones share one connection pool.
    #[derive(Debug, Clone)]
    pub struct HttpClient {
        http: reqwest::Client,
        endpoint: Url,
        session_cookie: Option<String>,
    }

    impl HttpClient {
        pub fn from_config(config: &Config) -> Result<Self> {
            let mut builder = reqwest::Client::builder().user_agent("friendlink/0.1");
            if let Some(secs) = config.request_timeout_seconds {
                builder = builder.timeout(std::time::Duration::from_secs(secs));
            }

            Ok(Self {
                http: builder.build()?,
                endpoint: config.endpoint()?,
                session_cookie: config.session_cookie.clone(),
            })
        }

        pub fn endpoint(&self) -> &Url {
            &self.endpoint
        }
    }

    impl FriendApi for HttpClient {
        async fn post_add_friend(
            &self,
            request: &AddFriendRequest,
        ) -> Result<RawReply, SubmitError> {
            let mut req = self
                .http
                .post(self.endpoint.clone())
                .header(CONTENT_TYPE, "application/json")
                .json(request);
            if let Some(ref cookie) = self.session_cookie {
                req = req.header(COOKIE, cookie);
            }

            let resp = req.send().await?;
            let status = resp.status().as_u16();
            let body = resp.text().await?;
            debug!("POST {} -> {} ({} bytes)", self.endpoint, status, body.len());

            Ok(RawReply { status, body })
        }
    }

}

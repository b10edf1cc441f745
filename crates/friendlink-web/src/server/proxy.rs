//! Development rewrites — forwards each configured source path to its backend
//! destination and relays the answer.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderName, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::json;
use tracing::{info, warn};

use friendlink_core::config::Rewrite;

use super::AppState;

/// Request headers passed through to the backend.
const FORWARDED_REQUEST_HEADERS: [HeaderName; 4] = [
    header::CONTENT_TYPE,
    header::ACCEPT,
    header::COOKIE,
    header::AUTHORIZATION,
];

/// Response headers passed back to the client.
/// The body is relayed as raw bytes, so its encoding must travel with it.
const RELAYED_RESPONSE_HEADERS: [HeaderName; 3] = [
    header::CONTENT_TYPE,
    header::CONTENT_ENCODING,
    header::SET_COOKIE,
];

/// One route per distinct rewrite source, any method.
pub fn routes(rewrites: &[Rewrite]) -> Router<Arc<AppState>> {
    let mut router = Router::new();
    let mut seen = HashSet::new();
    for rewrite in rewrites {
        if !seen.insert(rewrite.source.as_str()) {
            warn!("Duplicate rewrite source {}, first rule wins", rewrite.source);
            continue;
        }
        let destination = rewrite.destination.clone();
        router = router.route(
            &rewrite.source,
            any(
                move |State(state): State<Arc<AppState>>,
                      method: Method,
                      uri: Uri,
                      headers: HeaderMap,
                      body: Bytes| {
                    let destination = destination.clone();
                    async move { forward(&state, &destination, method, uri, headers, body).await }
                },
            ),
        );
    }
    router
}

async fn forward(
    state: &AppState,
    destination: &str,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Query strings ride along, as with any rewrite
    let mut target = destination.to_string();
    if let Some(query) = uri.query() {
        target.push(if target.contains('?') { '&' } else { '?' });
        target.push_str(query);
    }

    info!("{} {} -> {}", method, uri.path(), target);

    let mut req = state.http.request(method, &target).body(body);
    for name in &FORWARDED_REQUEST_HEADERS {
        for value in headers.get_all(name) {
            req = req.header(name.clone(), value.clone());
        }
    }

    let resp = match req.send().await {
        Ok(resp) => resp,
        Err(e) => return bad_gateway(&target, &e),
    };

    let status = resp.status();
    let mut relayed = HeaderMap::new();
    for name in &RELAYED_RESPONSE_HEADERS {
        for value in resp.headers().get_all(name) {
            relayed.append(name.clone(), value.clone());
        }
    }

    match resp.bytes().await {
        Ok(bytes) => (status, relayed, bytes).into_response(),
        Err(e) => bad_gateway(&target, &e),
    }
}

fn bad_gateway(target: &str, e: &reqwest::Error) -> Response {
    warn!("Upstream {} failed: {}", target, e);
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({"error": format!("upstream unavailable: {}", e)})),
    )
        .into_response()
}

//! The add-friend form as an explicit state machine.
//!
//! State is `{input, outcome, in_flight}`, mutated only by edits, submits and
//! completions. A submit is split in three so a UI loop can keep rendering
//! while the request is out:
//!
//! 1. [`FriendForm::submit`] clears the outcome, extracts the identifier and,
//!    if there is one, raises the in-flight flag and hands back a
//!    [`Submission`].
//! 2. [`Submission::send`] performs the exchange on any task and yields a
//!    [`Completion`].
//! 3. [`FriendForm::complete`] applies the outcome.
//!
//! The in-flight flag is owned by an [`InFlightGuard`] that travels with the
//! submission and then the completion. Whichever is dropped last lowers the
//! flag, so it is cleared on every exit path, including a cancelled task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::FriendApi;
use crate::error::{SubmitError, UNKNOWN_ERROR_MESSAGE};
use crate::extract::extract_friend_id;
use crate::types::{AddFriendRequest, AddFriendResponse, RawReply};

/// Submit button caption while idle.
pub const SUBMIT_LABEL: &str = "Add Friend";
/// Submit button caption while a request is out.
pub const SUBMITTING_LABEL: &str = "Adding…";

/// Single-slot feedback state. Success and failure can't coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Idle,
    Success(String),
    Failure(String),
}

impl Outcome {
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Idle => None,
            Outcome::Success(msg) | Outcome::Failure(msg) => Some(msg),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    fn from_result(result: Result<String, SubmitError>) -> Self {
        match result {
            Ok(msg) => Outcome::Success(msg),
            Err(e) => Outcome::Failure(e.user_message()),
        }
    }
}

/// Lowers the in-flight flag when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn raise(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self {
            flag: Arc::clone(flag),
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// A request that has been started but not sent.
#[derive(Debug)]
#[must_use = "dropping a Submission cancels it"]
pub struct Submission {
    friend_id: String,
    guard: InFlightGuard,
}

impl Submission {
    pub fn friend_id(&self) -> &str {
        &self.friend_id
    }

    /// Run the exchange. Never fails: every error becomes a failure outcome.
    pub async fn send<C: FriendApi>(self, client: &C) -> Completion {
        let request = AddFriendRequest::new(self.friend_id.clone());
        info!("Adding friend {}", self.friend_id);

        let result = match client.post_add_friend(&request).await {
            Ok(reply) => interpret_reply(&reply, &self.friend_id),
            Err(e) => Err(e),
        };
        match &result {
            Ok(msg) => info!("{}", msg),
            Err(e) => warn!("Add friend {} failed: {}", self.friend_id, e),
        }

        Completion {
            outcome: Outcome::from_result(result),
            _guard: self.guard,
        }
    }
}

/// The result of a finished exchange, waiting to be applied to the form.
#[derive(Debug)]
#[must_use = "apply with FriendForm::complete"]
pub struct Completion {
    outcome: Outcome,
    _guard: InFlightGuard,
}

impl Completion {
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

/// Turn a raw reply into the success message or a submit error.
///
/// The body is decoded before the status is looked at, so a non-JSON error
/// page is reported as a decode failure. Fields of the wrong type are ignored.
pub fn interpret_reply(reply: &RawReply, friend_id: &str) -> Result<String, SubmitError> {
    let data = AddFriendResponse::from_body(&reply.body)?;

    if !reply.is_success() {
        let msg = data
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
        return Err(SubmitError::Backend(msg));
    }

    let friend = data.friend.ok_or(SubmitError::MissingFriend)?;
    let name = friend.label().unwrap_or(friend_id);
    Ok(format!("✅ Friend added: {}", name))
}

/// Form state: input text, feedback outcome, in-flight flag.
#[derive(Debug, Default)]
pub struct FriendForm {
    input: String,
    outcome: Outcome,
    in_flight: Arc<AtomicBool>,
}

impl FriendForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Input and submit controls are disabled while a request is out.
    pub fn controls_enabled(&self) -> bool {
        !self.is_in_flight()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_in_flight() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Replace the input text and clear stale feedback. Ignored while in flight.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.is_in_flight() {
            debug!("Input edit ignored while in flight");
            return;
        }
        self.input = text.into();
        self.outcome = Outcome::Idle;
    }

    pub fn push_char(&mut self, ch: char) {
        let mut text = self.input.clone();
        text.push(ch);
        self.set_input(text);
    }

    pub fn pop_char(&mut self) {
        let mut text = self.input.clone();
        text.pop();
        self.set_input(text);
    }

    pub fn clear_input(&mut self) {
        self.set_input(String::new());
    }

    /// Start a submission from the current input.
    ///
    /// Returns `None` when a request is already out (nothing changes) or when
    /// no identifier can be extracted (outcome becomes the parse failure).
    pub fn submit(&mut self) -> Option<Submission> {
        if self.is_in_flight() {
            debug!("Submit ignored while in flight");
            return None;
        }
        self.outcome = Outcome::Idle;

        let Some(friend_id) = extract_friend_id(&self.input) else {
            self.outcome = Outcome::from_result(Err(SubmitError::Unparseable));
            return None;
        };

        Some(Submission {
            friend_id,
            guard: InFlightGuard::raise(&self.in_flight),
        })
    }

    /// Apply a finished exchange. Lowers the in-flight flag.
    pub fn complete(&mut self, completion: Completion) {
        self.outcome = completion.outcome;
    }

    /// Submit, send and complete in one call, for callers that can wait.
    pub async fn submit_with<C: FriendApi>(&mut self, client: &C) -> &Outcome {
        if let Some(submission) = self.submit() {
            let completion = submission.send(client).await;
            self.complete(completion);
        }
        &self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PARSE_ERROR_MESSAGE;
    use std::sync::Mutex;

    /// Records requests and replays a canned reply.
    struct MockApi {
        reply: Result<RawReply, String>,
        requests: Mutex<Vec<AddFriendRequest>>,
    }

    impl MockApi {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(RawReply::new(status, body)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                reply: Err(msg.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<AddFriendRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl FriendApi for MockApi {
        async fn post_add_friend(
            &self,
            request: &AddFriendRequest,
        ) -> Result<RawReply, SubmitError> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone().map_err(SubmitError::Transport)
        }
    }

    fn form_with(input: &str) -> FriendForm {
        let mut form = FriendForm::new();
        form.set_input(input);
        form
    }

    #[test]
    fn test_new_form_is_idle() {
        let form = FriendForm::new();
        assert_eq!(form.input(), "");
        assert_eq!(form.outcome(), &Outcome::Idle);
        assert!(!form.is_in_flight());
        assert!(form.controls_enabled());
        assert_eq!(form.submit_label(), SUBMIT_LABEL);
    }

    #[tokio::test]
    async fn test_submit_posts_extracted_id() {
        let api = MockApi::replying(200, r#"{"friend": {"display_name": "Alice"}}"#);
        let mut form = form_with("https://open.spotify.com/user/alice123?si=xyz");

        form.submit_with(&api).await;

        assert_eq!(api.requests(), vec![AddFriendRequest::new("alice123")]);
        assert_eq!(
            serde_json::to_string(&api.requests()[0]).unwrap(),
            r#"{"friend_id":"alice123"}"#
        );
    }

    #[tokio::test]
    async fn test_unparseable_input_makes_no_request() {
        let api = MockApi::replying(200, "{}");
        let mut form = form_with("not a url");

        let outcome = form.submit_with(&api).await.clone();

        assert_eq!(outcome, Outcome::Failure(PARSE_ERROR_MESSAGE.to_string()));
        assert!(api.requests().is_empty());
        assert!(!form.is_in_flight());
    }

    #[tokio::test]
    async fn test_trailing_user_segment_is_unparseable() {
        let api = MockApi::replying(200, "{}");
        let mut form = form_with("https://open.spotify.com/user/");

        form.submit_with(&api).await;

        assert_eq!(form.outcome().message(), Some(PARSE_ERROR_MESSAGE));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_success_uses_display_name() {
        let api = MockApi::replying(200, r#"{"friend": {"display_name": "Alice"}}"#);
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let outcome = form.submit_with(&api).await;

        assert!(outcome.is_success());
        assert!(outcome.message().unwrap().contains("Alice"));
    }

    #[tokio::test]
    async fn test_success_falls_back_to_spotify_id() {
        let api = MockApi::replying(200, r#"{"friend": {"spotify_user_id": "alice123"}}"#);
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let outcome = form.submit_with(&api).await;

        assert!(outcome.is_success());
        assert!(outcome.message().unwrap().contains("alice123"));
    }

    #[tokio::test]
    async fn test_success_falls_back_to_submitted_id() {
        let api = MockApi::replying(201, r#"{"friend": {}}"#);
        let mut form = form_with("https://open.spotify.com/user/zoe");

        let outcome = form.submit_with(&api).await;

        assert_eq!(outcome, &Outcome::Success("✅ Friend added: zoe".to_string()));
    }

    #[tokio::test]
    async fn test_backend_error_is_surfaced() {
        let api = MockApi::replying(409, r#"{"error": "already friends"}"#);
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let outcome = form.submit_with(&api).await;

        assert!(outcome.is_failure());
        assert!(outcome.message().unwrap().contains("already friends"));
        assert!(!form.is_in_flight());
        assert!(form.controls_enabled());
    }

    #[tokio::test]
    async fn test_backend_error_without_message_uses_fallback() {
        let api = MockApi::replying(500, "{}");
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let outcome = form.submit_with(&api).await;

        assert!(outcome.message().unwrap().contains(UNKNOWN_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_malformed_body_is_failure() {
        let api = MockApi::replying(502, "<html>Bad Gateway</html>");
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let outcome = form.submit_with(&api).await;

        assert!(outcome.is_failure());
        assert!(outcome.message().unwrap().starts_with("Error!!⚠️"));
    }

    #[tokio::test]
    async fn test_success_without_friend_is_failure() {
        let api = MockApi::replying(200, r#"{"ok": true}"#);
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let outcome = form.submit_with(&api).await;

        assert!(outcome.is_failure());
        assert!(outcome.message().unwrap().contains("missing a friend record"));
    }

    #[tokio::test]
    async fn test_transport_error_is_failure() {
        let api = MockApi::failing("connection refused");
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let outcome = form.submit_with(&api).await;

        assert!(outcome.is_failure());
        assert!(outcome.message().unwrap().contains("connection refused"));
        assert!(!form.is_in_flight());
    }

    #[tokio::test]
    async fn test_in_flight_for_whole_exchange() {
        let api = MockApi::replying(200, r#"{"friend": {"display_name": "Alice"}}"#);
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let submission = form.submit().unwrap();
        assert_eq!(submission.friend_id(), "alice123");
        assert!(form.is_in_flight());
        assert!(!form.controls_enabled());
        assert_eq!(form.submit_label(), SUBMITTING_LABEL);

        let completion = submission.send(&api).await;
        assert!(form.is_in_flight());
        assert!(completion.outcome().is_success());

        form.complete(completion);
        assert!(!form.is_in_flight());
        assert_eq!(form.submit_label(), SUBMIT_LABEL);
    }

    #[test]
    fn test_second_submit_ignored_while_in_flight() {
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let first = form.submit();
        assert!(first.is_some());
        assert!(form.submit().is_none());
        drop(first);
        assert!(form.submit().is_some());
    }

    #[test]
    fn test_dropped_submission_clears_in_flight() {
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let submission = form.submit().unwrap();
        assert!(form.is_in_flight());
        drop(submission);
        assert!(!form.is_in_flight());
        assert_eq!(form.outcome(), &Outcome::Idle);
    }

    #[test]
    fn test_edits_ignored_while_in_flight() {
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let _submission = form.submit().unwrap();
        form.push_char('x');
        form.clear_input();

        assert_eq!(form.input(), "https://open.spotify.com/user/alice123");
    }

    #[tokio::test]
    async fn test_edit_clears_outcome() {
        let api = MockApi::replying(409, r#"{"error": "already friends"}"#);
        let mut form = form_with("https://open.spotify.com/user/alice123");
        form.submit_with(&api).await;
        assert!(form.outcome().is_failure());

        form.pop_char();

        assert_eq!(form.outcome(), &Outcome::Idle);
        assert_eq!(form.input(), "https://open.spotify.com/user/alice12");
    }

    #[tokio::test]
    async fn test_resubmit_clears_previous_outcome() {
        let ok = MockApi::replying(200, r#"{"friend": {"display_name": "Alice"}}"#);
        let mut form = form_with("https://open.spotify.com/user/alice123");
        form.submit_with(&ok).await;
        assert!(form.outcome().is_success());

        let submission = form.submit().unwrap();
        assert_eq!(form.outcome(), &Outcome::Idle);
        drop(submission);
    }

    #[tokio::test]
    async fn test_success_survives_numeric_spotify_id() {
        let api = MockApi::replying(
            200,
            r#"{"friend": {"display_name": "Alice", "spotify_user_id": 12345}}"#,
        );
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let outcome = form.submit_with(&api).await;

        assert_eq!(outcome, &Outcome::Success("✅ Friend added: Alice".to_string()));
    }

    #[tokio::test]
    async fn test_backend_error_survives_offtype_friend_field() {
        let api = MockApi::replying(409, r#"{"error": "already friends", "friend": "alice123"}"#);
        let mut form = form_with("https://open.spotify.com/user/alice123");

        let outcome = form.submit_with(&api).await;

        assert_eq!(
            outcome,
            &Outcome::Failure("Error!!⚠️ already friends".to_string())
        );
    }

    #[test]
    fn test_interpret_reply_nested_error_uses_fallback() {
        let reply = RawReply::new(400, r#"{"error": {"detail": "nope"}}"#);
        let err = interpret_reply(&reply, "alice").unwrap_err();
        assert!(matches!(err, SubmitError::Backend(ref m) if m == UNKNOWN_ERROR_MESSAGE));
    }

    #[test]
    fn test_interpret_reply_prefers_error_over_friend_on_failure() {
        let reply = RawReply::new(
            400,
            r#"{"error": "bad id", "friend": {"display_name": "Alice"}}"#,
        );
        let err = interpret_reply(&reply, "alice").unwrap_err();
        assert!(matches!(err, SubmitError::Backend(ref m) if m == "bad id"));
    }
}

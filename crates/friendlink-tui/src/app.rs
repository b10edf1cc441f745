//! App state, input handling, submission plumbing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::info;

use friendlink_core::client::HttpClient;
use friendlink_core::form::{Completion, FriendForm};

/// The main application state.
pub struct App {
    pub form: FriendForm,
    pub endpoint: String,
    pub should_quit: bool,
    client: HttpClient,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl App {
    pub fn new(client: HttpClient) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        App {
            form: FriendForm::new(),
            endpoint: client.endpoint().to_string(),
            should_quit: false,
            client,
            completion_tx,
            completion_rx,
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL)
            | (KeyCode::Esc, _) => {
                self.should_quit = true;
            }
            // Controls are disabled while a request is out
            _ if !self.form.controls_enabled() => {}
            (KeyCode::Enter, _) => self.submit(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.form.clear_input(),
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
                self.form.push_char(c);
            }
            (KeyCode::Backspace, _) => self.form.pop_char(),
            _ => {}
        }
    }

    /// Start a submission on a background task. The completion comes back
    /// through the channel and is applied by [`App::poll_completions`].
    pub fn submit(&mut self) {
        let Some(submission) = self.form.submit() else {
            return;
        };

        let client = self.client.clone();
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let completion = submission.send(&client).await;
            // If the UI is gone the completion drops here, lowering the flag.
            let _ = tx.send(completion);
        });
    }

    /// Apply finished submissions (non-blocking).
    pub fn poll_completions(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.form.complete(completion);
            if let Some(msg) = self.form.outcome().message() {
                info!("Outcome: {}", msg);
            }
        }
    }
}

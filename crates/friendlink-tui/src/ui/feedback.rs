//! Feedback line — at most one message, success or failure.

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use friendlink_core::form::Outcome;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match app.form.outcome() {
        Outcome::Idle => return,
        Outcome::Success(msg) => (msg, Color::Green),
        Outcome::Failure(msg) => (msg, Color::Red),
    };

    let paragraph = Paragraph::new(Line::styled(format!(" {}", text), Style::default().fg(color)))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

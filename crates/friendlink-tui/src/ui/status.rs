//! Status bar — shows request state, endpoint, key help.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let (state_str, state_color) = if app.form.is_in_flight() {
        ("sending", Color::Yellow)
    } else {
        ("ready", Color::DarkGray)
    };

    let spans = vec![
        Span::styled(
            format!(" {} ", state_str),
            Style::default().fg(Color::Black).bg(state_color),
        ),
        Span::raw(format!(" POST {} ", app.endpoint)),
        Span::styled(
            " Enter submit · Ctrl+U clear · Esc quit ",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let status = Paragraph::new(Line::from(spans));
    frame.render_widget(status, area);
}

//! TUI layout compositing — assembles all UI panels.

mod feedback;
mod input;
mod status;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Render the full TUI layout.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // ┌──────────────────────────────────┐
    // │ Title                            │
    // ├──────────────────────────────────┤
    // │ Input                            │
    // ├──────────────────────────────────┤
    // │ [ Add Friend ]                   │
    // │ Feedback                         │
    // │                                  │
    // ├──────────────────────────────────┤
    // │ Status bar                       │
    // └──────────────────────────────────┘

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(3), // input
            Constraint::Length(2), // button
            Constraint::Min(1),    // feedback
            Constraint::Length(1), // status
        ])
        .split(area);

    let title = Paragraph::new(Line::styled(
        " Add a Spotify Friend",
        Style::default().fg(Color::Cyan).bold(),
    ));
    frame.render_widget(title, main_layout[0]);

    input::draw(frame, app, main_layout[1]);
    input::draw_button(frame, app, main_layout[2]);
    feedback::draw(frame, app, main_layout[3]);
    status::draw(frame, app, main_layout[4]);
}

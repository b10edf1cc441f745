//! URL input box and submit button.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let enabled = app.form.controls_enabled();
    let border_color = if enabled { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" Spotify profile URL ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = if app.form.input().is_empty() {
        Paragraph::new("Paste Spotify profile URL").style(Style::default().fg(Color::DarkGray))
    } else {
        let fg = if enabled { Color::White } else { Color::DarkGray };
        Paragraph::new(app.form.input()).style(Style::default().fg(fg))
    };
    frame.render_widget(text, inner);

    // Show cursor
    if enabled {
        let width = app.form.input().chars().count() as u16;
        frame.set_cursor_position(Position::new(
            inner.x + width.min(inner.width.saturating_sub(1)),
            inner.y,
        ));
    }
}

pub fn draw_button(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.form.controls_enabled() {
        Style::default().fg(Color::White).bg(Color::Blue).bold()
    } else {
        Style::default().fg(Color::Gray).bg(Color::DarkGray)
    };

    let button = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(format!(" {} ", app.form.submit_label()), style),
    ]));
    frame.render_widget(button, area);
}

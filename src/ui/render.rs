use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::{Focus, Model};
use crate::shortcuts::SHORTCUTS;

use super::status;

/// Render the whole frame: title line, separator, body, status bar, and
/// any overlay on top.
pub fn draw(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(model, frame, chunks[0]);
    render_separator(frame, chunks[1]);
    render_body(model, frame, chunks[2]);
    status::render_status_bar(model, frame, chunks[3]);
    status::render_toast_bar(model, frame, chunks[3]);

    if model.help_visible {
        render_help(frame, area);
    } else if !model.command_mode {
        place_cursor(model, frame, chunks[0], chunks[2]);
    }
}

fn render_title(model: &Model, frame: &mut Frame, area: Rect) {
    let style = if model.title_is_placeholder() {
        // Seeded from the file name, not yet a real edit.
        Style::default().fg(Color::DarkGray).italic()
    } else {
        Style::default().bold()
    };
    let title = Paragraph::new(model.title.as_str()).style(style);
    frame.render_widget(title, area);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    let line = "─".repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_body(model: &Model, frame: &mut Frame, area: Rect) {
    let height = area.height as usize;
    let mut lines = Vec::with_capacity(height);
    for idx in model.scroll_offset..model.scroll_offset + height {
        match model.body.line_at(idx) {
            Some(text) => lines.push(Line::raw(text)),
            None => break,
        }
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn place_cursor(model: &Model, frame: &mut Frame, title_area: Rect, body_area: Rect) {
    match model.focus {
        Focus::Title => {
            let prefix: String = model.title.chars().take(model.title_cursor).collect();
            let x = title_area.x + u16::try_from(prefix.width()).unwrap_or(u16::MAX);
            frame.set_cursor_position((x.min(title_area.right().saturating_sub(1)), title_area.y));
        }
        Focus::Body => {
            let cursor = model.body.cursor();
            if cursor.line < model.scroll_offset {
                return;
            }
            let row = cursor.line - model.scroll_offset;
            if row >= body_area.height as usize {
                return;
            }
            let prefix: String = model
                .body
                .line_at(cursor.line)
                .unwrap_or_default()
                .chars()
                .take(cursor.col)
                .collect();
            let x = body_area.x + u16::try_from(prefix.width()).unwrap_or(u16::MAX);
            let y = body_area.y + u16::try_from(row).unwrap_or(u16::MAX);
            frame.set_cursor_position((x.min(body_area.right().saturating_sub(1)), y));
        }
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line<'_>> = SHORTCUTS
        .iter()
        .map(|def| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<14}", def.binding_label()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(def.description),
            ])
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        " esc           Command mode (s/q/h/w), i to resume",
        Style::default().fg(Color::DarkGray),
    ));

    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup = centered_rect(area, 52, height);
    frame.render_widget(Clear, popup);
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Shortcuts ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(help, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

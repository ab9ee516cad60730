use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Focus, Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .draft_path
        .file_name()
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());

    let save_state = if model.read_only {
        "[read-only]"
    } else if model.scheduler.is_dirty() {
        "[unsaved]"
    } else {
        "[saved]"
    };

    let mode = if model.command_mode {
        "COMMAND"
    } else {
        match model.focus {
            Focus::Title => "TITLE",
            Focus::Body => "BODY",
        }
    };

    let left = format!(" {filename}  {save_state}");
    let right = format!("{} words  {mode}  f1:help ", model.body.word_count());
    let gap = (area.width as usize).saturating_sub(left.width() + right.width());
    let status = format!("{left}{}{right}", " ".repeat(gap));

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

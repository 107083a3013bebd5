use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, ToastLevel};

const KEY_HINTS: &str = "Ctrl+Y copy  Ctrl+S export  Ctrl+O import  Ctrl+R render  F1 help  Ctrl+Q quit";

/// Text shown on the right of the status bar for the current render state.
pub fn render_status_text(model: &Model) -> &'static str {
    if model.render.is_rendering() {
        "Converting markdown..."
    } else if model.render.error().is_some() {
        "Render failed"
    } else {
        "Ready"
    }
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .file_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());

    let cursor = model.editor.cursor();
    let col = model
        .editor
        .line(cursor.line)
        .and_then(|line| line.get(..cursor.col).map(UnicodeWidthStr::width))
        .unwrap_or(0);
    let cursor_info = format!("Ln {}, Col {}", cursor.line + 1, col + 1);

    let status = format!(
        " {}  {}  {} lines  {}",
        filename,
        cursor_info,
        model.editor.line_count(),
        render_status_text(model)
    );

    let bg = if model.render.is_rendering() {
        Color::Blue
    } else {
        Color::DarkGray
    };
    let status_bar = Paragraph::new(status).style(Style::default().bg(bg).fg(Color::White));
    frame.render_widget(status_bar, area);
}

/// The line above the status bar: import prompt, toast, or key hints.
pub fn render_message_line(model: &Model, frame: &mut Frame, area: Rect) {
    if let Some(prompt) = model.import_prompt.as_deref() {
        let line = Line::from(vec![
            Span::styled(
                "Import file: ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(prompt.to_string()),
            Span::styled(" ", super::style::cursor_style()),
            Span::styled(
                "  Enter: import  Esc: cancel",
                Style::default().fg(Color::Indexed(245)),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    if model.active_toast().is_some() {
        render_toast_bar(model, frame, area);
        return;
    }

    let hints = Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::Indexed(245)));
    frame.render_widget(hints, area);
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

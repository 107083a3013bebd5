use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::Model;
use crate::highlight::tokenize_line;

use super::{EDITOR_WIDTH_PERCENT, FOOTER_ROWS, PREVIEW_WIDTH_PERCENT, overlays, status, style};

/// Editor and preview columns, side by side.
pub fn split_panes(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(EDITOR_WIDTH_PERCENT),
            Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let main_area = Rect {
        height: area.height.saturating_sub(FOOTER_ROWS),
        ..area
    };
    let message_area = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let panes = split_panes(main_area);
    render_editor(model, frame, panes[0]);
    render_preview(model, frame, panes[1]);

    if area.height > 1 {
        status::render_message_line(model, frame, message_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let buf = &model.editor;
    let block = Block::default()
        .title("Markdown")
        .borders(Borders::ALL)
        .border_style(style::pane_border_style(model.import_prompt.is_none()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let visible_height = inner.height as usize;
    let start = model.editor_scroll;
    let end = (start + visible_height).min(total_lines);
    let cursor = buf.cursor();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);

        let mut spans = vec![Span::styled(line_num, style::gutter_style())];
        let cursor_col = (line_idx == cursor.line).then_some(cursor.col);
        spans.extend(highlighted_spans(&line_text, cursor_col));
        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), inner);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default().title("Preview").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut body = inner;
    if let Some(banner) = model.render.error_banner()
        && inner.height > 0
    {
        let banner_area = Rect { height: 1, ..inner };
        frame.render_widget(
            Paragraph::new(format!(" {banner}")).style(style::error_banner_style()),
            banner_area,
        );
        body = Rect {
            y: inner.y + 1,
            height: inner.height - 1,
            ..inner
        };
    }

    let text_style = if model.render.is_rendering() {
        style::pending_preview_style()
    } else {
        Style::default()
    };
    let lines: Vec<Line> = model
        .preview_lines()
        .into_iter()
        .skip(model.preview_scroll)
        .take(body.height as usize)
        .map(|line| Line::styled(display_text(&line), text_style))
        .collect();
    frame.render_widget(Paragraph::new(lines), body);
}

/// Spans for one editor line, highlighted, with the cursor drawn as an
/// inverted cell at byte offset `cursor_col`.
pub fn highlighted_spans(line: &str, cursor_col: Option<usize>) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut offset = 0;
    let mut cursor_drawn = false;

    for segment in tokenize_line(line) {
        let seg_style = style::style_for_segment(segment.style);
        let seg_end = offset + segment.text.len();
        match cursor_col {
            Some(col) if !cursor_drawn && col >= offset && col < seg_end => {
                let local = col - offset;
                let (before, rest) = segment.text.split_at(local);
                let cursor_len = rest.chars().next().map_or(0, char::len_utf8);
                let (at, after) = rest.split_at(cursor_len);
                if !before.is_empty() {
                    spans.push(Span::styled(display_text(before), seg_style));
                }
                spans.push(Span::styled(display_text(at), style::cursor_style()));
                if !after.is_empty() {
                    spans.push(Span::styled(display_text(after), seg_style));
                }
                cursor_drawn = true;
            }
            _ => spans.push(Span::styled(display_text(&segment.text), seg_style)),
        }
        offset = seg_end;
    }

    if cursor_col.is_some() && !cursor_drawn {
        spans.push(Span::styled(" ", style::cursor_style()));
    }
    spans
}

/// Make control characters visible so they keep a cell on screen.
fn display_text(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\r' => '\u{240d}',
            '\t' => ' ',
            c if c.is_control() => '\u{fffd}',
            c => c,
        })
        .collect()
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

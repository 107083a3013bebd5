//! Theming and color definitions.
//!
//! Highlight colors for the editor pane and the chrome around both panes.
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::highlight::StyleTag;

/// Style for a highlighted editor segment.
pub fn style_for_tag(tag: StyleTag) -> Style {
    match tag {
        StyleTag::Heading1 => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        StyleTag::Heading2 => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        StyleTag::Bold => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        StyleTag::Italic => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
        StyleTag::Code => Style::default().fg(Color::Red).bg(Color::Indexed(236)),
        StyleTag::Link => Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::UNDERLINED),
    }
}

/// Style for a segment that may be unstyled.
pub fn style_for_segment(tag: Option<StyleTag>) -> Style {
    tag.map_or_else(Style::default, style_for_tag)
}

pub fn cursor_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn gutter_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn pane_border_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// Preview text while a render is outstanding.
pub fn pending_preview_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

pub fn error_banner_style() -> Style {
    Style::default()
        .bg(Color::Red)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

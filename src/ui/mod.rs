//! Terminal UI components.
//!
//! Two bordered panes side by side, the highlighted editor on the left and
//! the rendered preview on the right, above a message line and a status bar.
//! - [`style`]: Theming and colors

pub mod style;

mod overlays;
mod render;
mod status;

pub use overlays::centered_popup_rect;
pub use render::{highlighted_spans, line_number_width, render, split_panes};
pub use status::render_status_text;

pub const EDITOR_WIDTH_PERCENT: u16 = 50;
pub const PREVIEW_WIDTH_PERCENT: u16 = 50;
/// Message line plus status bar.
pub const FOOTER_ROWS: u16 = 2;
const PANE_BORDER_ROWS: u16 = 2;

/// Text rows inside each pane for a terminal of the given height.
pub const fn pane_rows(height: u16) -> u16 {
    height.saturating_sub(FOOTER_ROWS + PANE_BORDER_ROWS)
}

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::EditorBuffer;
use crate::render::RenderState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete editor state.
///
/// The document string is authoritative. The editor buffer is the input
/// widget and is kept in step with it: edits flow buffer → document, imports
/// and external updates flow document → buffer.
#[derive(Debug)]
pub struct Model {
    document: String,
    /// Bumped on every actual document change.
    revision: u64,
    /// Input buffer for the editor pane
    pub editor: EditorBuffer,
    /// First visible editor line
    pub editor_scroll: usize,
    /// Remote render status and preview content
    pub render: RenderState,
    /// First visible preview line
    pub preview_scroll: usize,
    /// Most recently imported file
    pub file_path: Option<PathBuf>,
    /// Terminal size (width, height)
    pub terminal_size: (u16, u16),
    pub help_visible: bool,
    /// Path being typed into the import prompt
    pub import_prompt: Option<String>,
    toast: Option<Toast>,
    pub config_global_path: Option<PathBuf>,
    pub config_local_path: Option<PathBuf>,
    pub should_quit: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(String::new(), (80, 24), false)
    }
}

impl Model {
    pub fn new(document: String, terminal_size: (u16, u16), keep_last_good: bool) -> Self {
        Self {
            editor: EditorBuffer::from_text(&document),
            document,
            revision: 0,
            editor_scroll: 0,
            render: RenderState::new(keep_last_good),
            preview_scroll: 0,
            file_path: None,
            terminal_size,
            help_visible: false,
            import_prompt: None,
            toast: None,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the document wholesale. Returns `false` if the text is
    /// unchanged.
    pub fn set_document(&mut self, text: String) -> bool {
        if text == self.document {
            return false;
        }
        self.editor.replace_text(&text);
        self.document = text;
        self.revision += 1;
        self.ensure_cursor_visible();
        true
    }

    /// Take the editor buffer's text as the new document.
    pub(super) fn sync_from_editor(&mut self) {
        let text = self.editor.text();
        if text != self.document {
            self.document = text;
            self.revision += 1;
        }
        self.ensure_cursor_visible();
    }

    /// Rows available to the text inside each pane.
    pub fn pane_rows(&self) -> usize {
        crate::ui::pane_rows(self.terminal_size.1) as usize
    }

    pub(super) fn ensure_cursor_visible(&mut self) {
        let rows = self.pane_rows().max(1);
        let line = self.editor.cursor().line;
        if line < self.editor_scroll {
            self.editor_scroll = line;
        } else if line >= self.editor_scroll + rows {
            self.editor_scroll = line + 1 - rows;
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Lines the preview pane shows for the current render state.
    pub fn preview_lines(&self) -> Vec<String> {
        crate::preview::html_to_lines(self.render.preview_content())
    }
}

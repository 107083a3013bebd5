//! Editor controller and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete editor state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`Session`]: Side effects, the render debounce and background renders
//! - [`App::run`]: Terminal event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod session;
mod update;

pub use model::{Model, ToastLevel};
pub use session::{RenderDebouncer, Session};
pub use update::{Message, update};

use std::path::PathBuf;
use std::sync::Arc;

use crate::clipboard::{Clipboard, TerminalClipboard};
use crate::config::EditorSettings;
use crate::render::{HttpRenderer, MarkdownRenderer};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    settings: EditorSettings,
    initial_file: Option<PathBuf>,
    renderer: Arc<dyn MarkdownRenderer>,
    clipboard: Box<dyn Clipboard>,
    config_paths: (Option<PathBuf>, Option<PathBuf>),
}

impl App {
    /// Create an application talking to the configured render endpoint.
    pub fn new(settings: EditorSettings) -> Self {
        let renderer = Arc::new(HttpRenderer::new(
            settings.endpoint.clone(),
            settings.timeout,
        ));
        Self {
            settings,
            initial_file: None,
            renderer,
            clipboard: Box::new(TerminalClipboard),
            config_paths: (None, None),
        }
    }

    /// Use a different clipboard sink.
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Import a file before the first frame.
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.initial_file = path;
        self
    }

    /// Use a different renderer (tests, alternative services).
    pub fn with_renderer(mut self, renderer: Arc<dyn MarkdownRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_paths = (global_path, local_path);
        self
    }

    /// Build the terminal-free controller for a given terminal size.
    pub fn into_session(self, terminal_size: (u16, u16)) -> Session {
        let mut model = Model::new(
            String::new(),
            terminal_size,
            self.settings.keep_preview_on_error,
        );
        (model.config_global_path, model.config_local_path) = self.config_paths;
        let mut session = Session::new(model, self.settings, self.renderer, self.clipboard);
        if let Some(path) = self.initial_file {
            session.handle(Message::ImportFromPath(path), 0);
        }
        session.start(0);
        session
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("settings", &self.settings)
            .field("initial_file", &self.initial_file)
            .finish_non_exhaustive()
    }
}

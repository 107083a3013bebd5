use std::path::PathBuf;

use crate::app::Model;
use crate::editor::Direction;
use crate::render::RenderOutcome;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Insert text at the cursor (paste, tab)
    EditorInsertStr(String),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    EditorMoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    EditorMoveWordRight,
    /// Move cursor to start of buffer (Ctrl+Home)
    EditorMoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    EditorMoveToEnd,
    /// Move cursor one pane up
    EditorPageUp,
    /// Move cursor one pane down
    EditorPageDown,

    // Document
    /// Replace the whole document
    SetDocument(String),

    // Rendering
    /// Send the current document to the render service
    RequestRender,
    /// A render came back
    RenderFinished(RenderOutcome),
    /// Scroll preview up by n lines
    PreviewScrollUp(usize),
    /// Scroll preview down by n lines
    PreviewScrollDown(usize),

    // Files
    /// Copy the document to the clipboard
    CopyToClipboard,
    /// Write the document to the export directory
    ExportToFile,
    /// Open the import path prompt
    StartImport,
    /// Update the import prompt text
    ImportInput(String),
    /// Close the import prompt
    CancelImport,
    /// Replace the document with a file's contents
    ImportFromPath(PathBuf),
    /// The imported file changed on disk
    FileChanged,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Quit the application
    Quit,
}

impl Message {
    const fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::EditorInsertChar(_)
                | Self::EditorInsertStr(_)
                | Self::EditorDeleteBack
                | Self::EditorDeleteForward
                | Self::EditorSplitLine
                | Self::EditorMoveCursor(_)
                | Self::EditorMoveHome
                | Self::EditorMoveEnd
                | Self::EditorMoveWordLeft
                | Self::EditorMoveWordRight
                | Self::EditorMoveToStart
                | Self::EditorMoveToEnd
                | Self::EditorPageUp
                | Self::EditorPageDown
        )
    }
}

/// Pure state transition. File, clipboard and network work happens in the
/// effects layer after this returns.
pub fn update(mut model: Model, msg: Message) -> Model {
    if msg.is_edit() {
        apply_edit(&mut model, &msg);
        model.sync_from_editor();
        return model;
    }

    match msg {
        Message::SetDocument(text) => {
            model.set_document(text);
        }

        Message::RequestRender => {
            let seq = model.render.begin();
            tracing::debug!(seq, "render requested");
        }
        Message::RenderFinished(outcome) => {
            let seq = outcome.seq;
            if model.render.apply(outcome) {
                if let Some(err) = model.render.error() {
                    tracing::warn!(seq, %err, "render failed");
                }
                model.preview_scroll = model
                    .preview_scroll
                    .min(model.preview_lines().len().saturating_sub(1));
            } else {
                tracing::debug!(
                    seq,
                    latest = model.render.latest_seq(),
                    "discarding stale render"
                );
            }
        }
        Message::PreviewScrollUp(n) => {
            model.preview_scroll = model.preview_scroll.saturating_sub(n);
        }
        Message::PreviewScrollDown(n) => {
            let max = model.preview_lines().len().saturating_sub(1);
            model.preview_scroll = (model.preview_scroll + n).min(max);
        }

        Message::StartImport => {
            let current = model
                .file_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            model.import_prompt = Some(current);
        }
        Message::ImportInput(text) => {
            if model.import_prompt.is_some() {
                model.import_prompt = Some(text);
            }
        }
        Message::CancelImport | Message::ImportFromPath(_) => {
            model.import_prompt = None;
        }
        Message::CopyToClipboard | Message::ExportToFile | Message::FileChanged => {}

        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.ensure_cursor_visible();
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Quit => {
            model.should_quit = true;
        }

        _ => {}
    }
    model
}

fn apply_edit(model: &mut Model, msg: &Message) {
    let page = model.pane_rows().max(1);
    let buf = &mut model.editor;
    match msg {
        Message::EditorInsertChar(ch) => buf.insert_char(*ch),
        Message::EditorInsertStr(text) => buf.insert_str(text),
        Message::EditorDeleteBack => {
            buf.delete_back();
        }
        Message::EditorDeleteForward => {
            buf.delete_forward();
        }
        Message::EditorSplitLine => buf.split_line(),
        Message::EditorMoveCursor(dir) => buf.move_cursor(*dir),
        Message::EditorMoveHome => buf.move_home(),
        Message::EditorMoveEnd => buf.move_end(),
        Message::EditorMoveWordLeft => buf.move_word_left(),
        Message::EditorMoveWordRight => buf.move_word_right(),
        Message::EditorMoveToStart => buf.move_to_start(),
        Message::EditorMoveToEnd => buf.move_to_end(),
        Message::EditorPageUp => {
            let cursor = buf.cursor();
            buf.move_to(cursor.line.saturating_sub(page), cursor.col);
        }
        Message::EditorPageDown => {
            let cursor = buf.cursor();
            buf.move_to(cursor.line + page, cursor.col);
        }
        _ => {}
    }
}

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Message, Model};
use crate::editor::Direction;

const TAB_TEXT: &str = "    ";

/// Translate a terminal event into a message for the current mode.
pub(super) fn event_to_message(event: Event, model: &Model) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(key, model),
        Event::Paste(text) => handle_paste(&text, model),
        Event::Resize(w, h) => Some(Message::Resize(w, h)),
        _ => None,
    }
}

pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if model.help_visible {
        return Some(Message::HideHelp);
    }

    if let Some(prompt) = model.import_prompt.as_ref() {
        return handle_prompt_key(key, prompt);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let page = model.pane_rows().max(1);

    match key.code {
        KeyCode::Char('q') if ctrl => Some(Message::Quit),
        KeyCode::Char('y') if ctrl => Some(Message::CopyToClipboard),
        KeyCode::Char('s') if ctrl => Some(Message::ExportToFile),
        KeyCode::Char('o') if ctrl => Some(Message::StartImport),
        KeyCode::Char('r') if ctrl => Some(Message::RequestRender),
        KeyCode::Char(_) if ctrl || alt => None,
        KeyCode::F(1) => Some(Message::ToggleHelp),

        // Preview pane
        KeyCode::Up if alt => Some(Message::PreviewScrollUp(1)),
        KeyCode::Down if alt => Some(Message::PreviewScrollDown(1)),
        KeyCode::PageUp if alt => Some(Message::PreviewScrollUp(page)),
        KeyCode::PageDown if alt => Some(Message::PreviewScrollDown(page)),

        // Cursor
        KeyCode::Left if ctrl => Some(Message::EditorMoveWordLeft),
        KeyCode::Right if ctrl => Some(Message::EditorMoveWordRight),
        KeyCode::Home if ctrl => Some(Message::EditorMoveToStart),
        KeyCode::End if ctrl => Some(Message::EditorMoveToEnd),
        KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
        KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
        KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
        KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
        KeyCode::Home => Some(Message::EditorMoveHome),
        KeyCode::End => Some(Message::EditorMoveEnd),
        KeyCode::PageUp => Some(Message::EditorPageUp),
        KeyCode::PageDown => Some(Message::EditorPageDown),

        // Editing
        KeyCode::Enter => Some(Message::EditorSplitLine),
        KeyCode::Backspace => Some(Message::EditorDeleteBack),
        KeyCode::Delete => Some(Message::EditorDeleteForward),
        KeyCode::Tab => Some(Message::EditorInsertStr(TAB_TEXT.to_string())),
        KeyCode::Char(c) => Some(Message::EditorInsertChar(c)),
        _ => None,
    }
}

fn handle_prompt_key(key: KeyEvent, prompt: &str) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::CancelImport),
        KeyCode::Enter => {
            let path = prompt.trim();
            if path.is_empty() {
                Some(Message::CancelImport)
            } else {
                Some(Message::ImportFromPath(path.into()))
            }
        }
        KeyCode::Backspace => {
            let mut next = prompt.to_string();
            next.pop();
            Some(Message::ImportInput(next))
        }
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            let mut next = prompt.to_string();
            next.push(c);
            Some(Message::ImportInput(next))
        }
        _ => None,
    }
}

/// Bracketed paste. Line endings are normalized so the document only ever
/// holds `\n` breaks typed through the editor.
fn handle_paste(text: &str, model: &Model) -> Option<Message> {
    if model.help_visible {
        return None;
    }
    if let Some(prompt) = model.import_prompt.as_ref() {
        let line = text.lines().next().unwrap_or_default();
        return Some(Message::ImportInput(format!("{prompt}{line}")));
    }
    if text.is_empty() {
        return None;
    }
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    Some(Message::EditorInsertStr(normalized))
}

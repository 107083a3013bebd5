use std::path::Path;
use std::time::Duration;

use crate::app::{Message, Session, ToastLevel};
use crate::files;
use crate::watcher::FileWatcher;

const WATCH_SETTLE: Duration = Duration::from_millis(200);

impl Session {
    pub(super) fn handle_message_side_effects(&mut self, msg: &Message) {
        match msg {
            Message::RequestRender => {
                let seq = self.model.render.latest_seq();
                self.worker.dispatch(seq, self.model.document().to_string());
            }
            Message::CopyToClipboard => {
                let text = self.model.document().to_string();
                match self.clipboard.set_text(&text) {
                    Ok(()) => self.model.show_toast(
                        ToastLevel::Info,
                        format!("Copied {} line(s)", text.split('\n').count()),
                    ),
                    Err(err) => {
                        tracing::warn!(%err, "clipboard copy failed");
                        self.model
                            .show_toast(ToastLevel::Error, format!("Copy failed: {err}"));
                    }
                }
            }
            Message::ExportToFile => {
                match files::export_to_file(&self.settings.export_dir, self.model.document()) {
                    Ok(path) => self.model.show_toast(
                        ToastLevel::Info,
                        format!("Exported {} ({})", path.display(), files::EXPORT_CONTENT_TYPE),
                    ),
                    Err(err) => {
                        tracing::warn!(%err, "export failed");
                        self.model
                            .show_toast(ToastLevel::Error, format!("Export failed: {err}"));
                    }
                }
            }
            Message::ImportFromPath(path) => {
                self.import(path, true);
            }
            Message::FileChanged => {
                if let Some(path) = self.model.file_path.clone() {
                    self.import(&path, false);
                }
            }
            _ => {}
        }
    }

    fn import(&mut self, path: &Path, announce: bool) {
        let text = match files::import_from_file(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "import failed");
                self.model
                    .show_toast(ToastLevel::Error, format!("Import failed: {err}"));
                return;
            }
        };
        self.model.set_document(text);

        let path_changed = self.model.file_path.as_deref() != Some(path);
        self.model.file_path = Some(path.to_path_buf());
        if self.settings.watch && (path_changed || self.watcher.is_none()) {
            self.watch(path);
        }

        if !announce {
            return;
        }
        if files::has_markdown_extension(path) {
            self.model
                .show_toast(ToastLevel::Info, format!("Imported {}", path.display()));
        } else {
            self.model.show_toast(
                ToastLevel::Warning,
                format!("Imported {} (not a .md/.markdown file)", path.display()),
            );
        }
    }

    fn watch(&mut self, path: &Path) {
        match FileWatcher::new(path, WATCH_SETTLE) {
            Ok(watcher) => self.watcher = Some(watcher),
            Err(err) => {
                self.watcher = None;
                tracing::warn!(%err, path = %path.display(), "watch unavailable");
                self.model
                    .show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
            }
        }
    }
}

//! Document import and export.
//!
//! Both directions move the document verbatim: no newline normalization, no
//! BOM handling, so an export followed by an import restores the exact text.

use std::fs;
use std::path::{Path, PathBuf};

/// File name used for every export.
pub const EXPORT_FILE_NAME: &str = "document.md";
/// Media type of exported files.
pub const EXPORT_CONTENT_TYPE: &str = "text/markdown";
/// Extensions the import prompt expects.
pub const IMPORT_EXTENSIONS: [&str; 2] = ["md", "markdown"];

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not UTF-8 text", path.display())]
    NotUtf8 { path: PathBuf },
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Write `text` to `document.md` inside `dir` and return the file's path.
///
/// # Errors
/// Returns [`FileError::Write`] if the directory or file cannot be written.
pub fn export_to_file(dir: &Path, text: &str) -> Result<PathBuf, FileError> {
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, text).map_err(|source| FileError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = text.len(), "exported document");
    Ok(path)
}

/// Read a file as UTF-8 text.
///
/// # Errors
/// Returns [`FileError::Read`] on I/O failure and [`FileError::NotUtf8`] for
/// binary or otherwise non-UTF-8 content.
pub fn import_from_file(path: &Path) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| FileError::NotUtf8 {
        path: path.to_path_buf(),
    })?;
    tracing::info!(path = %path.display(), bytes = text.len(), "imported document");
    Ok(text)
}

/// Whether `path` has one of the expected markdown extensions.
pub fn has_markdown_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMPORT_EXTENSIONS
                .iter()
                .any(|expected| ext.eq_ignore_ascii_case(expected))
        })
}

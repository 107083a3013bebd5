//! Saved defaults and resolved editor settings.
//!
//! Defaults live in a flag file: one or more command-line flags per line,
//! `#` comments and blank lines ignored. A line starting with `--flag=value`
//! holds that one flag, and the value runs to the end of the line so paths
//! may contain spaces. A global file is merged with a local `.splitmarkrc`,
//! and command-line flags win over both.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::render::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub keep_preview_on_error: bool,
    pub endpoint: Option<String>,
    pub debounce_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge with `other` taking precedence for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            keep_preview_on_error: self.keep_preview_on_error || other.keep_preview_on_error,
            endpoint: other.endpoint.clone().or_else(|| self.endpoint.clone()),
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            export_dir: other.export_dir.clone().or_else(|| self.export_dir.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Fill in defaults for everything left unset.
    pub fn resolve(&self) -> EditorSettings {
        EditorSettings {
            endpoint: self
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            debounce: Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)),
            timeout: self
                .timeout_secs
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
            export_dir: self
                .export_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            watch: self.watch,
            keep_preview_on_error: self.keep_preview_on_error,
        }
    }
}

/// Settings the editor runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    pub endpoint: String,
    pub debounce: Duration,
    pub timeout: Duration,
    pub export_dir: PathBuf,
    pub watch: bool,
    pub keep_preview_on_error: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        ConfigFlags::default().resolve()
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("splitmark").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("splitmark")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("splitmark").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("splitmark")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".splitmarkrc")
}

/// Load flags from a defaults file; a missing file yields no flags.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

fn line_tokens(line: &str) -> Vec<String> {
    let first = line.split_whitespace().next().unwrap_or_default();
    if first.starts_with("--") && first.contains('=') {
        return vec![line.to_string()];
    }
    line.split_whitespace().map(ToOwned::to_owned).collect()
}

/// Write flags to a defaults file, creating its directory.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# splitmark defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.keep_preview_on_error {
        lines.push("--keep-preview-on-error".to_string());
    }
    if let Some(endpoint) = &flags.endpoint {
        lines.push(format!("--endpoint={endpoint}"));
    }
    if let Some(ms) = flags.debounce_ms {
        lines.push(format!("--debounce-ms={ms}"));
    }
    if let Some(secs) = flags.timeout_secs {
        lines.push(format!("--timeout-secs={secs}"));
    }
    if let Some(dir) = &flags.export_dir {
        lines.push(format!("--export-dir={}", dir.display()));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file={}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a defaults file if present.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list. Unknown tokens and malformed
/// numbers are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        match name {
            "--watch" | "-w" => flags.watch = true,
            "--keep-preview-on-error" => flags.keep_preview_on_error = true,
            "--endpoint" | "--debounce-ms" | "--timeout-secs" | "--export-dir" | "--log-file" => {
                let value = match inline_value {
                    Some(value) => Some(value.to_string()),
                    None => {
                        let next = tokens.get(i + 1).cloned();
                        if next.is_some() {
                            i += 1;
                        }
                        next
                    }
                };
                if let Some(value) = value {
                    apply_valued_flag(&mut flags, name, value);
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

fn apply_valued_flag(flags: &mut ConfigFlags, name: &str, value: String) {
    match name {
        "--endpoint" => flags.endpoint = Some(value),
        "--debounce-ms" => flags.debounce_ms = value.parse().ok(),
        "--timeout-secs" => flags.timeout_secs = value.parse().ok(),
        "--export-dir" => flags.export_dir = Some(PathBuf::from(value)),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "splitmark",
            "--watch",
            "--endpoint",
            "http://render.local/md",
            "--debounce-ms=150",
            "--keep-preview-on-error",
            "notes.md",
        ]));
        assert!(flags.watch);
        assert!(flags.keep_preview_on_error);
        assert_eq!(flags.endpoint.as_deref(), Some("http://render.local/md"));
        assert_eq!(flags.debounce_ms, Some(150));
        assert_eq!(flags.timeout_secs, None);
    }

    #[test]
    fn test_parse_flag_tokens_accepts_short_watch() {
        let flags = parse_flag_tokens(&tokens(&["splitmark", "-w", "notes.md"]));
        assert_eq!(
            flags,
            ConfigFlags {
                watch: true,
                ..ConfigFlags::default()
            }
        );
    }

    #[test]
    fn test_parse_flag_tokens_ignores_bad_numbers() {
        let flags = parse_flag_tokens(&tokens(&["--timeout-secs", "soon"]));
        assert_eq!(flags.timeout_secs, None);
    }

    #[test]
    fn test_trailing_valued_flag_without_value() {
        let flags = parse_flag_tokens(&tokens(&["--watch", "--endpoint"]));
        assert!(flags.watch);
        assert_eq!(flags.endpoint, None);
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let settings = ConfigFlags::default().resolve();
        assert_eq!(settings.endpoint, "http://localhost:3001/api/markdown");
        assert_eq!(settings.debounce, Duration::from_millis(300));
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.export_dir, PathBuf::from("."));
        assert!(!settings.keep_preview_on_error);
    }

    #[test]
    fn test_config_union_prefers_other_for_values() {
        let file = ConfigFlags {
            watch: true,
            debounce_ms: Some(500),
            endpoint: Some("http://a".to_string()),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            endpoint: Some("http://b".to_string()),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.watch);
        assert_eq!(merged.debounce_ms, Some(500));
        assert_eq!(merged.endpoint.as_deref(), Some("http://b"));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            watch: true,
            keep_preview_on_error: true,
            endpoint: Some("http://localhost:9000/render".to_string()),
            debounce_ms: Some(250),
            timeout_secs: Some(3),
            export_dir: Some(PathBuf::from("exports")),
            log_file: Some(PathBuf::from("splitmark.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }

    #[test]
    fn test_saved_paths_with_spaces_load_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        let flags = ConfigFlags {
            export_dir: Some(PathBuf::from("my exports/today")),
            log_file: Some(PathBuf::from("logs/split mark.log")),
            ..ConfigFlags::default()
        };

        save_config_flags(&path, &flags).unwrap();
        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.contains("--export-dir=my exports/today\n"));
        assert_eq!(load_config_flags(&path).unwrap(), flags);
    }

    #[test]
    fn test_flag_file_mixes_line_forms() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(
            &path,
            "# defaults\n--watch --debounce-ms 120\n--export-dir=out dir\n\n-w\n",
        )
        .unwrap();
        let flags = load_config_flags(&path).unwrap();
        assert!(flags.watch);
        assert_eq!(flags.debounce_ms, Some(120));
        assert_eq!(flags.export_dir, Some(PathBuf::from("out dir")));
    }
}

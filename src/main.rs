//! Splitmark - A split-pane terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! splitmark
//! splitmark --watch notes.md
//! splitmark --endpoint http://localhost:3001/api/markdown notes.md
//! splitmark --tokens notes.md
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use splitmark::app::App;
use splitmark::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use splitmark::files::import_from_file;
use splitmark::highlight::tokenize;

/// A split-pane terminal markdown editor with live highlighting and remote preview
#[derive(Parser, Debug)]
#[command(name = "splitmark", version, about, long_about = None)]
struct Cli {
    /// Markdown file to import at startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Render service URL
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Quiet period after the last edit before rendering
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Give up on a render request after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Reimport the file when it changes on disk
    #[arg(short, long)]
    watch: bool,

    /// Keep the last good preview when a render fails
    #[arg(long)]
    keep_preview_on_error: bool,

    /// Directory exports are written to
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Write log events to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the highlight segments of FILE as JSON and exit
    #[arg(long, requires = "file")]
    tokens: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        // The terminal UI owns the screen; only errors reach stderr.
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::ERROR.into()),
            )
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn print_tokens(path: &Path) -> Result<()> {
    let text = import_from_file(path)?;
    let lines = tokenize(&text);
    let json = serde_json::to_string_pretty(&lines).context("Failed to encode tokens")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;

    if cli.tokens
        && let Some(path) = cli.file.as_deref()
    {
        return print_tokens(path);
    }

    let settings = effective.resolve();
    tracing::info!(
        endpoint = %settings.endpoint,
        debounce = ?settings.debounce,
        watch = settings.watch,
        "starting editor"
    );

    let app = App::new(settings)
        .with_file(cli.file)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}

// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderError)
    clippy::module_name_repetitions
)]

//! # Splitmark
//!
//! A split-pane terminal markdown editor.
//!
//! The left pane is an editor whose lines are highlighted by a small set of
//! ordered regex rules. The right pane shows HTML produced by a remote
//! render service, requested after a quiet period following the last edit.
//!
//! ## Architecture
//!
//! Splitmark uses The Elm Architecture (TEA) pattern:
//! - **Model**: Editor state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop, state and side effects
//! - [`highlight`]: Line tokenizer for the editor pane
//! - [`editor`]: Text buffer behind the editor pane
//! - [`render`]: Remote render client and render bookkeeping
//! - [`preview`]: Rendered HTML to preview text
//! - [`files`]: Export and import
//! - [`clipboard`]: Clipboard access
//! - [`config`]: Saved defaults and settings
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: File watching

pub mod app;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod files;
pub mod highlight;
pub mod preview;
pub mod render;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, Session};
    pub use crate::highlight::{Segment, StyleTag, tokenize};
    pub use crate::render::{MarkdownRenderer, RenderError};
}

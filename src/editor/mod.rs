//! Text input for the editor pane.
//!
//! A rope-backed buffer with a byte-column cursor. The buffer is the input
//! widget; the authoritative document string lives in the model and is
//! replaced from the buffer after every edit.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};

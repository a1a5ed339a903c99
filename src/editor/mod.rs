//! Document store and undo/redo.
//!
//! [`ops`] holds the pure mutations, [`History`] the bounded snapshot log,
//! and [`Editor`] ties both to one document for the length of a session.

mod history;
pub mod ops;
mod options;
mod patch;
mod session;

pub use history::{History, DEFAULT_HISTORY_CAPACITY};
pub use options::EditorOptions;
pub use patch::BlockPatch;
pub use session::{Editor, EditorEvent};

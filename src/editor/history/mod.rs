//! Undo/Redo history for the editor.
//!
//! Every committed mutation appends a full deep copy of the document. Snapshots
//! are independent of the live document, so editing never alters stored history
//! and restoring never aliases history storage back into the document.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last action
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone action
//! - Clicking an entry in the history list jumps straight to it
//!
//! ## Module Structure
//!
//! - [`snapshot_history`] - SnapshotHistory log with cursor, truncation and cap

mod snapshot_history;

#[cfg(test)]
mod tests;

// Re-exports
pub use snapshot_history::SnapshotHistory;

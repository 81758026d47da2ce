//! Unit tests for the history module.

use crate::constants::MAX_HISTORY_SIZE;
use crate::document::{CanvasSize, Document, Layer, LayerRect};

use super::SnapshotHistory;

/// A document whose single layer sits at x = `marker`, so states are easy to tell apart.
fn doc_with_marker(marker: f32) -> Document {
    let mut doc = Document::new(CanvasSize::default());
    doc.insert_at_top(Layer::image(
        "/tmp/a.png",
        LayerRect::new(marker, 0.0, 50.0, 50.0),
    ));
    doc
}

fn marker(doc: &Document) -> f32 {
    doc.get(0).map(|l| l.rect.x).unwrap_or(f32::NAN)
}

#[test]
fn test_history_push() {
    let mut history = SnapshotHistory::default();
    assert!(history.is_empty());
    assert_eq!(history.cursor(), None);
    assert!(!history.can_undo());

    history.push(&doc_with_marker(1.0), "Add image");
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), Some(0));
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_undo_at_first_entry_is_noop() {
    let mut history = SnapshotHistory::default();
    history.push(&doc_with_marker(1.0), "a");
    assert!(history.undo().is_none());
    assert_eq!(history.cursor(), Some(0));
}

#[test]
fn test_undo_then_redo_restores_same_state() {
    let mut history = SnapshotHistory::default();
    history.push(&doc_with_marker(1.0), "a");
    history.push(&doc_with_marker(2.0), "b");
    history.push(&doc_with_marker(3.0), "c");

    assert_eq!(history.undo().map(marker), Some(2.0));
    assert_eq!(history.redo().map(marker), Some(3.0));
    assert!(history.redo().is_none());
    assert_eq!(history.cursor(), Some(2));
}

#[test]
fn test_push_after_undo_truncates_redo_tail() {
    let mut history = SnapshotHistory::default();
    history.push(&doc_with_marker(1.0), "a");
    history.push(&doc_with_marker(2.0), "b");
    history.push(&doc_with_marker(3.0), "c");

    history.undo();
    history.undo();
    history.push(&doc_with_marker(9.0), "d");

    assert_eq!(history.len(), 2);
    assert!(!history.can_redo());
    assert_eq!(history.undo().map(marker), Some(1.0));
    assert_eq!(history.redo().map(marker), Some(9.0));
}

#[test]
fn test_history_max_size() {
    let mut history = SnapshotHistory::default();

    // Push more than max size
    for i in 0..(MAX_HISTORY_SIZE + 10) {
        history.push(&doc_with_marker(i as f32), format!("step {}", i));
    }

    // Should be trimmed to max size
    assert_eq!(history.len(), MAX_HISTORY_SIZE);
    assert_eq!(history.cursor(), Some(MAX_HISTORY_SIZE - 1));

    // Walking back reaches the oldest retained state, not the true origin
    let mut last = None;
    for _ in 0..(MAX_HISTORY_SIZE - 1) {
        last = history.undo().map(marker);
    }
    assert_eq!(last, Some(10.0));
    assert!(history.undo().is_none());
}

#[test]
fn test_restore_at() {
    let mut history = SnapshotHistory::default();
    for i in 0..5 {
        history.push(&doc_with_marker(i as f32), "step");
    }
    assert_eq!(history.restore_at(1).map(marker), Some(1.0));
    assert_eq!(history.cursor(), Some(1));
    assert!(history.restore_at(5).is_none());
    assert_eq!(history.cursor(), Some(1));
}

#[test]
fn test_snapshots_are_independent_of_live_document() {
    let mut history = SnapshotHistory::default();
    let mut live = doc_with_marker(1.0);
    history.push(&live, "a");

    if let Some(layer) = live.get_mut(0) {
        layer.rect.x = 500.0;
    }

    assert_eq!(marker(&history.entries()[0].document), 1.0);
}

#[test]
fn test_descriptions_are_kept() {
    let mut history = SnapshotHistory::default();
    history.push(&doc_with_marker(1.0), "Add text");
    history.push(&doc_with_marker(2.0), "Move");
    let descriptions: Vec<&str> = history
        .entries()
        .iter()
        .map(|s| s.description.as_str())
        .collect();
    assert_eq!(descriptions, ["Add text", "Move"]);
}

#[test]
fn test_clear() {
    let mut history = SnapshotHistory::default();
    history.push(&doc_with_marker(1.0), "a");
    history.clear();
    assert!(history.is_empty());
    assert_eq!(history.cursor(), None);
}

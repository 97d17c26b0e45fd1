use schemkit_core::HistoryError;
use schemkit_designer::{UndoManager, UndoSnapshot};

fn snapshot(text: &str) -> UndoSnapshot {
    UndoSnapshot::new(text, true, None)
}

#[test]
fn test_undo_returns_state_before_last_push() {
    let mut manager = UndoManager::new();
    manager.push(snapshot("base"));
    manager.push(snapshot("A"));
    manager.push(snapshot("B"));

    assert_eq!(manager.undo().unwrap().text, "A");
    assert_eq!(manager.redo().unwrap().text, "B");
    assert!(!manager.can_redo());
}

#[test]
fn test_push_after_undo_discards_redo_tail() {
    let mut manager = UndoManager::new();
    manager.push(snapshot("base"));
    manager.push(snapshot("A"));
    manager.push(snapshot("B"));
    manager.undo().unwrap();
    manager.push(snapshot("C"));

    assert_eq!(manager.redo_count(), 0);
    assert_eq!(manager.redo().unwrap_err(), HistoryError::NothingToRedo);
    assert_eq!(manager.undo().unwrap().text, "A");
    assert_eq!(manager.undo().unwrap().text, "base");
    assert_eq!(manager.undo().unwrap_err(), HistoryError::NothingToUndo);
}

#[test]
fn test_counts_track_pointer() {
    let mut manager = UndoManager::with_depth(10);
    assert!(manager.is_empty());
    for text in ["a", "b", "c"] {
        manager.push(snapshot(text));
    }
    assert_eq!(manager.undo_count(), 2);
    manager.undo().unwrap();
    assert_eq!(manager.undo_count(), 1);
    assert_eq!(manager.redo_count(), 1);
    manager.clear();
    assert!(!manager.can_undo());
    assert_eq!(manager.current(), None);
}

#[test]
fn test_zero_depth_keeps_one_entry() {
    let mut manager = UndoManager::with_depth(0);
    manager.push(snapshot("a"));
    manager.push(snapshot("b"));
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.current().unwrap().text, "b");
}

use officebasic_core::{MacroModule, MacroWorkspace, ModuleKind};
use std::time::{Duration, Instant};

fn workspace() -> MacroWorkspace {
    MacroWorkspace::new(vec![
        MacroModule::with_source("Module1", ModuleKind::Standard, "Dim x", Vec::new()),
        MacroModule::with_source("Module2", ModuleKind::Standard, "Dim y", Vec::new()),
    ])
}

#[test]
fn test_three_keystrokes_in_window_are_one_undo_step() {
    let mut ws = workspace();
    let t0 = Instant::now();

    ws.record_edit("Module1", "Dim xa", 6, t0);
    ws.record_edit("Module1", "Dim xab", 7, t0 + Duration::from_millis(60));
    ws.record_edit("Module1", "Dim xabc", 8, t0 + Duration::from_millis(120));

    assert_eq!(ws.undo_depth(), 1);
    assert_eq!(ws.effective_source("Module1"), Some("Dim xabc"));

    // One undo restores the pre-edit buffer exactly.
    assert_eq!(ws.undo(), Some(0));
    assert_eq!(ws.effective_source("Module1"), Some("Dim x"));
}

#[test]
fn test_undo_then_redo_round_trip() {
    let mut ws = workspace();
    let t0 = Instant::now();

    ws.record_edit("Module1", "Dim x1", 6, t0);
    ws.flush_pending();
    ws.record_edit("Module1", "Dim x12", 7, t0 + Duration::from_secs(1));

    assert_eq!(ws.undo_depth(), 2);
    assert_eq!(ws.undo(), Some(6));
    assert_eq!(ws.effective_source("Module1"), Some("Dim x1"));
    assert_eq!(ws.redo(), Some(7));
    assert_eq!(ws.effective_source("Module1"), Some("Dim x12"));
    assert!(!ws.can_redo());
}

#[test]
fn test_pause_beyond_window_opens_new_step() {
    let mut ws = workspace();
    let t0 = Instant::now();

    ws.record_edit("Module1", "Dim xa", 6, t0);
    ws.record_edit("Module1", "Dim xab", 7, t0 + Duration::from_secs(2));

    assert_eq!(ws.undo_depth(), 2);
}

#[test]
fn test_timer_flush_closes_batch_without_mutating_present() {
    let mut ws = workspace();
    let t0 = Instant::now();

    ws.record_edit("Module1", "Dim xa", 6, t0);
    let before = ws.effective_source("Module1").unwrap().to_string();

    assert!(ws.flush_if_expired(t0 + Duration::from_millis(400)));
    assert_eq!(ws.effective_source("Module1").unwrap(), before);

    // The keystroke after the flush is "first" again.
    ws.record_edit("Module1", "Dim xab", 7, t0 + Duration::from_millis(450));
    assert_eq!(ws.undo_depth(), 2);
}

#[test]
fn test_per_module_batches_are_independent() {
    let mut ws = workspace();
    let t0 = Instant::now();

    // Interleaved edits to two modules never merge into one step.
    ws.record_edit("Module1", "Dim xa", 6, t0);
    ws.record_edit("Module2", "Dim ya", 6, t0 + Duration::from_millis(10));
    ws.record_edit("Module1", "Dim xab", 7, t0 + Duration::from_millis(20));

    assert_eq!(ws.undo_depth(), 3);
    assert_eq!(ws.effective_source("Module1"), Some("Dim xab"));
    assert_eq!(ws.effective_source("Module2"), Some("Dim ya"));
}

#[test]
fn test_undo_restores_cursor_for_active_module() {
    let mut ws = workspace();
    let t0 = Instant::now();

    ws.record_edit("Module1", "Dim xyz", 7, t0);
    ws.flush_pending();
    ws.record_edit("Module1", "Dim xyz!", 8, t0 + Duration::from_secs(1));

    // Undo lands on the snapshot whose Module1 entry carried cursor 7.
    assert_eq!(ws.undo(), Some(7));
    // Undo to pristine: no entry for the active module, cursor defaults to 0.
    assert_eq!(ws.undo(), Some(0));
    assert_eq!(ws.undo(), None);
}

#[test]
fn test_explicit_flush_before_undo_is_implicit() {
    let mut ws = workspace();
    let t0 = Instant::now();

    // Undo in the middle of a live batch must not lose the batch.
    ws.record_edit("Module1", "Dim xa", 6, t0);
    assert_eq!(ws.undo(), Some(0));
    assert_eq!(ws.effective_source("Module1"), Some("Dim x"));

    // And the next edit is a fresh step, not a continuation.
    ws.record_edit("Module1", "Dim xq", 6, t0 + Duration::from_millis(10));
    assert_eq!(ws.effective_source("Module1"), Some("Dim xq"));
    assert!(!ws.can_redo());
}

#[test]
fn test_module_rename_is_undoable_boundary() {
    let mut ws = workspace();
    let t0 = Instant::now();

    ws.record_edit("Module1", "edited", 6, t0);
    assert!(ws.rename_module("Module1", "Main"));
    assert_eq!(ws.effective_source("Main"), Some("edited"));
    assert_eq!(ws.undo_depth(), 2);

    // Undo of the rename snapshot restores the overlay under the old key,
    // so the renamed module reads as pristine again.
    assert_eq!(ws.undo(), Some(0));
    assert_eq!(ws.effective_source("Main"), Some("Dim x"));

    // Redo brings the moved overlay entry back.
    assert_eq!(ws.redo(), Some(6));
    assert_eq!(ws.effective_source("Main"), Some("edited"));
}

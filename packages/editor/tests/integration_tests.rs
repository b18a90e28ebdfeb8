//! Integration tests for editor crate

use std::path::Path;
use wiredit_common::{ErrorKind, RealFileSystem};
use wiredit_editor::{
    DocumentIO, EditorError, FileName, GuardConfig, ReconciliationGuard, RejectReason,
    Reconciliation, DEFAULT_TEMPLATE,
};

#[test]
fn test_edit_save_reload_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let io = DocumentIO::new(RealFileSystem);
    let mut guard = ReconciliationGuard::new(GuardConfig::default());

    // Edit the template
    let edited = format!("{DEFAULT_TEMPLATE}\n# reviewed");
    assert!(guard.on_user_edit(edited.clone()).recorded());
    assert!(guard.document().is_dirty());

    // Save under the default name
    let (name, path) = io.save(guard.document(), dir.path()).unwrap();
    guard.mark_saved(name);
    assert!(!guard.document().is_dirty());
    assert!(path.ends_with("wiring-diagram.yml"));

    // Reload starts a fresh history
    let loaded = io.load(&path).unwrap();
    guard.on_file_load(loaded);
    assert_eq!(guard.text(), edited);
    assert!(!guard.can_undo());
    assert!(!guard.can_redo());
}

#[test]
fn test_rejected_extension_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("harness.json");
    std::fs::write(&json, "{}").unwrap();

    let io = DocumentIO::new(RealFileSystem);
    let mut guard = ReconciliationGuard::new(GuardConfig::default());
    guard.on_user_edit("D1");

    let err = io.load(&json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(guard.text(), "D1");
    assert_eq!(guard.history().len(), 2);
}

#[test]
fn test_rename_then_save_uses_normalized_name() {
    let dir = tempfile::tempdir().unwrap();
    let io = DocumentIO::new(RealFileSystem);
    let mut guard = ReconciliationGuard::new(GuardConfig::default());

    let name = FileName::normalize(" loom ").unwrap();
    guard.rename(name);

    let (name, path) = io.save(guard.document(), dir.path()).unwrap();
    assert_eq!(name.as_str(), "loom.yml");
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        DEFAULT_TEMPLATE
    );
}

#[test]
fn test_assistant_round_trip_with_undo() {
    let mut guard = ReconciliationGuard::new(GuardConfig {
        history_capacity: 3,
        ..GuardConfig::default()
    });

    guard.on_user_edit("D1");
    guard.on_user_edit("D2");
    assert_eq!(
        guard.on_external_push("D3"),
        Reconciliation::Accepted {
            changed: true,
            recorded: true
        }
    );
    guard.on_user_edit("D4");

    // Capacity 3 keeps only the last three snapshots
    assert_eq!(
        guard.history().entries(),
        &["D2".to_string(), "D3".to_string(), "D4".to_string()]
    );
    assert_eq!(guard.undo().unwrap(), "D3");

    // Re-sending the same assistant answer is a duplicate
    assert_eq!(
        guard.on_external_push("D3"),
        Reconciliation::Rejected(RejectReason::Unchanged)
    );
    guard.redo().unwrap();
    assert_eq!(
        guard.on_external_push("D3"),
        Reconciliation::Rejected(RejectReason::Duplicate)
    );
}

#[test]
fn test_redo_past_end_is_noop_kind() {
    let mut guard = ReconciliationGuard::new(GuardConfig::default());
    let err = guard.redo().unwrap_err();
    assert!(matches!(err, EditorError::NoOp(_)));
    assert_eq!(err.kind(), ErrorKind::NoOp);
    assert!(!err.kind().is_user_visible());
}

#[test]
fn test_missing_file_is_reported() {
    let io = DocumentIO::new(RealFileSystem);
    let err = io.load(Path::new("/definitely/not/here.yml")).unwrap_err();
    assert!(matches!(err, EditorError::FileSystem(_)));
}

use statclean_test_utils::loaded_controller;
use statclean_workflow::activity::verify_entries;
use statclean_workflow::{LogIntegrityError, WorkflowHandle};

#[test]
fn test_log_integrity() {
    let mut controller = loaded_controller();
    controller.advance_step().unwrap();
    controller
        .record_activity("Missing value imputation", "KNN method applied to 2 missing values")
        .unwrap();
    controller
        .record_activity("Outlier detection", "Z-Score method detected 1 outlier in income column")
        .unwrap();
    controller.retreat_step();

    assert!(controller.verify_integrity().is_ok());
    let seqs: Vec<u64> = controller.activity_log().iter().map(|e| e.seq).collect();
    assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_tampered_export_is_detected() {
    let handle = WorkflowHandle::new();
    handle.record_activity("Data validation", "All validation rules passed successfully").unwrap();
    handle.record_activity("Results export", "Statistical results exported to CSV").unwrap();

    let mut exported = handle.activity_log();
    assert!(verify_entries(&exported).is_ok());

    exported[1].action = "Results deleted".to_string();
    assert_eq!(
        verify_entries(&exported),
        Err(LogIntegrityError::HashMismatch { seq: 1 })
    );
}

#[test]
fn test_reordered_export_is_detected() {
    let handle = WorkflowHandle::new();
    handle.record_activity("a", "").unwrap();
    handle.record_activity("b", "").unwrap();

    let mut exported = handle.activity_log();
    exported.swap(0, 1);
    assert!(verify_entries(&exported).is_err());
}

#[test]
fn test_log_serializes_to_json() {
    let controller = loaded_controller();
    let json = serde_json::to_value(controller.activity_log()).unwrap();
    let first = &json[0];
    assert_eq!(first["action"], "Demo data loaded");
    assert_eq!(first["step"], 1);
    assert_eq!(first["seq"], 0);
}

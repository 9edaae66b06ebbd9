mod common;

use common::deadlocked_pair;
use resolock::{Resolock, detect};
use serde_json::Value;

#[test]
fn test_analysis_events_are_logged_as_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resolock.log");

    Resolock::new()
        .with_log(&path)
        .start()
        .expect("Failed to initialize logger");

    let model = deadlocked_pair();
    let result = detect(&model);
    assert!(result.deadlock);

    let contents = std::fs::read_to_string(&path).unwrap();
    let entries: Vec<Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is one JSON object"))
        .collect();

    assert!(!entries.is_empty());
    // Model construction logs node and edge events, detection logs the outcome
    assert!(entries.iter().any(|e| e["event"] == "NodeAdded"));
    assert!(entries.iter().any(|e| e["event"] == "EdgeAdded"));
    let outcome = entries
        .iter()
        .find(|e| e["event"] == "DeadlockDetected")
        .expect("the detection outcome is logged");
    assert_eq!(outcome["subject"], "P1 -> P2");
    assert!(outcome["timestamp"].as_f64().unwrap() > 0.0);
}

//! Golden runner integration tests
//!
//! Captures snapshots, records a response transcript on disk and replays it
//! through the runner.

use std::fs;

use mcpdrift::client::{GoldenRunner, ReplayInvoker, ToolInvoker};
use mcpdrift::drift::DriftSeverity;
use mcpdrift::golden::{ComparisonMode, DifferenceType, GoldenSnapshot, GoldenStore, Tolerance};
use serde_json::json;
use tempfile::tempdir;

fn store() -> GoldenStore {
    let mut store = GoldenStore::default();
    store.upsert(GoldenSnapshot::capture(
        "weather",
        json!({ "city": "Oslo" }),
        r#"{"temp": 4, "requestId": "123e4567-e89b-12d3-a456-426614174000"}"#,
        Tolerance::with_mode(ComparisonMode::Exact),
    ));
    store.upsert(GoldenSnapshot::capture(
        "search",
        json!({ "q": "rust" }),
        r#"{"hits": [{"title": "a"}], "meta": {"took": 3}}"#,
        Tolerance::default().allow("$.meta.*"),
    ));
    store.upsert(GoldenSnapshot::capture(
        "flaky",
        json!({}),
        "ok",
        Tolerance::default(),
    ));
    store
}

const TRANSCRIPT: &str = r#"[
    {
        "toolName": "weather",
        "inputArgs": {"city": "Oslo"},
        "result": {"content": [{"type": "text",
            "text": "{\"temp\": 4, \"requestId\": \"9f1c2d3e-0000-4a5b-8c9d-abcdefabcdef\"}"}]}
    },
    {
        "toolName": "search",
        "inputArgs": {"q": "rust"},
        "result": {"content": [{"type": "text",
            "text": "{\"hits\": [{\"title\": \"b\"}], \"meta\": {\"took\": 3, \"cached\": true}}"}]}
    },
    {
        "toolName": "flaky",
        "inputArgs": {},
        "result": {"content": [{"type": "text", "text": "boom"}], "isError": true}
    }
]"#;

#[tokio::test]
async fn test_check_all_from_transcript_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("responses.json");
    fs::write(&path, TRANSCRIPT).unwrap();

    let invoker = ReplayInvoker::load(&path).unwrap();
    assert_eq!(invoker.invoker_type(), "replay");

    let checks = GoldenRunner::check_all(&invoker, &store()).await;
    assert_eq!(checks.len(), 3);

    // UUIDs are redacted before the exact comparison
    let weather = &checks[0];
    assert_eq!(weather.tool_name, "weather");
    assert!(weather.result.passed, "{:?}", weather.result.differences);

    // Only an allowed addition under $.meta; the title value change is ignored structurally
    let search = &checks[1];
    assert_eq!(search.result.differences.len(), 1);
    assert_eq!(search.result.differences[0].path, "$.meta.cached");
    assert!(search.result.differences[0].allowed);
    assert_eq!(search.severity(), DriftSeverity::None);

    // An error result degrades only its own check
    let flaky = &checks[2];
    assert_eq!(flaky.severity(), DriftSeverity::Breaking);
    assert_eq!(flaky.result.differences[0].kind, DifferenceType::Changed);
    assert!(flaky.error.as_deref().unwrap().contains("boom"));

    assert_eq!(GoldenRunner::worst(&checks), DriftSeverity::Breaking);
    assert!(GoldenRunner::worst(&checks).meets(DriftSeverity::Warning));
}

#[tokio::test]
async fn test_missing_transcript_entry_is_breaking() {
    let invoker = ReplayInvoker::from_entries(Vec::new());
    let checks = GoldenRunner::check_all(&invoker, &store()).await;

    assert_eq!(checks.len(), 3);
    assert!(checks
        .iter()
        .all(|c| c.severity() == DriftSeverity::Breaking && c.error.is_some()));
}

#[test]
fn test_missing_transcript_file_is_error() {
    let dir = tempdir().unwrap();
    assert!(ReplayInvoker::load(dir.path().join("nope.json")).is_err());
}

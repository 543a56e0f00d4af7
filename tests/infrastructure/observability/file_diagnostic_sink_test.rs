use serde_json::Value;

use vid2mvp::application::ports::DiagnosticSink;
use vid2mvp::domain::{DiagnosticEvent, DiagnosticOutcome, RunId};
use vid2mvp::infrastructure::observability::FileDiagnosticSink;

fn read_lines(path: &std::path::Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn given_events_when_recording_then_appends_one_json_line_each() {
    let dir = tempfile::TempDir::new().unwrap();
    let sink = FileDiagnosticSink::new(dir.path().join("logs"));
    let run_id = RunId::new();

    sink.record(DiagnosticEvent::new(
        run_id,
        "captions",
        "captions/en",
        DiagnosticOutcome::Failed("status 404".to_string()),
    ))
    .await;
    sink.record(DiagnosticEvent::new(
        run_id,
        "captions",
        "http",
        DiagnosticOutcome::Succeeded,
    ))
    .await;

    let lines = read_lines(&sink.log_path(&run_id));
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["run_id"], run_id.to_string());
    assert_eq!(lines[0]["strategy"], "captions/en");
    assert_eq!(lines[0]["outcome"], "failed");
    assert_eq!(lines[0]["detail"], "status 404");
    assert_eq!(lines[1]["outcome"], "succeeded");
    assert!(lines[1]["detail"].is_null());
}

#[tokio::test]
async fn given_two_runs_when_recording_then_each_run_has_its_own_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let sink = FileDiagnosticSink::new(dir.path());
    let first = RunId::new();
    let second = RunId::new();

    sink.record(DiagnosticEvent::new(first, "pipeline", "status", DiagnosticOutcome::Note("QUEUED".to_string())))
        .await;
    sink.record(DiagnosticEvent::new(second, "pipeline", "status", DiagnosticOutcome::Note("QUEUED".to_string())))
        .await;

    assert_eq!(read_lines(&sink.log_path(&first)).len(), 1);
    assert_eq!(read_lines(&sink.log_path(&second)).len(), 1);
    assert_eq!(
        sink.log_path(&first),
        dir.path().join(format!("{}.log", first))
    );
}

#[tokio::test]
async fn given_unwritable_directory_when_recording_then_does_not_panic() {
    let dir = tempfile::TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();
    let sink = FileDiagnosticSink::new(blocker.join("logs"));
    let run_id = RunId::new();

    sink.record(DiagnosticEvent::new(run_id, "pipeline", "status", DiagnosticOutcome::Missed))
        .await;

    assert!(!sink.log_path(&run_id).exists());
}

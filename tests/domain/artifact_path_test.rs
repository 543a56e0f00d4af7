use std::str::FromStr;

use vid2mvp::domain::{ArtifactPath, RunId, RunStatus};

#[test]
fn given_run_id_when_building_path_then_prefixes_with_run() {
    let run_id = RunId::new();
    let path = ArtifactPath::new(&run_id, "spec.json");

    assert_eq!(path.as_str(), format!("{}/spec.json", run_id.as_uuid()));
    assert_eq!(path.to_string(), path.as_str());
}

#[test]
fn given_two_runs_when_building_paths_then_they_do_not_collide() {
    let a = ArtifactPath::new(&RunId::new(), "transcript.txt");
    let b = ArtifactPath::new(&RunId::new(), "transcript.txt");
    assert_ne!(a, b);
}

#[test]
fn given_status_labels_when_parsing_then_round_trip() {
    for status in [
        RunStatus::Queued,
        RunStatus::Processing,
        RunStatus::Complete,
        RunStatus::Failed,
    ] {
        assert_eq!(RunStatus::from_str(status.as_str()), Ok(status));
    }
    assert!(RunStatus::from_str("DONE").is_err());
}

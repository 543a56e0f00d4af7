use std::collections::HashMap;
use std::time::Duration;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use vid2mvp::application::ports::{CaptionError, TimedTextSource, TrackKind};
use vid2mvp::domain::VideoId;
use vid2mvp::infrastructure::captions::TimedTextClient;

const CAPTIONS_XML: &str = r#"<transcript><text start="0" dur="1">auto &amp;amp; generated</text><text start="1" dur="1">second</text></transcript>"#;

async fn start_mock_timed_text_server() -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/api/timedtext",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("v").map(String::as_str) != Some("dQw4w9WgXcQ") {
                return (StatusCode::BAD_REQUEST, String::new()).into_response();
            }
            match (
                params.get("lang").map(String::as_str),
                params.get("kind").map(String::as_str),
            ) {
                (Some("en-US"), Some("asr")) => (StatusCode::OK, CAPTIONS_XML.to_string()).into_response(),
                (Some("en-GB"), _) => (StatusCode::NOT_FOUND, String::new()).into_response(),
                _ => (StatusCode::OK, String::new()).into_response(),
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/api/timedtext", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn video_id() -> VideoId {
    VideoId::from_url("https://youtu.be/dQw4w9WgXcQ").unwrap()
}

fn create_client(base_url: String) -> TimedTextClient {
    TimedTextClient::new(Some(base_url), "test-agent", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn given_auto_generated_track_when_fetching_then_sends_asr_kind_and_decodes_lines() {
    let (base_url, shutdown_tx) = start_mock_timed_text_server().await;
    let client = create_client(base_url);

    let lines = client
        .fetch_lines(&video_id(), "en-US", TrackKind::AutoGenerated)
        .await
        .unwrap();

    assert_eq!(lines, vec!["auto & generated", "second"]);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_manual_track_when_fetching_then_kind_is_not_sent() {
    let (base_url, shutdown_tx) = start_mock_timed_text_server().await;
    let client = create_client(base_url);

    let lines = client
        .fetch_lines(&video_id(), "en-US", TrackKind::Manual)
        .await
        .unwrap();

    assert!(lines.is_empty());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_fetching_then_returns_api_error() {
    let (base_url, shutdown_tx) = start_mock_timed_text_server().await;
    let client = create_client(base_url);

    let result = client
        .fetch_lines(&video_id(), "en-GB", TrackKind::Manual)
        .await;

    assert!(matches!(result, Err(CaptionError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_endpoint_when_fetching_then_returns_api_error() {
    let client = create_client("http://127.0.0.1:1/api/timedtext".to_string());

    let result = client
        .fetch_lines(&video_id(), "en", TrackKind::Manual)
        .await;

    assert!(matches!(result, Err(CaptionError::ApiRequestFailed(_))));
}

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use vid2mvp::application::ports::{CaptionError, CaptionService, TrackKind};
use vid2mvp::domain::VideoId;
use vid2mvp::infrastructure::captions::{YouTubeCaptionService, extract_caption_tracks};

const TRACK_XML: &str = r#"<transcript><text start="3.0" dur="1">later</text><text start="1.0" dur="1">earlier</text></transcript>"#;

fn watch_page(base_url: &str) -> String {
    format!(
        r#"<html><script>var ytInitialPlayerResponse = {{"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":[{{"baseUrl":"{base}/track?lang=en&fmt=srv1","name":{{"simpleText":"English"}},"languageCode":"en","isTranslatable":true}},{{"baseUrl":"{base}/track?lang=en&kind=asr","name":{{"runs":[{{"text":"English (auto-generated)"}}]}},"languageCode":"en","kind":"asr"}},{{"baseUrl":"{base}/empty","languageCode":"de"}}],"audioTracks":[]}}}}}};</script></html>"#,
        base = base_url
    )
}

async fn start_mock_watch_server() -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);
    let page = watch_page(&base_url);

    let app = Router::new()
        .route(
            "/watch",
            get(move || {
                let page = page.clone();
                async move { page }
            }),
        )
        .route("/track", get(|| async { TRACK_XML }))
        .route("/empty", get(|| async { "<transcript></transcript>" }))
        .route(
            "/blocked/watch",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down").into_response() }),
        );

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
    VideoId::from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap()
}

fn create_service(watch_url: String) -> YouTubeCaptionService {
    YouTubeCaptionService::new(Some(watch_url), "test-agent", Duration::from_secs(5)).unwrap()
}

#[test]
fn given_watch_page_when_extracting_tracks_then_kind_name_and_url_are_decoded() {
    let tracks = extract_caption_tracks(&watch_page("https://host")).unwrap();

    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[0].kind, TrackKind::Manual);
    assert_eq!(tracks[0].name.as_deref(), Some("English"));
    assert_eq!(tracks[0].url, "https://host/track?lang=en&fmt=srv1");
    assert_eq!(tracks[1].kind, TrackKind::AutoGenerated);
    assert_eq!(tracks[1].name.as_deref(), Some("English (auto-generated)"));
    assert_eq!(tracks[2].language_code, "de");
    assert_eq!(tracks[2].name, None);
}

#[test]
fn given_page_without_captions_when_extracting_tracks_then_returns_unavailable() {
    let result = extract_caption_tracks("<html>no captions here</html>");
    assert!(matches!(result, Err(CaptionError::Unavailable(_))));
}

#[test]
fn given_truncated_track_list_when_extracting_tracks_then_returns_invalid_response() {
    let result = extract_caption_tracks(r#""captionTracks":[{"baseUrl":"x""#);
    assert!(matches!(result, Err(CaptionError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_watch_page_when_listing_tracks_then_returns_advertised_tracks() {
    let (base_url, shutdown_tx) = start_mock_watch_server().await;
    let service = create_service(format!("{}/watch", base_url));

    let tracks = service.list_tracks(&video_id()).await.unwrap();

    assert_eq!(tracks.len(), 3);
    assert!(tracks[0].url.starts_with(&base_url));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_track_when_fetching_then_returns_timed_entries() {
    let (base_url, shutdown_tx) = start_mock_watch_server().await;
    let service = create_service(format!("{}/watch", base_url));
    let tracks = service.list_tracks(&video_id()).await.unwrap();

    let entries = service.fetch_track(&tracks[0]).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "later");
    assert_eq!(entries[1].start_secs, 1.0);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_track_when_fetching_then_returns_invalid_response() {
    let (base_url, shutdown_tx) = start_mock_watch_server().await;
    let service = create_service(format!("{}/watch", base_url));
    let tracks = service.list_tracks(&video_id()).await.unwrap();

    let result = service.fetch_track(&tracks[2]).await;

    assert!(matches!(result, Err(CaptionError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_throttled_watch_page_when_listing_then_returns_api_error() {
    let (base_url, shutdown_tx) = start_mock_watch_server().await;
    let service = create_service(format!("{}/blocked/watch", base_url));

    let result = service.list_tracks(&video_id()).await;

    assert!(matches!(result, Err(CaptionError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

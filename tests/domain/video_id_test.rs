use vid2mvp::domain::VideoId;

#[test]
fn given_watch_url_when_extracting_then_returns_id() {
    let id = VideoId::from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
    assert_eq!(id.as_str(), "dQw4w9WgXcQ");
}

#[test]
fn given_short_link_when_extracting_then_returns_id() {
    let id = VideoId::from_url("https://youtu.be/dQw4w9WgXcQ?t=42").unwrap();
    assert_eq!(id.as_str(), "dQw4w9WgXcQ");
}

#[test]
fn given_embed_and_legacy_paths_when_extracting_then_returns_id() {
    for url in [
        "https://www.youtube.com/embed/dQw4w9WgXcQ",
        "https://www.youtube.com/v/dQw4w9WgXcQ?version=3",
        "https://www.youtube.com/shorts/dQw4w9WgXcQ",
    ] {
        assert_eq!(
            VideoId::from_url(url).map(|id| id.to_string()),
            Some("dQw4w9WgXcQ".to_string()),
            "url: {url}"
        );
    }
}

#[test]
fn given_v_parameter_after_other_params_when_extracting_then_returns_id() {
    let id = VideoId::from_url("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ").unwrap();
    assert_eq!(id.as_str(), "dQw4w9WgXcQ");
}

#[test]
fn given_unrecognized_url_when_extracting_then_returns_none() {
    assert!(VideoId::from_url("https://example.com/video/123").is_none());
    assert!(VideoId::from_url("not a url").is_none());
    assert!(VideoId::from_url("").is_none());
}

#[test]
fn given_too_short_identifier_when_extracting_then_returns_none() {
    assert!(VideoId::from_url("https://youtu.be/abc").is_none());
}

#[test]
fn given_six_character_identifier_when_extracting_then_returns_id() {
    let id = VideoId::from_url("https://www.youtube.com/embed/abc_12").unwrap();
    assert_eq!(id.as_str(), "abc_12");
}

#[test]
fn given_identifier_longer_than_eleven_when_extracting_then_keeps_whole_token() {
    let id = VideoId::from_url("https://youtu.be/dQw4w9WgXcQextra?si=x").unwrap();
    assert_eq!(id.as_str(), "dQw4w9WgXcQextra");
}

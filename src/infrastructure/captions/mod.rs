mod timed_text_client;
mod timed_text_parser;
mod youtube_caption_service;

pub use timed_text_client::{DEFAULT_TIMED_TEXT_URL, TimedTextClient};
pub use timed_text_parser::{TimedTextNode, non_empty_lines, parse_timed_text};
pub use youtube_caption_service::{DEFAULT_WATCH_URL, YouTubeCaptionService, extract_caption_tracks};

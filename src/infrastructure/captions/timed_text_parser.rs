use std::sync::LazyLock;

use regex::Regex;

static SELF_CLOSING_NODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<text\b[^>]*/>").unwrap());
static TEXT_NODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text\b([^>]*)>(.*?)</text>").unwrap());
static START_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bstart="([0-9.]+)""#).unwrap());
static DUR_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bdur="([0-9.]+)""#).unwrap());
static INLINE_MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// One `<text>` node of a timed-text document.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedTextNode {
    pub start_secs: f64,
    pub duration_secs: f64,
    pub text: String,
}

/// Extracts the `<text start=".." dur="..">` nodes in document order.
///
/// Node text is entity-decoded twice (the XML layer, then the HTML entities
/// the service embeds inside it), stripped of inline markup, flattened onto
/// one line and trimmed. Nodes left empty are kept so callers can see them;
/// use [`non_empty_lines`] for the text alone.
pub fn parse_timed_text(document: &str) -> Vec<TimedTextNode> {
    let document = SELF_CLOSING_NODE.replace_all(document, "");

    TEXT_NODE
        .captures_iter(&document)
        .map(|caps| {
            let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let raw = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            TimedTextNode {
                start_secs: parse_attr(&START_ATTR, attrs),
                duration_secs: parse_attr(&DUR_ATTR, attrs),
                text: clean_text(raw),
            }
        })
        .collect()
}

pub fn non_empty_lines(nodes: Vec<TimedTextNode>) -> Vec<String> {
    nodes
        .into_iter()
        .map(|n| n.text)
        .filter(|t| !t.is_empty())
        .collect()
}

fn parse_attr(pattern: &Regex, attrs: &str) -> f64 {
    pattern
        .captures(attrs)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

fn clean_text(raw: &str) -> String {
    let xml_decoded = html_escape::decode_html_entities(raw);
    let html_decoded = html_escape::decode_html_entities(&xml_decoded);
    let without_markup = INLINE_MARKUP.replace_all(&html_decoded, "");

    without_markup
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

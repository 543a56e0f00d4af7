use vid2mvp::infrastructure::captions::{non_empty_lines, parse_timed_text};

const DOCUMENT: &str = r##"<?xml version="1.0" encoding="utf-8" ?><transcript>
<text start="0.5" dur="2.1">Hello &amp;amp; welcome</text>
<text start="2.6" dur="1.9">it&amp;#39;s a
multi line cue</text>
<text start="4.5" dur="1"/>
<text start="5.5" dur="1.2"><font color="#E5E5E5">styled</font> words</text>
<text start="7" dur="0.5">   </text>
</transcript>"##;

#[test]
fn given_timed_text_document_when_parsing_then_nodes_keep_document_order_and_timing() {
    let nodes = parse_timed_text(DOCUMENT);

    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[0].start_secs, 0.5);
    assert_eq!(nodes[0].duration_secs, 2.1);
    assert_eq!(nodes[2].start_secs, 5.5);
}

#[test]
fn given_double_encoded_entities_when_parsing_then_text_is_fully_decoded() {
    let nodes = parse_timed_text(DOCUMENT);

    assert_eq!(nodes[0].text, "Hello & welcome");
    assert_eq!(nodes[1].text, "it's a multi line cue");
}

#[test]
fn given_inline_markup_when_parsing_then_tags_are_stripped() {
    let nodes = parse_timed_text(DOCUMENT);
    assert_eq!(nodes[2].text, "styled words");
}

#[test]
fn given_blank_nodes_when_collecting_lines_then_they_are_dropped() {
    let lines = non_empty_lines(parse_timed_text(DOCUMENT));
    assert_eq!(
        lines,
        vec!["Hello & welcome", "it's a multi line cue", "styled words"]
    );
}

#[test]
fn given_document_without_text_nodes_when_parsing_then_returns_empty() {
    assert!(parse_timed_text("<transcript></transcript>").is_empty());
    assert!(parse_timed_text("").is_empty());
}

#[test]
fn given_missing_timing_attributes_when_parsing_then_defaults_to_zero() {
    let nodes = parse_timed_text("<text>bare</text>");
    assert_eq!(nodes[0].start_secs, 0.0);
    assert_eq!(nodes[0].duration_secs, 0.0);
    assert_eq!(nodes[0].text, "bare");
}

//! Marked-text parsing for hint copy.
//!
//! Server-delivered hint strings mark emphasized spans with `[[...]]`.
//! Frontends receive the text pre-split into typed segments so styling
//! stays out of the rendering layer.

use serde::{Deserialize, Serialize};

/// Styling role of a text segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Plain copy rendered in the default style
    Normal,
    /// Emphasized span rendered in the highlight style
    Highlight,
}

/// One run of text with a single styling role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    /// Styling role
    pub kind: SegmentKind,
    /// Segment text with the markers stripped
    pub text: String,
}

impl TextSegment {
    /// Create a normal segment.
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Normal,
            text: text.into(),
        }
    }

    /// Create a highlighted segment.
    pub fn highlight(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Highlight,
            text: text.into(),
        }
    }
}

/// Split hint copy into normal and highlighted segments.
///
/// A marker is `[[` followed by a bracket-free span followed by `]]`; the
/// span becomes a [`SegmentKind::Highlight`] segment and the surrounding
/// text becomes [`SegmentKind::Normal`] segments. Text that only looks
/// like a marker (unterminated, or with brackets inside) is passed through
/// untouched as normal copy. Markers with empty spans are dropped entirely.
///
/// The result is never empty: when nothing survives the scan (empty input,
/// or input that is all empty markers) a single empty normal segment is
/// returned, which frontends rely on to render a stable (if blank) text
/// node.
pub fn parse_marked_text(input: &str) -> Vec<TextSegment> {
    let bytes = input.as_bytes();
    let mut segments = Vec::new();
    // `consumed` trails behind `search` so a failed marker candidate stays
    // part of the surrounding normal text.
    let mut consumed = 0;
    let mut search = 0;

    while let Some(rel) = find_open(&bytes[search..]) {
        let open = search + rel;
        let inner_start = open + 2;
        let mut inner_end = inner_start;
        while inner_end < bytes.len() && bytes[inner_end] != b'[' && bytes[inner_end] != b']' {
            inner_end += 1;
        }

        if bytes[inner_end..].starts_with(b"]]") {
            if consumed < open {
                segments.push(TextSegment::normal(&input[consumed..open]));
            }
            if inner_start < inner_end {
                segments.push(TextSegment::highlight(&input[inner_start..inner_end]));
            }
            consumed = inner_end + 2;
            search = consumed;
        } else {
            // Not a marker after all; a later `[[` may still open one.
            search = open + 1;
        }
    }

    if consumed < input.len() {
        segments.push(TextSegment::normal(&input[consumed..]));
    }
    if segments.is_empty() {
        segments.push(TextSegment::normal(""));
    }
    segments
}

/// Byte offset of the next `[[`, if any. Both brackets are ASCII, so byte
/// positions found here are always char boundaries of the UTF-8 input.
fn find_open(haystack: &[u8]) -> Option<usize> {
    haystack.windows(2).position(|w| w == b"[[")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_single_empty_segment() {
        assert_eq!(parse_marked_text(""), vec![TextSegment::normal("")]);
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(
            parse_marked_text("no markers here"),
            vec![TextSegment::normal("no markers here")]
        );
    }

    #[test]
    fn test_marker_splits_surrounding_text() {
        assert_eq!(
            parse_marked_text("a [[b]] c"),
            vec![
                TextSegment::normal("a "),
                TextSegment::highlight("b"),
                TextSegment::normal(" c"),
            ]
        );
    }

    #[test]
    fn test_adjacent_markers() {
        assert_eq!(
            parse_marked_text("[[x]][[y]]"),
            vec![TextSegment::highlight("x"), TextSegment::highlight("y")]
        );
    }

    #[test]
    fn test_empty_marker_is_dropped() {
        assert_eq!(parse_marked_text("[[]]"), vec![TextSegment::normal("")]);
        assert_eq!(
            parse_marked_text("a[[]]b"),
            vec![TextSegment::normal("a"), TextSegment::normal("b")]
        );
        assert_eq!(parse_marked_text("x[[]]"), vec![TextSegment::normal("x")]);
    }

    #[test]
    fn test_extra_opening_bracket_shifts_the_match() {
        assert_eq!(
            parse_marked_text("[[[x]]"),
            vec![TextSegment::normal("["), TextSegment::highlight("x")]
        );
    }

    #[test]
    fn test_bracket_inside_span_disqualifies_the_marker() {
        assert_eq!(
            parse_marked_text("[[a]b]]"),
            vec![TextSegment::normal("[[a]b]]")]
        );
    }

    #[test]
    fn test_reopened_marker_matches_the_inner_pair() {
        assert_eq!(
            parse_marked_text("[[a[[b]]"),
            vec![TextSegment::normal("[[a"), TextSegment::highlight("b")]
        );
    }

    #[test]
    fn test_unterminated_marker_is_normal_text() {
        assert_eq!(parse_marked_text("[[abc"), vec![TextSegment::normal("[[abc")]);
        assert_eq!(
            parse_marked_text("tail [[end"),
            vec![TextSegment::normal("tail [[end")]
        );
    }

    #[test]
    fn test_marker_at_end_of_input() {
        assert_eq!(
            parse_marked_text("tail [[end]]"),
            vec![TextSegment::normal("tail "), TextSegment::highlight("end")]
        );
    }

    #[test]
    fn test_multibyte_text_around_markers() {
        assert_eq!(
            parse_marked_text("héllo [[wörld]] 🎉"),
            vec![
                TextSegment::normal("héllo "),
                TextSegment::highlight("wörld"),
                TextSegment::normal(" 🎉"),
            ]
        );
    }

    #[test]
    fn test_segment_serializes_with_kind_tag() {
        let json = serde_json::to_string(&TextSegment::highlight("now")).unwrap();
        assert!(json.contains("\"highlight\""));
    }
}

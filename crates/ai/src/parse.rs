//! Parsing of the loosely-structured AI composition response.
//!
//! The generation prompt asks the model for a response in the literal
//! `Subject: <line>\nContent: <rest>` format; [`parse_composed_email`]
//! extracts the two fields without ever guessing. The regexes are ad hoc
//! by necessity -- keeping them behind pure functions makes them testable
//! without touching the network.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::client::AiError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fallback subject when the model returns an empty `Subject:` capture.
pub const DEFAULT_SUBJECT: &str = "Your email is ready";

/// Fallback body when the model returns an empty `Content:` capture.
pub const DEFAULT_CONTENT: &str =
    "Sorry, the content could not be generated. Please try again.";

/// Everything between `Subject:` and the next `Content:` marker,
/// non-greedy, spanning lines.
static SUBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Subject:(.*?)Content:").expect("valid regex"));

/// Everything after `Content:` to the end of the response.
static CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Content:(.*)").expect("valid regex"));

/// Code-fence markers, with an optional language tag.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("```(?:html|json|text)?").expect("valid regex"));

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A generated subject/content pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedEmail {
    pub subject: String,
    pub content: String,
}

/// Parse a raw model response into a subject/content pair.
///
/// Both markers must be present; a response missing either fails with
/// [`AiError::Format`] rather than being patched up. Captures are
/// trimmed; an empty capture falls back to [`DEFAULT_SUBJECT`] /
/// [`DEFAULT_CONTENT`].
pub fn parse_composed_email(raw: &str) -> Result<GeneratedEmail, AiError> {
    let subject = SUBJECT_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .ok_or_else(|| {
            AiError::Format("response is missing the Subject:/Content: markers".to_string())
        })?
        .as_str()
        .trim();

    let content = CONTENT_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .ok_or_else(|| AiError::Format("response is missing the Content: marker".to_string()))?
        .as_str()
        .trim();

    Ok(GeneratedEmail {
        subject: if subject.is_empty() {
            DEFAULT_SUBJECT.to_owned()
        } else {
            subject.to_owned()
        },
        content: if content.is_empty() {
            DEFAULT_CONTENT.to_owned()
        } else {
            content.to_owned()
        },
    })
}

/// Strip residual code-fence markers from an improve-content response.
///
/// The improvement prompt forbids fences, but models add them anyway.
pub fn strip_code_fences(raw: &str) -> String {
    FENCE_RE.replace_all(raw, "").trim().to_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_the_documented_format() {
        let email = parse_composed_email("Subject: Hi\nContent: <p>ok</p>").unwrap();
        assert_eq!(email.subject, "Hi");
        assert_eq!(email.content, "<p>ok</p>");
    }

    #[test]
    fn subject_capture_spans_lines() {
        let email =
            parse_composed_email("Subject: Hello\nthere\nContent: <p>body</p>").unwrap();
        assert_eq!(email.subject, "Hello\nthere");
        assert_eq!(email.content, "<p>body</p>");
    }

    #[test]
    fn content_runs_to_end_of_response() {
        let email =
            parse_composed_email("Subject: S\nContent: line one\nline two").unwrap();
        assert_eq!(email.content, "line one\nline two");
    }

    #[test]
    fn missing_content_marker_is_a_format_error() {
        let result = parse_composed_email("Subject: only a subject");
        assert_matches!(result, Err(AiError::Format(_)));
    }

    #[test]
    fn missing_subject_marker_is_a_format_error() {
        let result = parse_composed_email("Content: only content");
        assert_matches!(result, Err(AiError::Format(_)));
    }

    #[test]
    fn freeform_response_is_a_format_error() {
        let result = parse_composed_email("Sure! Here's a draft for you.");
        assert_matches!(result, Err(AiError::Format(_)));
    }

    #[test]
    fn empty_subject_capture_falls_back() {
        let email = parse_composed_email("Subject:\nContent: <p>ok</p>").unwrap();
        assert_eq!(email.subject, DEFAULT_SUBJECT);
    }

    #[test]
    fn empty_content_capture_falls_back() {
        let email = parse_composed_email("Subject: Hi\nContent:").unwrap();
        assert_eq!(email.content, DEFAULT_CONTENT);
    }

    #[test]
    fn fences_with_language_tags_are_stripped() {
        assert_eq!(
            strip_code_fences("```html\n<p>hello</p>\n```"),
            "<p>hello</p>"
        );
    }

    #[test]
    fn bare_fences_are_stripped() {
        assert_eq!(strip_code_fences("```\n<p>x</p>\n```"), "<p>x</p>");
    }

    #[test]
    fn unfenced_input_is_only_trimmed() {
        assert_eq!(strip_code_fences("  <p>x</p>  "), "<p>x</p>");
    }
}

//! Placeholder rendering for email subjects and bodies.
//!
//! Subjects and bodies may contain `{{placeholder}}` tokens that are
//! expanded against per-send render data. Inputs without the `{{` marker
//! pass through untouched, and a plain-text body is normalised to HTML
//! line breaks after rendering.

use std::collections::HashMap;

use handlebars::Handlebars;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Two-character marker that switches a subject or body from pass-through
/// to template compilation.
pub const PLACEHOLDER_OPEN: &str = "{{";

/// Render-data key for the recipient's name. Always present.
pub const KEY_CLIENT_NAME: &str = "client_name";

/// Render-data key for the project under discussion. Always present.
pub const KEY_PROJECT_NAME: &str = "project_name";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Malformed placeholder syntax (e.g. an unclosed `{{`).
///
/// A failure aborts the whole render; there is no partial output.
#[derive(Debug, thiserror::Error)]
#[error("Template rendering failed: {0}")]
pub struct RenderError(pub String);

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a subject/body pair against the given render data.
///
/// Each input is handled independently: it is compiled only when it
/// contains [`PLACEHOLDER_OPEN`], otherwise it passes through unchanged.
/// Unknown placeholders resolve to the empty string. The rendered body is
/// run through [`html_or_breaks`] before being returned.
pub fn render(
    subject_template: &str,
    body_template: &str,
    data: &HashMap<String, String>,
) -> Result<(String, String), RenderError> {
    let subject = render_one(subject_template, data)?;
    let body = render_one(body_template, data)?;
    Ok((subject, html_or_breaks(body)))
}

fn render_one(input: &str, data: &HashMap<String, String>) -> Result<String, RenderError> {
    if !input.contains(PLACEHOLDER_OPEN) {
        return Ok(input.to_owned());
    }
    // Non-strict mode: a placeholder with no matching key evaluates to "".
    Handlebars::new()
        .render_template(input, data)
        .map_err(|e| RenderError(e.to_string()))
}

/// Convert a plain-text body to HTML line breaks.
///
/// A body is treated as plain text when it does not start with `<` after
/// leading whitespace: `\r\n` collapses to `\n`, then each `\n` becomes
/// `<br/>`. This is a heuristic, not a MIME check -- HTML that opens with
/// something other than a tag (say, a comment after a blank line) is
/// mis-normalised. Known limitation.
pub fn html_or_breaks(body: String) -> String {
    if body.trim_start().starts_with('<') {
        body
    } else {
        body.replace("\r\n", "\n").replace('\n', "<br/>")
    }
}

/// Build the render data for one send operation.
///
/// The result always contains [`KEY_CLIENT_NAME`] and [`KEY_PROJECT_NAME`]
/// (empty string when not supplied). Caller-supplied overrides win on key
/// collision.
pub fn build_render_data(
    client_name: Option<&str>,
    overrides: HashMap<String, String>,
) -> HashMap<String, String> {
    let mut data = HashMap::new();
    data.insert(
        KEY_CLIENT_NAME.to_owned(),
        client_name.unwrap_or_default().to_owned(),
    );
    data.insert(KEY_PROJECT_NAME.to_owned(), String::new());
    data.extend(overrides);
    data
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn input_without_markers_passes_through_unchanged() {
        let (subject, body) = render(
            "Plain subject",
            "<p>Plain body</p>",
            &data(&[("client_name", "Ada")]),
        )
        .unwrap();
        assert_eq!(subject, "Plain subject");
        assert_eq!(body, "<p>Plain body</p>");
    }

    #[test]
    fn placeholders_are_substituted() {
        let (subject, body) = render(
            "Hello {{client_name}}",
            "<p>About {{project_name}}</p>",
            &data(&[("client_name", "Ada"), ("project_name", "Engine")]),
        )
        .unwrap();
        assert_eq!(subject, "Hello Ada");
        assert_eq!(body, "<p>About Engine</p>");
    }

    #[test]
    fn unknown_placeholder_resolves_to_empty_string() {
        let (subject, _) = render("Hi {{nobody}}!", "<p>x</p>", &HashMap::new()).unwrap();
        assert_eq!(subject, "Hi !");
    }

    #[test]
    fn plain_text_newlines_become_breaks() {
        let (_, body) = render("s", "a\nb", &HashMap::new()).unwrap();
        assert_eq!(body, "a<br/>b");
    }

    #[test]
    fn crlf_collapses_before_break_conversion() {
        let (_, body) = render("s", "a\r\nb\nc", &HashMap::new()).unwrap();
        assert_eq!(body, "a<br/>b<br/>c");
    }

    #[test]
    fn html_body_is_never_newline_converted() {
        let (_, body) = render("s", "<p>a\nb</p>", &HashMap::new()).unwrap();
        assert_eq!(body, "<p>a\nb</p>");
    }

    #[test]
    fn html_body_with_leading_whitespace_is_still_html() {
        let (_, body) = render("s", "  <p>a\nb</p>", &HashMap::new()).unwrap();
        assert_eq!(body, "  <p>a\nb</p>");
    }

    #[test]
    fn malformed_placeholder_syntax_fails_the_whole_render() {
        let result = render("{{#if}}", "body", &HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn render_data_always_contains_the_base_keys() {
        let data = build_render_data(None, HashMap::new());
        assert_eq!(data[KEY_CLIENT_NAME], "");
        assert_eq!(data[KEY_PROJECT_NAME], "");
    }

    #[test]
    fn caller_overrides_win_on_collision() {
        let mut overrides = HashMap::new();
        overrides.insert(KEY_CLIENT_NAME.to_owned(), "Override".to_owned());
        overrides.insert("extra".to_owned(), "value".to_owned());

        let data = build_render_data(Some("Ada"), overrides);
        assert_eq!(data[KEY_CLIENT_NAME], "Override");
        assert_eq!(data["extra"], "value");
    }
}

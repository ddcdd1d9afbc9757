//! Redaction for upstream error text before it reaches logs.
//!
//! The Gemini key travels in the `key=` query parameter, so transport errors
//! (which echo the request URL) and error bodies both need scrubbing.

use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 300;
const REDACTED: &str = "[REDACTED]";

/// Token prefixes that are secrets on their own (Google API keys, OAuth tokens).
const PREFIX_PATTERNS: [&str; 4] = ["AIza", "ya29.", "GOCSPX-", "eyJ"];

/// Markers followed by a secret value.
const MARKER_PATTERNS: [&str; 8] = [
    "key=",
    "api_key=",
    "access_token=",
    "x-goog-api-key: ",
    "Authorization: Bearer ",
    "authorization: bearer ",
    "\"api_key\":\"",
    "\"access_token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !is_secret_char(c))
        .map_or(input.len(), |(i, _)| from + i)
}

fn scrub_after_marker(scrubbed: &mut String, marker: &str, keep_marker: bool) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let value_start = start + marker.len();
        let end = token_end(scrubbed, value_start);

        // Bare marker without a value.
        if end == value_start {
            search_from = value_start;
            continue;
        }

        let replace_from = if keep_marker { value_start } else { start };
        scrubbed.replace_range(replace_from..end, REDACTED);
        search_from = replace_from + REDACTED.len();
    }
}

fn needs_scrubbing(input: &str) -> bool {
    PREFIX_PATTERNS
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|pattern| input.contains(pattern))
}

/// Replace API keys and tokens with `[REDACTED]`.
///
/// Prefix tokens are replaced whole; for `marker=value` forms the marker is
/// kept so the log still says which parameter carried the secret.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !needs_scrubbing(input) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in MARKER_PATTERNS {
        scrub_after_marker(&mut scrubbed, marker, true);
    }
    for prefix in PREFIX_PATTERNS {
        scrub_after_marker(&mut scrubbed, prefix, false);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and truncate, for logging upstream error bodies.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);
    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let scrubbed = scrubbed.as_ref();
    let mut end = MAX_API_ERROR_CHARS;
    while end > 0 && !scrubbed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &scrubbed[..end])
}

#[cfg(test)]
mod tests {
    use super::{sanitize_api_error, scrub_secret_patterns};

    #[test]
    fn leaves_clean_text_borrowed() {
        let input = "model returned no candidates";
        assert!(matches!(
            scrub_secret_patterns(input),
            std::borrow::Cow::Borrowed(_)
        ));
    }

    #[test]
    fn scrubs_query_key_in_urls() {
        let input = "error sending request for url (https://host/v1beta/models/m:generateContent?key=abc123XYZ)";
        let scrubbed = scrub_secret_patterns(input);
        assert!(!scrubbed.contains("abc123XYZ"));
        assert!(scrubbed.contains("key=[REDACTED])"));
    }

    #[test]
    fn scrubs_bare_google_api_keys() {
        let input = "API key AIzaSyD-1234567890abcdefghijklmnop not valid";
        let scrubbed = scrub_secret_patterns(input);
        assert!(!scrubbed.contains("SyD-1234567890"));
        assert_eq!(scrubbed, "API key [REDACTED] not valid");
    }

    #[test]
    fn scrubs_bearer_and_json_tokens() {
        let input = r#"Authorization: Bearer ya29.a0AfH6SM {"access_token":"tok-123"}"#;
        let scrubbed = scrub_secret_patterns(input);
        assert!(!scrubbed.contains("a0AfH6SM"));
        assert!(!scrubbed.contains("tok-123"));
    }

    #[test]
    fn bare_marker_without_value_is_untouched() {
        let input = "missing key= in request";
        assert_eq!(scrub_secret_patterns(input), input);
    }

    #[test]
    fn sanitize_truncates_long_bodies_on_char_boundary() {
        let input = "é".repeat(400);
        let sanitized = sanitize_api_error(&input);
        assert!(sanitized.ends_with("..."));
        assert!(sanitized.chars().count() <= 303);
    }
}

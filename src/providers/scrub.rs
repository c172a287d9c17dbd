use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;

/// AWS access key ids: long-term (`AKIA`) and temporary (`ASIA`).
const KEY_ID_PREFIXES: [&str; 2] = ["AKIA", "ASIA"];

/// Markers followed by a secret value up to the next delimiter.
const MARKER_PATTERNS: [&str; 8] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "Bearer ",
    "Signature=",
    "X-Amz-Security-Token: ",
    "x-amz-security-token: ",
    "\"x-amz-security-token\":\"",
    "\"aws_secret_access_key\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    let mut end = from;
    for (i, c) in input[from..].char_indices() {
        if is_secret_char(c) {
            end = from + i + c.len_utf8();
        } else {
            break;
        }
    }
    end
}

/// Replace `[start, end)` spans found after each occurrence of `marker`.
/// With `keep_marker` the marker text itself survives.
fn redact_after(scrubbed: &mut String, marker: &str, keep_marker: bool, min_len: usize) -> bool {
    let mut modified = false;
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        // Bare markers, or prefixes that are just part of a word.
        if end - content_start < min_len {
            search_from = content_start;
            continue;
        }

        let redact_from = if keep_marker { content_start } else { start };
        scrubbed.replace_range(redact_from..end, "[REDACTED]");
        modified = true;
        search_from = redact_from + "[REDACTED]".len();
    }
    modified
}

fn needs_scrubbing(input: &str) -> bool {
    KEY_ID_PREFIXES
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|pattern| input.contains(pattern))
}

/// Scrub AWS credential material from backend error strings.
///
/// Access key ids are replaced wholesale; for header-like markers only the
/// value after the marker is replaced.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !needs_scrubbing(input) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    let mut modified = false;

    for prefix in KEY_ID_PREFIXES {
        // Real key ids are 20 characters; anything shorter is a word.
        modified |= redact_after(&mut scrubbed, prefix, false, 12);
    }
    for marker in MARKER_PATTERNS {
        modified |= redact_after(&mut scrubbed, marker, true, 1);
    }

    if modified {
        Cow::Owned(scrubbed)
    } else {
        Cow::Borrowed(input)
    }
}

/// Scrub and truncate an error body for display.
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

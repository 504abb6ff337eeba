//! Log sanitization
//!
//! Response bodies of the connection endpoints carry provider API keys.
//! Bodies are masked and cut before they reach a debug log.

/// Maximum number of bytes of a body kept in a log line.
const TRUNCATE_LIMIT: usize = 256;

/// JSON keys whose string values never reach a log.
const SECRET_KEYS: &[&str] = &["\"api_key\"", "\"token\"", "\"password\""];

const MASK: &str = "***";

/// Largest char boundary not above `index` (`str::floor_char_boundary` is newer than the MSRV).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Byte offset of the closing quote of a JSON string whose opening quote was already consumed.
fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}

fn next_secret(s: &str) -> Option<(usize, &'static str)> {
    SECRET_KEYS
        .iter()
        .filter_map(|key| s.find(key).map(|pos| (pos, *key)))
        .min_by_key(|(pos, _)| *pos)
}

/// Replace the string values of secret keys with a mask.
///
/// Non-string values (`null`, numbers) are left alone.
pub fn redact_secrets(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some((pos, key)) = next_secret(rest) {
        let after_key = pos + key.len();
        out.push_str(&rest[..after_key]);
        rest = &rest[after_key..];

        let Some(value) = rest.trim_start().strip_prefix(':') else {
            continue;
        };
        let Some(inner) = value.trim_start().strip_prefix('"') else {
            continue;
        };

        out.push_str(":\"");
        out.push_str(MASK);
        match closing_quote(inner) {
            Some(end) => {
                out.push('"');
                rest = &inner[end + 1..];
            }
            None => rest = "",
        }
    }

    out.push_str(rest);
    out
}

/// Mask secrets, then cut the body to [`TRUNCATE_LIMIT`] bytes.
pub fn truncate_for_log(s: &str) -> String {
    let s = redact_secrets(s);
    if s.len() <= TRUNCATE_LIMIT {
        s
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(&s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

//! Position <-> URL query parameter
//!
//! The current book position lives in a single query parameter so a link
//! reopens the catalog where it was left. Rewrites replace the parameter in
//! place; no history entries are created.

use crate::constants::POSITION_QUERY_PARAM;
use percent_encoding::percent_decode_str;

/// Read the position from a query string (`"?pNo=5&x=1"` or `"pNo=5"`).
///
/// Keys and values are form-decoded (`+` is a space, `%XX` escapes). The
/// value is then read like `parseInt`: leading whitespace and one sign are
/// accepted and trailing garbage after the digits is ignored (`"5abc"`
/// reads as 5). Missing, non-numeric or out-of-range values fall back to
/// position 1.
pub fn position_from_query(query: &str, total_positions: u32) -> u32 {
    query
        .trim_start_matches('?')
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| form_decode(key) == POSITION_QUERY_PARAM)
        .and_then(|(_, value)| leading_integer(&form_decode(value)))
        .filter(|pos| *pos >= 1 && *pos <= i64::from(total_positions))
        .and_then(|pos| u32::try_from(pos).ok())
        .unwrap_or(1)
}

/// Rewrite the position parameter, keeping every other parameter in order
pub fn query_with_position(query: &str, position: u32) -> String {
    let mut pairs: Vec<String> = Vec::new();
    let mut replaced = false;

    for pair in query.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let key = pair.split_once('=').map_or(pair, |(key, _)| key);
        if key == POSITION_QUERY_PARAM {
            if !replaced {
                pairs.push(format!("{}={}", POSITION_QUERY_PARAM, position));
                replaced = true;
            }
        } else {
            pairs.push(pair.to_string());
        }
    }

    if !replaced {
        pairs.push(format!("{}={}", POSITION_QUERY_PARAM, position));
    }

    format!("?{}", pairs.join("&"))
}

fn form_decode(value: &str) -> String {
    let value = value.replace('+', " ");
    percent_decode_str(&value).decode_utf8_lossy().into_owned()
}

fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Tests
// =============================================================================

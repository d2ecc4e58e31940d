//! String helpers and the classifiers used by value normalization.
//!
//! The classifiers decide what a loose string token stands for: a number
//! ([`parse_numeric`]), a boolean ([`is_boolable`] / [`parse_bool`]) or a
//! delimited list ([`splitter`] / [`split`]).

use crate::config::PipeDetection;
use crate::value::Value;

// ============================================================================
// Classification
// ============================================================================

/// True for exactly `"true"`, `"false"`, `true` and `false`.
///
/// `"1"`, `"0"`, `1` and `0` are not boolable.
pub fn is_boolable(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Str(s) => s == "true" || s == "false",
        _ => false,
    }
}

/// False for `"false"`, `false`, `"0"` and integer `0`; true for anything
/// else.
///
/// This does not validate: `"yes"`, `"no"`, `0.0` and null all parse as
/// `true`.
pub fn parse_bool(value: &Value) -> bool {
    !matches!(
        value,
        Value::Bool(false) | Value::Int(0)
    ) && !matches!(value, Value::Str(s) if s == "false" || s == "0")
}

/// Delimiter a string would be split on, using the legacy pipe rule.
///
/// A comma anywhere wins. Otherwise a pipe counts only when the first pipe
/// is not the very first character, so `"|a|b"` has no delimiter while
/// `",a"` does. Use [`splitter_with`] and [`PipeDetection::Strict`] to
/// detect a pipe at any position.
pub fn splitter(s: &str) -> Option<char> {
    splitter_with(s, PipeDetection::Legacy)
}

/// Delimiter detection with an explicit pipe rule.
pub fn splitter_with(s: &str, pipes: PipeDetection) -> Option<char> {
    if s.contains(',') {
        return Some(',');
    }
    match (s.find('|'), pipes) {
        (Some(0), PipeDetection::Legacy) => None,
        (Some(_), _) => Some('|'),
        (None, _) => None,
    }
}

/// True when [`splitter`] finds a delimiter.
pub fn is_arrayable(s: &str) -> bool {
    splitter(s).is_some()
}

/// True when [`splitter_with`] finds a delimiter.
pub fn is_arrayable_with(s: &str, pipes: PipeDetection) -> bool {
    splitter_with(s, pipes).is_some()
}

/// Literal split on every occurrence of `separator`, keeping empty
/// segments. An empty separator returns the input as a single segment.
pub fn split(s: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return vec![s.to_string()];
    }
    s.split(separator).map(str::to_string).collect()
}

/// Parse a numeric string.
///
/// Accepts surrounding ASCII whitespace, an optional sign, digits with an
/// optional fractional part (or a fractional part alone) and an optional
/// exponent. Hex, `inf`, `nan` and the empty string are not numeric.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    let bytes = trimmed.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let mut mantissa_digits = pos - int_start;

    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        let frac_start = pos;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        mantissa_digits += pos - frac_start;
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_start = exp;
        while bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            exp += 1;
        }
        if exp == exp_start {
            return None;
        }
        pos = exp;
    }

    if pos != bytes.len() {
        return None;
    }

    trimmed.parse().ok()
}

/// True when [`parse_numeric`] accepts the string.
pub fn is_numeric(s: &str) -> bool {
    parse_numeric(s).is_some()
}

// ============================================================================
// General helpers
// ============================================================================

/// Split both strings on `glue`, drop empty and `"0"` segments, and join
/// what is left with `glue`.
///
/// ```rust
/// use garavel_support::text::merge_with;
///
/// assert_eq!(merge_with("/", "/api/", "/users"), "api/users");
/// ```
pub fn merge_with(glue: &str, left: &str, right: &str) -> String {
    split(left, glue)
        .into_iter()
        .chain(split(right, glue))
        .filter(|segment| !(segment.is_empty() || segment == "0"))
        .collect::<Vec<_>>()
        .join(glue)
}

/// Whether `s` begins with `start`, optionally ignoring ASCII case.
pub fn starts_with(s: &str, start: &str, insensitive: bool) -> bool {
    let head = &s.as_bytes()[..s.len().min(start.len())];
    if insensitive {
        head.eq_ignore_ascii_case(start.as_bytes())
    } else {
        head == start.as_bytes()
    }
}

/// Make sure `s` begins with `start`.
///
/// When `s` already begins with it (case-insensitively if requested) the
/// existing prefix is replaced by `start`, otherwise `start` is prepended.
pub fn start_with(s: &str, start: &str, insensitive: bool) -> String {
    if starts_with(s, start, insensitive) {
        let rest = slice(s, start.len() as i64, None, false);
        format!("{start}{rest}")
    } else {
        format!("{start}{s}")
    }
}

/// `prefix + s`, or an empty string when `s` is absent, empty or `"0"`.
pub fn prefix(prefix: &str, s: Option<&str>) -> String {
    match s {
        Some(s) if !(s.is_empty() || s == "0") => format!("{prefix}{s}"),
        _ => String::new(),
    }
}

/// Length in bytes, or in chars when `multibyte`.
pub fn len(s: &str, multibyte: bool) -> usize {
    if multibyte { s.chars().count() } else { s.len() }
}

/// Substring from `start` with an optional `length`.
///
/// A negative `start` counts from the end. A negative `length` leaves that
/// many units off the end. Units are bytes, or chars when `multibyte`; a
/// byte range that cuts a UTF-8 sequence is repaired with replacement
/// characters.
pub fn slice(s: &str, start: i64, length: Option<i64>, multibyte: bool) -> String {
    if multibyte {
        let chars: Vec<char> = s.chars().collect();
        let (from, to) = slice_bounds(chars.len(), start, length);
        chars[from..to].iter().collect()
    } else {
        let bytes = s.as_bytes();
        let (from, to) = slice_bounds(bytes.len(), start, length);
        String::from_utf8_lossy(&bytes[from..to]).into_owned()
    }
}

fn slice_bounds(total: usize, start: i64, length: Option<i64>) -> (usize, usize) {
    let total_i = i64::try_from(total).unwrap_or(i64::MAX);
    let from = if start < 0 {
        (total_i + start).max(0)
    } else {
        start.min(total_i)
    };
    let to = match length {
        None => total_i,
        Some(len) if len < 0 => (total_i + len).max(from),
        Some(len) => from.saturating_add(len).min(total_i),
    };
    // both bounds are clamped to 0..=total above
    (from as usize, to as usize)
}

/// Whether `needle` occurs in `haystack` at or after byte `offset`.
///
/// A match at position zero counts. An offset past the end never matches.
pub fn contains(haystack: &str, needle: &str, offset: Option<usize>) -> bool {
    let offset = offset.unwrap_or(0);
    let Some(rest) = haystack.as_bytes().get(offset..) else {
        return false;
    };
    if needle.is_empty() {
        return true;
    }
    rest.windows(needle.len()).any(|window| window == needle.as_bytes())
}

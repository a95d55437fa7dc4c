//! String helpers.

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::str::FromStr;

/// Split `text` around the first occurrence of `pattern`.
pub fn split_first<'a>(text: &'a str, pattern: &str) -> Option<(&'a str, &'a str)> {
    text.split_once(pattern)
}

/// Compare two strings, ignoring case across the whole of Unicode.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Parse `text`, or return `fallback` if it does not parse.
///
/// Surrounding whitespace is ignored.
pub fn parse_or<T: FromStr>(text: &str, fallback: T) -> T {
    text.trim().parse().unwrap_or(fallback)
}

/// Parse `text`, or return the default value if it does not parse.
pub fn parse_or_default<T: FromStr + Default>(text: &str) -> T {
    text.trim().parse().unwrap_or_default()
}

/// Parse a URL query string, lowercasing its keys.
///
/// A leading `?` is skipped. Keys and values are percent-decoded, with `+`
/// read as a space and malformed escapes kept as written. A segment without
/// `=` is a key with an empty value. Values of keys that are equal once
/// lowercased are joined with commas, in order.
pub fn parse_query_insensitive(query: &str) -> BTreeMap<String, String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut r = BTreeMap::<String, String>::new();

    for segment in query.split('&').filter(|s| !s.is_empty()) {
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        let key = percent_decode(key).to_lowercase();
        let value = percent_decode(value);

        r.entry(key)
            .and_modify(|v| {
                v.push(',');
                v.push_str(&value);
            })
            .or_insert(value);
    }

    r
}

fn percent_decode(text: &str) -> String {
    let mut bytes = Vec::with_capacity(text.len());
    let mut rest = text.as_bytes();

    while let Some((&b, tail)) = rest.split_first() {
        rest = tail;

        match b {
            b'+' => bytes.push(b' '),
            b'%' => match tail.split_first_chunk::<2>() {
                Some((&[hi, lo], after)) => match (hex(hi), hex(lo)) {
                    (Some(hi), Some(lo)) => {
                        bytes.push((hi << 4) | lo);
                        rest = after;
                    }
                    _ => bytes.push(b'%'),
                },
                None => bytes.push(b'%'),
            },
            _ => bytes.push(b),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

fn hex(b: u8) -> Option<u8> {
    char::from(b).to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_first_only() {
        assert_eq!(split_first("key:a:b", ":"), Some(("key", "a:b")));
        assert_eq!(split_first("key", ":"), None);
    }

    #[test]
    fn case_folding() {
        assert!(eq_ignore_case("ÉCOLE", "école"));
        assert!(!eq_ignore_case("a", "ab"));
    }

    #[test]
    fn parse_with_fallback() {
        assert_eq!(parse_or(" 42 ", 7u8), 42);
        assert_eq!(parse_or("300", 7u8), 7);
        assert_eq!(parse_or_default::<i64>("-x"), 0);
        assert!(parse_or("true", false));
    }

    #[test]
    fn query_keys_ignore_case() {
        let query = parse_query_insensitive("?Name=Ana+Lu&AGE=7&flag&&name=B%C3%A9a");

        assert_eq!(query.get("name").map(String::as_str), Some("Ana Lu,Béa"));
        assert_eq!(query.get("age").map(String::as_str), Some("7"));
        assert_eq!(query.get("flag").map(String::as_str), Some(""));
        assert_eq!(query.len(), 3);
    }

    #[test]
    fn malformed_escapes_are_kept() {
        let query = parse_query_insensitive("k=100%&j=%zz1&i=%4");

        assert_eq!(query["k"], "100%");
        assert_eq!(query["j"], "%zz1");
        assert_eq!(query["i"], "%4");
    }
}

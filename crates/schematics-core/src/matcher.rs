//! Wildcard pattern matching over a flattened record
//!
//! A pattern is a target key whose `*` segments match any single key at
//! that position. Matching against a flat mapping produces two kinds of
//! results:
//!
//! - **nested**: flat keys strictly prefixed by the pattern's base (the
//!   pattern minus a trailing wildcard segment) plus the separator are
//!   collapsed into one entry keyed by that base, whose value is a
//!   sub-mapping of suffix → value;
//! - **direct**: remaining flat keys matching the pattern as an anchored
//!   glob are kept as separate entries under their own full key.
//!
//! A key claimed by the prefix rule never doubles as a direct match.
//! This lets one field definition bind to either a single leaf (`age`), a
//! repeated substructure collapsed whole (`address.*`), or a set of
//! independent values (`items.*.price`) without the caller distinguishing
//! cardinality up front.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

/// Compile a target-key pattern into an anchored regex string.
///
/// The pattern is escaped literally, then every `*` wildcard becomes
/// `[^<sep>]+`. Separators are expected to be a single character.
pub fn key_to_regex(pattern: &str, separator: &str) -> String {
    let escaped_sep = regex::escape(separator);
    let wildcard = format!("[^{escaped_sep}]+");
    let body = regex::escape(pattern).replace(r"\*", &wildcard);
    format!("^{body}$")
}

/// Pattern minus a trailing wildcard segment, used for the nesting rule.
fn base_pattern<'a>(pattern: &'a str, separator: &str) -> &'a str {
    pattern
        .strip_suffix(&format!("{separator}*"))
        .unwrap_or(pattern)
}

/// Return the subset of flat entries matching `pattern`.
///
/// Nested matches collapse into a single entry under the base pattern key;
/// direct glob matches keep their own concrete key. Iteration order follows
/// the flat mapping.
pub fn find_matching_keys(
    flat: &IndexMap<String, Value>,
    pattern: &str,
    separator: &str,
) -> IndexMap<String, Value> {
    let regex = match Regex::new(&key_to_regex(pattern, separator)) {
        Ok(regex) => regex,
        Err(err) => {
            log::warn!("failed to compile pattern '{pattern}': {err}");
            return IndexMap::new();
        }
    };

    let base = base_pattern(pattern, separator);
    let prefix = format!("{base}{separator}");
    let mut direct = IndexMap::new();
    let mut nested = serde_json::Map::new();

    for (key, value) in flat {
        if let Some(suffix) = key.strip_prefix(&prefix) {
            nested.insert(suffix.to_string(), value.clone());
        } else if regex.is_match(key) {
            direct.insert(key.clone(), value.clone());
        }
    }

    if !nested.is_empty() {
        direct.insert(base.to_string(), Value::Object(nested));
    }

    direct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::flatten;
    use serde_json::json;

    #[test]
    fn test_key_to_regex_escapes_and_rewrites_wildcards() {
        assert_eq!(key_to_regex("items.*.price", "."), r"^items\.[^\.]+\.price$");
    }

    #[test]
    fn test_trailing_wildcard_collapses_to_nested_submapping() {
        // completeness case: a.* over {"a":{"x":1,"y":2}} yields {"x","y"} under "a"
        let flat = flatten(&json!({ "a": { "x": 1, "y": 2 } }), ".");
        let matches = find_matching_keys(&flat, "a.*", ".");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches.get("a"), Some(&json!({ "x": 1, "y": 2 })));
    }

    #[test]
    fn test_bare_key_collapses_substructure() {
        let flat = flatten(&json!({ "name": { "first": "ada", "last": "lovelace" } }), ".");
        let matches = find_matching_keys(&flat, "name", ".");
        assert_eq!(matches.len(), 1);
        assert_eq!(
            matches.get("name"),
            Some(&json!({ "first": "ada", "last": "lovelace" }))
        );
    }

    #[test]
    fn test_direct_leaf_match() {
        let flat = flatten(&json!({ "age": 30, "name": "ada" }), ".");
        let matches = find_matching_keys(&flat, "age", ".");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches.get("age"), Some(&json!(30)));
    }

    #[test]
    fn test_interior_wildcard_keeps_direct_matches() {
        let flat = flatten(&json!({ "items": [{ "price": 10 }, { "price": 20 }] }), ".");
        let matches = find_matching_keys(&flat, "items.*.price", ".");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches.get("items.0.price"), Some(&json!(10)));
        assert_eq!(matches.get("items.1.price"), Some(&json!(20)));
    }

    #[test]
    fn test_no_match_yields_empty() {
        let flat = flatten(&json!({ "age": 30 }), ".");
        assert!(find_matching_keys(&flat, "name", ".").is_empty());
    }

    #[test]
    fn test_nested_suffixes_keep_deep_paths() {
        let flat = flatten(&json!({ "a": { "b": { "c": 1 } } }), ".");
        let matches = find_matching_keys(&flat, "a.*", ".");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches.get("a"), Some(&json!({ "b.c": 1 })));
    }
}

//! FlatMap codec: nested record ⇄ flat dotted-path mapping
//!
//! [`flatten`] walks nested objects/arrays and stores every leaf under its
//! joined path; [`deflate`] is the inverse, inferring array-vs-object at
//! each level from whether the keys are purely numeric. Both are total for
//! any JSON-shaped input.
//!
//! Round-trip law: `deflate(flatten(x, sep), sep)` is semantically equal to
//! `x` for any record that does not mix numeric and non-numeric keys at the
//! same nesting level. A level with mixed keys deflates as an object, and
//! empty containers are dropped by flatten; both are documented limitations.

use indexmap::IndexMap;
use serde_json::Value;

/// Flatten a nested value into a mapping of joined paths to leaf values.
///
/// Object keys and array indices are joined with `separator`; scalars and
/// nulls are leaves. Empty input yields an empty mapping.
pub fn flatten(value: &Value, separator: &str) -> IndexMap<String, Value> {
    let mut out = IndexMap::new();
    flatten_into(value, "", separator, &mut out);
    out
}

fn flatten_into(value: &Value, parent: &str, separator: &str, out: &mut IndexMap<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(child, &join(parent, key, separator), separator, out);
            }
        }
        Value::Array(arr) => {
            for (index, child) in arr.iter().enumerate() {
                let key = index.to_string();
                flatten_into(child, &join(parent, &key, separator), separator, out);
            }
        }
        leaf => {
            out.insert(parent.to_string(), leaf.clone());
        }
    }
}

fn join(parent: &str, key: &str, separator: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}{separator}{key}")
    }
}

/// Rebuild a nested value from a flat mapping.
///
/// Each path is split on `separator`; a level whose keys are all numeric
/// becomes an array ordered by index (gaps compacted), anything else an
/// object. A path that is both a leaf and a prefix of deeper paths loses
/// its leaf value to the deeper structure.
pub fn deflate(flat: &IndexMap<String, Value>, separator: &str) -> Value {
    let mut root = Node::Branch(IndexMap::new());
    for (path, value) in flat {
        let segments: Vec<&str> = path.split(separator).collect();
        insert(&mut root, &segments, value);
    }
    collapse(root)
}

enum Node {
    Leaf(Value),
    Branch(IndexMap<String, Node>),
}

fn insert(node: &mut Node, segments: &[&str], value: &Value) {
    let Some((head, rest)) = segments.split_first() else {
        *node = Node::Leaf(value.clone());
        return;
    };
    // a leaf in the way of a deeper path is promoted to a branch
    if matches!(node, Node::Leaf(_)) {
        *node = Node::Branch(IndexMap::new());
    }
    let Node::Branch(children) = node else {
        unreachable!("leaf nodes are promoted above");
    };
    let child = children
        .entry(head.to_string())
        .or_insert_with(|| Node::Branch(IndexMap::new()));
    insert(child, rest, value);
}

fn collapse(node: Node) -> Value {
    match node {
        Node::Leaf(value) => value,
        Node::Branch(children) => {
            let all_numeric = !children.is_empty()
                && children
                    .keys()
                    .all(|k| !k.is_empty() && k.bytes().all(|b| b.is_ascii_digit()));
            if all_numeric {
                let mut indexed: Vec<(usize, Node)> = children
                    .into_iter()
                    .filter_map(|(k, v)| k.parse::<usize>().ok().map(|i| (i, v)))
                    .collect();
                indexed.sort_by_key(|(i, _)| *i);
                Value::Array(indexed.into_iter().map(|(_, v)| collapse(v)).collect())
            } else {
                Value::Object(
                    children
                        .into_iter()
                        .map(|(k, v)| (k, collapse(v)))
                        .collect(),
                )
            }
        }
    }
}

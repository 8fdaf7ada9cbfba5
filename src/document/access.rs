//! Default-on-missing access over a JSON tree
//!
//! Every read in the document model goes through these helpers, so the
//! policy for absent or mistyped nodes lives in one place: reads never fail
//! and fall back to `0`, `""` or an empty table; writes create missing
//! intermediate objects and refuse to overwrite a non-object node.

use serde_json::{Map, Value};

/// Follow a chain of object keys, returning `None` on any missing or
/// non-object step
pub(crate) fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.as_object()?.get(*key))
}

/// Integer at `path`, or 0 when missing or not an integer
pub(crate) fn int_or_default(root: &Value, path: &[&str]) -> i64 {
    lookup(root, path).and_then(Value::as_i64).unwrap_or(0)
}

/// String at `path`, or "" when missing or not a string
pub(crate) fn str_or_default<'a>(root: &'a Value, path: &[&str]) -> &'a str {
    lookup(root, path).and_then(Value::as_str).unwrap_or("")
}

/// Object at `path`, or `None` when missing or not an object
pub(crate) fn object_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Map<String, Value>> {
    lookup(root, path).and_then(Value::as_object)
}

/// Mutable object at `path`, creating empty objects for missing steps
///
/// Fails with a description of the offending node when an existing step is
/// not an object. Sibling keys are never touched.
pub(crate) fn object_at_mut<'a>(
    root: &'a mut Value,
    path: &[&str],
) -> Result<&'a mut Map<String, Value>, String> {
    let mut current = root;
    let mut walked: Vec<&str> = Vec::with_capacity(path.len());

    for key in path {
        let map = match current {
            Value::Object(map) => map,
            other => return Err(not_an_object(&walked, other)),
        };
        walked.push(*key);
        current = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    match current {
        Value::Object(map) => Ok(map),
        other => Err(not_an_object(&walked, other)),
    }
}

fn not_an_object(walked: &[&str], node: &Value) -> String {
    let location = if walked.is_empty() {
        "document root".to_string()
    } else {
        format!("`{}`", walked.join("."))
    };
    format!("{} is {}, not an object", location, kind(node))
}

/// Short name of a JSON node's type
pub(crate) fn kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

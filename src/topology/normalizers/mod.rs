//! Pure per-record normalizers.
//!
//! Each function maps one raw provider record (the JSON shape the service
//! layer emits) onto its canonical counterpart. Normalizers never fail and
//! never touch I/O: malformed or absent nested structure degrades to `null`
//! or an empty list, and calling a normalizer twice on the same record
//! yields identical output.

use serde_json::Value;

pub mod ec2;
pub mod elbv2;
pub mod rds;

/// Resolve a display name from a record's tag list: the value of the first
/// tag whose key is exactly `"Name"`. Records without tags, or without a
/// `Name` tag, resolve to `None`.
pub fn resolve_name_tag(raw: &Value) -> Option<String> {
    let tags = raw.get("Tags")?.as_array()?;
    tags.iter()
        .find(|tag| tag.get("Key").and_then(Value::as_str) == Some("Name"))
        .and_then(|tag| tag.get("Value"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Top-level string field of a raw record.
fn str_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(raw: &Value, key: &str) -> Option<bool> {
    raw.get(key).and_then(Value::as_bool)
}

/// Elements of a top-level array field; absent or non-array yields empty.
fn array_field<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key).and_then(Value::as_array).map_or(&[], Vec::as_slice)
}

/// Collect one string field from each element of an array field, skipping
/// elements where it is absent.
fn collect_strs(raw: &Value, key: &str, inner: &str) -> Vec<String> {
    array_field(raw, key)
        .iter()
        .filter_map(|element| str_field(element, inner))
        .collect()
}

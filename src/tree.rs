//! The record model builder: conversions between flat records and nested
//! structured values.
//!
//! [`flatten`] walks a nested [`Value`] and produces a flat [`Record`] of
//! dotted-path keys: mapping keys are joined with `.`, sequence elements are
//! indexed (`path.0`, `path.1`, …) in a stable, order-preserving way, and
//! scalars are stringified canonically. [`unflatten`] reverses it, splitting
//! each path on `.`, re-detecting consecutive integer segments starting at 0
//! as sequences, and coercing leaf strings back to native types.
//!
//! Two paths that imply incompatible structure at the same position (one
//! treats `a` as a scalar, another treats `a.b` as nested) are a
//! [`StructuralConflict`](crate::Error::StructuralConflict), never a silent
//! overwrite.
//!
//! Known limits of the flat form, all checked or documented here:
//!
//! - the root of a structured record must be a mapping
//! - a mapping key that is empty or contains `.` cannot be encoded in a
//!   dotted path and is rejected
//! - empty non-root mappings and sequences produce no pairs and so do not
//!   survive a round-trip
//! - the root mapping is never sequence-detected, so a record's top-level
//!   keys always come back as a mapping

use crate::{Error, Map, Record, Result, Value};
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Flattens a structured value into a flat record of dotted-path pairs.
///
/// # Errors
///
/// Returns [`Error::Unsupported`] if the root is not a mapping, and
/// [`Error::StructuralConflict`] if a mapping key is empty or contains `.`.
///
/// # Examples
///
/// ```rust
/// use cpl::{cpl, flatten};
///
/// let value = cpl!({ "address": { "city": "Jerusalem" } });
/// let record = flatten(&value).unwrap();
/// assert_eq!(record.get("address.city"), Some("Jerusalem"));
/// ```
pub fn flatten(value: &Value) -> Result<Record> {
    let Value::Mapping(map) = value else {
        return Err(Error::unsupported(
            "only a mapping can be flattened into a record",
        ));
    };
    let mut record = Record::new();
    for (key, child) in map {
        check_segment(key, "")?;
        flatten_into(key, child, &mut record)?;
    }
    Ok(record)
}

fn flatten_into(path: &str, value: &Value, out: &mut Record) -> Result<()> {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                check_segment(key, path)?;
                flatten_into(&format!("{}.{}", path, key), child, out)?;
            }
        }
        Value::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(&format!("{}.{}", path, index), child, out)?;
            }
        }
        Value::Null => {
            out.insert(path.to_string(), String::new());
        }
        Value::Bool(b) => {
            out.insert(path.to_string(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(path.to_string(), n.to_string());
        }
        Value::String(s) => {
            out.insert(path.to_string(), s.clone());
        }
    }
    Ok(())
}

fn check_segment(key: &str, parent: &str) -> Result<()> {
    if key.is_empty() || key.contains('.') {
        let shown = if parent.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", parent, key)
        };
        return Err(Error::structural_conflict(
            shown,
            "mapping key cannot be encoded as a dotted-path segment",
        ));
    }
    Ok(())
}

/// Rebuilds a structured value from a flat record of dotted-path pairs.
///
/// # Errors
///
/// Returns [`Error::StructuralConflict`] when two paths imply incompatible
/// structure at the same position, or when a path contains an empty segment.
///
/// # Examples
///
/// ```rust
/// use cpl::{cpl, unflatten, Record};
///
/// let record = Record::from_iter([("address.city", "Jerusalem")]);
/// let value = unflatten(&record).unwrap();
/// assert_eq!(value, cpl!({ "address": { "city": "Jerusalem" } }));
/// ```
pub fn unflatten(record: &Record) -> Result<Value> {
    let mut root: IndexMap<String, Node> = IndexMap::new();
    for (path, value) in record {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(Error::structural_conflict(path, "empty path segment"));
        }
        insert_path(&mut root, path, &segments, value)?;
    }
    // The root stays a mapping even when its keys look like indices; only
    // nested levels are sequence-detected.
    Ok(Value::Mapping(
        root.into_iter()
            .map(|(key, node)| (key, node_into_value(node)))
            .collect(),
    ))
}

enum Node {
    Leaf(String),
    Branch(IndexMap<String, Node>),
}

fn insert_path(
    map: &mut IndexMap<String, Node>,
    full_path: &str,
    segments: &[&str],
    value: &str,
) -> Result<()> {
    match segments {
        [] => Err(Error::structural_conflict(full_path, "empty path")),
        [leaf] => match map.entry((*leaf).to_string()) {
            Entry::Occupied(mut entry) => match entry.get_mut() {
                Node::Branch(_) => Err(Error::structural_conflict(
                    full_path,
                    "path is already a nested mapping",
                )),
                Node::Leaf(existing) => {
                    *existing = value.to_string();
                    Ok(())
                }
            },
            Entry::Vacant(entry) => {
                entry.insert(Node::Leaf(value.to_string()));
                Ok(())
            }
        },
        [head, rest @ ..] => {
            let node = map
                .entry((*head).to_string())
                .or_insert_with(|| Node::Branch(IndexMap::new()));
            match node {
                Node::Branch(children) => insert_path(children, full_path, rest, value),
                Node::Leaf(_) => Err(Error::structural_conflict(
                    full_path,
                    "path descends through a scalar",
                )),
            }
        }
    }
}

fn node_into_value(node: Node) -> Value {
    match node {
        Node::Leaf(raw) => Value::coerce(&raw),
        Node::Branch(children) => branch_into_value(children),
    }
}

fn branch_into_value(mut children: IndexMap<String, Node>) -> Value {
    if let Some(len) = sequence_length(&children) {
        let mut items = Vec::with_capacity(len);
        for index in 0..len {
            if let Some(node) = children.shift_remove(&index.to_string()) {
                items.push(node_into_value(node));
            }
        }
        return Value::Sequence(items);
    }
    Value::Mapping(
        children
            .into_iter()
            .map(|(key, node)| (key, node_into_value(node)))
            .collect(),
    )
}

/// A branch is a sequence exactly when its keys are `0..len`.
fn sequence_length(children: &IndexMap<String, Node>) -> Option<usize> {
    if children.is_empty() {
        return None;
    }
    let len = children.len();
    for index in 0..len {
        if !children.contains_key(&index.to_string()) {
            return None;
        }
    }
    Some(len)
}

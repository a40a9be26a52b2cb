//! # Object Operations
//!
//! Structural copy, shallow merge, key selection, and dot-path access over
//! JSON mappings.
//!
//! Paths are dot-separated (`"a.b.c"`). A segment addresses a mapping by key
//! or an array by decimal index.
//!
//! [`set`] is the one helper that mutates its argument; [`set_cloned`] is the
//! copy-on-write alternative.

use datakit_types::{TransformError, value_kind};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Copies `data` into a structurally independent tree.
///
/// Scalars are returned as they are. Owned JSON trees cannot be cyclic, so the
/// copy always succeeds, at any nesting depth: the walk keeps its own work
/// stack instead of recursing.
///
/// # Arguments
/// * `data` - The value to copy
///
/// # Returns
/// A new tree equal to `data` that shares nothing with it
///
/// # Example
/// ```rust
/// use datakit_util::object_ops::deep_clone;
/// use serde_json::json;
///
/// let original = json!({"a": {"b": [1, 2]}});
/// assert_eq!(deep_clone(&original), original);
/// ```
pub fn deep_clone(data: &Value) -> Value {
    copy_value(data, None).unwrap_or_else(|_| data.clone())
}

/// [`deep_clone`] that refuses trees nested deeper than `max_depth` containers.
///
/// Useful when the input is untrusted and the copy should stay shallow.
pub fn deep_clone_with_limit(data: &Value, max_depth: usize) -> Result<Value, TransformError> {
    copy_value(data, Some(max_depth))
}

/// Partially copied container on the work stack.
enum CopyFrame<'a> {
    Array {
        items: std::slice::Iter<'a, Value>,
        copy: Vec<Value>,
    },
    Object {
        entries: serde_json::map::Iter<'a>,
        copy: Map<String, Value>,
        key: Option<String>,
    },
}

impl<'a> CopyFrame<'a> {
    fn open(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::Array {
                items: items.iter(),
                copy: Vec::with_capacity(items.len()),
            }),
            Value::Object(map) => Some(Self::Object {
                entries: map.iter(),
                copy: Map::with_capacity(map.len()),
                key: None,
            }),
            _ => None,
        }
    }

    fn next_child(&mut self) -> Option<&'a Value> {
        match self {
            Self::Array { items, .. } => items.next(),
            Self::Object { entries, key, .. } => entries.next().map(|(next_key, value)| {
                *key = Some(next_key.clone());
                value
            }),
        }
    }

    fn accept(&mut self, value: Value) {
        match self {
            Self::Array { copy, .. } => copy.push(value),
            Self::Object { copy, key, .. } => {
                if let Some(key) = key.take() {
                    copy.insert(key, value);
                }
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Self::Array { copy, .. } => Value::Array(copy),
            Self::Object { copy, .. } => Value::Object(copy),
        }
    }
}

fn copy_value(root: &Value, max_depth: Option<usize>) -> Result<Value, TransformError> {
    let mut stack: Vec<CopyFrame<'_>> = Vec::new();
    let mut pending = Some(root);

    loop {
        let mut completed = None;
        if let Some(value) = pending.take() {
            match CopyFrame::open(value) {
                Some(frame) => {
                    if let Some(limit) = max_depth
                        && stack.len() >= limit
                    {
                        return Err(TransformError::unsupported(format!("nesting deeper than {} levels", limit)));
                    }
                    stack.push(frame);
                }
                None => completed = Some(value.clone()),
            }
        }

        loop {
            let Some(frame) = stack.last_mut() else {
                return Ok(completed.unwrap_or(Value::Null));
            };
            if let Some(value) = completed.take() {
                frame.accept(value);
            }
            match frame.next_child() {
                Some(child) => {
                    pending = Some(child);
                    break;
                }
                None => completed = stack.pop().map(CopyFrame::finish),
            }
        }
    }
}

/// Detaches any serializable structure into a JSON tree.
///
/// This is where the copy can fail: shapes JSON cannot hold, such as maps
/// keyed by non-strings, are rejected with
/// [`TransformError::UnsupportedStructure`] instead of being silently dropped.
///
/// # Arguments
/// * `data` - Any `Serialize` value
///
/// # Returns
/// The detached JSON tree, or the serializer's complaint
pub fn deep_clone_from<T>(data: &T) -> Result<Value, TransformError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(data).map_err(|error| TransformError::unsupported(error.to_string()))
}

/// Shallow left-to-right merge; later keys overwrite earlier ones.
///
/// Nested mappings are replaced, not merged. Arguments that are not mappings
/// contribute nothing.
///
/// # Example
/// ```rust
/// use datakit_util::object_ops::merge_objects;
/// use serde_json::json;
///
/// let merged = merge_objects(&[json!({"a": 1, "n": {"x": 1}}), json!({"b": 2, "n": {"y": 2}})]);
/// assert_eq!(merged, json!({"a": 1, "b": 2, "n": {"y": 2}}));
/// ```
pub fn merge_objects(objects: &[Value]) -> Value {
    let mut merged = Map::new();
    for object in objects {
        match object {
            Value::Object(map) => merged.extend(map.iter().map(|(key, value)| (key.clone(), value.clone()))),
            other => debug!("merge_objects skipping {} argument", value_kind(other)),
        }
    }
    Value::Object(merged)
}

/// Parses a canonical decimal array index; `"01"` and `"+1"` are not indexes.
fn array_index(segment: &str) -> Option<usize> {
    segment
        .parse::<usize>()
        .ok()
        .filter(|index| index.to_string() == segment)
}

/// Looks up one key of a mapping, or one index of an array.
fn keyed_child<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    match data {
        Value::Object(map) => map.get(key),
        Value::Array(items) => array_index(key).and_then(|index| items.get(index)),
        _ => None,
    }
}

/// New mapping holding only `keys`; absent keys are skipped.
///
/// Arrays count as mappings keyed by their indexes, so picking `"0"` from
/// `[10, 20]` yields `{"0": 10}`. Any other input yields an empty mapping.
///
/// # Arguments
/// * `data` - The source mapping or array
/// * `keys` - Keys (or decimal indexes) to keep
///
/// # Returns
/// A new mapping with the present keys, in the order `keys` names them
pub fn pick(data: &Value, keys: &[&str]) -> Value {
    if !matches!(data, Value::Object(_) | Value::Array(_)) {
        debug!("pick returning empty mapping for {} input", value_kind(data));
        return Value::Object(Map::new());
    }

    let picked = keys
        .iter()
        .filter_map(|key| keyed_child(data, key).map(|value| (key.to_string(), value.clone())))
        .collect();
    Value::Object(picked)
}

/// New mapping holding every key except `keys`.
///
/// Arrays contribute their elements keyed by index, as in [`pick`].
pub fn omit(data: &Value, keys: &[&str]) -> Value {
    let entries: Vec<(String, &Value)> = match data {
        Value::Object(map) => map.iter().map(|(key, value)| (key.clone(), value)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), value))
            .collect(),
        other => {
            debug!("omit returning empty mapping for {} input", value_kind(other));
            return Value::Object(Map::new());
        }
    };

    let kept = entries
        .into_iter()
        .filter(|(key, _)| !keys.contains(&key.as_str()))
        .map(|(key, value)| (key, value.clone()))
        .collect();
    Value::Object(kept)
}

/// Borrows the value at `path`, if every step exists.
pub fn get_ref<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, keyed_child)
}

/// Value at `path`, or `default` as soon as a step is missing or not traversable.
///
/// # Arguments
/// * `data` - The document to read
/// * `path` - Dot-separated keys; array steps use canonical indices (`0`, not `00`)
/// * `default` - Returned when the path does not resolve
///
/// # Returns
/// A clone of the resolved value. An explicit `null` counts as resolved
///
/// # Example
/// ```rust
/// use datakit_util::object_ops::get;
/// use serde_json::json;
///
/// let data = json!({"a": {"b": [{"c": 3}]}});
/// assert_eq!(get(&data, "a.b.0.c", json!(null)), json!(3));
/// assert_eq!(get(&data, "a.x.c", json!("fallback")), json!("fallback"));
/// ```
pub fn get(data: &Value, path: &str, default: Value) -> Value {
    get_ref(data, path).cloned().unwrap_or(default)
}

/// Assigns `value` at `path` in place, creating missing intermediate mappings.
///
/// This mutates `data` and returns the same reference. A path that runs into a
/// scalar, or an array index past the end, leaves `data` untouched; so does a
/// root that is neither a mapping nor an array. An array index equal to the
/// array's length appends on the final step.
///
/// # Example
/// ```rust
/// use datakit_util::object_ops::set;
/// use serde_json::json;
///
/// let mut data = json!({"a": {}});
/// set(&mut data, "a.b.c", json!(1));
/// assert_eq!(data, json!({"a": {"b": {"c": 1}}}));
/// ```
pub fn set<'a>(data: &'a mut Value, path: &str, value: Value) -> &'a mut Value {
    let segments: Vec<&str> = path.split('.').collect();
    if !assign_at(data, &segments, value) {
        debug!("set left {} input untouched for path {}", value_kind(data), path);
    }
    data
}

/// Copy-on-write [`set`]: returns an updated copy and leaves `data` alone.
pub fn set_cloned(data: &Value, path: &str, value: Value) -> Value {
    let mut copy = data.clone();
    set(&mut copy, path, value);
    copy
}

fn assign_at(current: &mut Value, segments: &[&str], value: Value) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return false;
    };

    match current {
        Value::Object(map) => {
            if rest.is_empty() {
                map.insert(segment.to_string(), value);
                return true;
            }
            let next = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            assign_at(next, rest, value)
        }
        Value::Array(items) => {
            let Some(index) = array_index(segment) else {
                return false;
            };
            if rest.is_empty() {
                return match index.cmp(&items.len()) {
                    std::cmp::Ordering::Less => {
                        items[index] = value;
                        true
                    }
                    std::cmp::Ordering::Equal => {
                        items.push(value);
                        true
                    }
                    std::cmp::Ordering::Greater => false,
                };
            }
            items
                .get_mut(index)
                .is_some_and(|next| assign_at(next, rest, value))
        }
        _ => false,
    }
}

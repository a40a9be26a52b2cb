//! # Array Operations
//!
//! Set-like, grouping, and chunking helpers over JSON arrays. Inputs are never
//! modified; every function builds a new array. Elements compare by value,
//! with numbers compared numerically (`1` equals `1.0`).

use datakit_types::value_kind;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

fn passthrough(operation: &str, data: &Value) -> Value {
    debug!("{} passthrough for {} input", operation, value_kind(data));
    data.clone()
}

/// Value equality where numbers compare by magnitude, not representation.
///
/// `serde_json` keeps `1` and `1.0` as distinct numbers; for set operations
/// they are the same element. Containers compare element-wise with the same
/// rule.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => match (left.as_f64(), right.as_f64()) {
            (Some(left), Some(right)) => left == right,
            _ => left == right,
        },
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len() && left.iter().zip(right).all(|(left, right)| values_equal(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .all(|(key, value)| right.get(key).is_some_and(|other| values_equal(value, other)))
        }
        _ => left == right,
    }
}

fn contains_value(items: &[Value], candidate: &Value) -> bool {
    items.iter().any(|item| values_equal(item, candidate))
}

fn empty_array(operation: &str, data: &Value) -> Value {
    debug!("{} returning empty array for {} input", operation, value_kind(data));
    Value::Array(Vec::new())
}

/// Drops later duplicates, keeping first-occurrence order.
///
/// # Arguments
/// * `data` - The array to deduplicate
///
/// # Returns
/// A new array compared with [`values_equal`], or `[]` for non-array input
///
/// # Example
/// ```rust
/// use datakit_util::array_ops::unique;
/// use serde_json::json;
///
/// assert_eq!(unique(&json!([3, 1, 3, 2, 1])), json!([3, 1, 2]));
/// ```
pub fn unique(data: &Value) -> Value {
    let Value::Array(items) = data else {
        return passthrough("unique", data);
    };

    let mut seen: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !contains_value(&seen, item) {
            seen.push(item.clone());
        }
    }
    Value::Array(seen)
}

/// Flattens nested arrays of any depth into one array.
pub fn flatten(data: &Value) -> Value {
    let Value::Array(items) = data else {
        return passthrough("flatten", data);
    };

    let mut flat = Vec::with_capacity(items.len());
    flatten_into(items, &mut flat);
    Value::Array(flat)
}

fn flatten_into(items: &[Value], flat: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Array(nested) => flatten_into(nested, flat),
            other => flat.push(other.clone()),
        }
    }
}

/// Elements of the first array present in every other array.
///
/// Order and duplicates follow the first array. No arrays yields `[]`, and so
/// does any argument that is not an array.
///
/// # Example
/// ```rust
/// use datakit_util::array_ops::intersection;
/// use serde_json::json;
///
/// assert_eq!(intersection(&[json!([1, 2, 3]), json!([2, 3, 4])]), json!([2, 3]));
/// assert_eq!(intersection(&[]), json!([]));
/// ```
pub fn intersection(arrays: &[Value]) -> Value {
    let mut lists = Vec::with_capacity(arrays.len());
    for array in arrays {
        match array {
            Value::Array(items) => lists.push(items),
            other => return empty_array("intersection", other),
        }
    }

    let Some((first, rest)) = lists.split_first() else {
        return Value::Array(Vec::new());
    };

    let shared = first
        .iter()
        .filter(|item| rest.iter().all(|other| contains_value(other, item)))
        .cloned()
        .collect();
    Value::Array(shared)
}

/// Elements of `left` absent from `right`, in `left`'s order.
pub fn difference(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Array(left_items), Value::Array(right_items)) => Value::Array(
            left_items
                .iter()
                .filter(|item| !contains_value(right_items, item))
                .cloned()
                .collect(),
        ),
        (Value::Array(_), other) | (other, _) => empty_array("difference", other),
    }
}

/// Buckets elements by `key_for`, preserving encounter order in each bucket.
///
/// Buckets appear in the order their key was first produced. A non-array input
/// yields an empty mapping.
///
/// # Example
/// ```rust
/// use datakit_util::array_ops::group_by;
/// use serde_json::json;
///
/// let words = json!(["apple", "avocado", "banana"]);
/// let grouped = group_by(&words, |word| word.as_str().unwrap_or_default()[..1].to_string());
/// assert_eq!(grouped, json!({"a": ["apple", "avocado"], "b": ["banana"]}));
/// ```
pub fn group_by<F>(data: &Value, key_for: F) -> Value
where
    F: Fn(&Value) -> String,
{
    let Value::Array(items) = data else {
        debug!("group_by returning empty mapping for {} input", value_kind(data));
        return Value::Object(Map::new());
    };

    let mut buckets: IndexMap<String, Vec<Value>> = IndexMap::new();
    for item in items {
        buckets.entry(key_for(item)).or_default().push(item.clone());
    }

    Value::Object(
        buckets
            .into_iter()
            .map(|(key, members)| (key, Value::Array(members)))
            .collect(),
    )
}

/// Splits into consecutive chunks of `size`; the last chunk may be shorter.
///
/// A size below one or a non-array input yields `[]`.
///
/// # Arguments
/// * `data` - The array to split
/// * `size` - Elements per chunk
///
/// # Returns
/// An array of arrays in the original order
///
/// # Example
/// ```rust
/// use datakit_util::array_ops::chunk;
/// use serde_json::json;
///
/// assert_eq!(chunk(&json!([1, 2, 3, 4, 5]), 2), json!([[1, 2], [3, 4], [5]]));
/// assert_eq!(chunk(&json!([1, 2]), -1), json!([]));
/// ```
pub fn chunk(data: &Value, size: i64) -> Value {
    let Value::Array(items) = data else {
        return empty_array("chunk", data);
    };
    let Some(size) = usize::try_from(size).ok().filter(|size| *size > 0) else {
        debug!("chunk returning empty array for size {}", size);
        return Value::Array(Vec::new());
    };

    Value::Array(items.chunks(size).map(|window| Value::Array(window.to_vec())).collect())
}

//! # datakit-util
//!
//! Stateless helpers over JSON-shaped data: string transforms, key case
//! conversion, array set operations, object path access, and date formatting.
//!
//! Each module is usable on its own. This crate root is the aggregated
//! namespace: it re-exports every module's public operations in a fixed
//! order (text, case, array, object, date) plus [`custom_transform`] and the
//! configurable [`DataTransformer`]. The re-export list below is the single
//! source of truth for facade names; two modules exporting the same name is a
//! compile error here, never a silent shadow.
//!
//! Type mismatches are not errors. A function handed the wrong kind of value
//! returns it unchanged, or returns the empty value its docs name. Only
//! structural copies can fail, with [`TransformError`].
//!
//! The facade exposes both [`set`], which mutates in place, and
//! [`set_cloned`], which does not. [`DataTransformer::set`] is copy-on-write.

pub mod array_ops;
pub mod case_conversion;
pub mod date_handling;
pub mod object_ops;
pub mod text_processing;
pub mod transformer;

use serde_json::Value;
use tracing::debug;

pub use datakit_types::{AsCalendarDate, SearchPattern, TransformError, TransformerConfig};

pub use text_processing::{
    capitalize, capitalize_str, replace_all, replace_all_str, slugify, slugify_str, to_lower_case, to_upper_case,
    trim, truncate, truncate_str, truncate_with,
};

pub use case_conversion::{
    camel_to_kebab, camel_to_kebab_key, camel_to_snake, camel_to_snake_key, convert_keys, kebab_to_camel,
    kebab_to_camel_key, snake_to_camel, snake_to_camel_key, to_camel_case_normalized, to_snake_case_normalized,
};

pub use array_ops::{chunk, difference, flatten, group_by, intersection, unique, values_equal};

pub use object_ops::{
    deep_clone, deep_clone_from, deep_clone_with_limit, get, get_ref, merge_objects, omit, pick, set, set_cloned,
};

pub use date_handling::{add_days, difference_in_days, format_date, is_after, is_before, parse_date, subtract_days};

pub use transformer::DataTransformer;

/// Applies `transform` to `data` when one is supplied, otherwise returns `data`.
///
/// # Example
/// ```rust
/// use datakit_util::custom_transform;
/// use serde_json::{Value, json};
///
/// let doubled = custom_transform(json!(21), Some(|v: Value| json!(v.as_i64().unwrap_or(0) * 2)));
/// assert_eq!(doubled, json!(42));
/// assert_eq!(custom_transform(json!("as is"), None::<fn(Value) -> Value>), json!("as is"));
/// ```
pub fn custom_transform<F>(data: Value, transform: Option<F>) -> Value
where
    F: FnOnce(Value) -> Value,
{
    match transform {
        Some(transform) => transform(data),
        None => {
            debug!("custom_transform called without a transform");
            data
        }
    }
}

//! The `DataTransformer` facade object.
//!
//! Wraps the free functions behind one value carrying a
//! [`TransformerConfig`], so hosts can configure truncation and clone limits
//! once and pass a single handle around. Every method is a thin delegation;
//! the only stateful choices are the configured ellipsis and depth limit.
//!
//! `set` on the transformer is copy-on-write; use [`crate::object_ops::set`]
//! for in-place assignment.

use chrono::NaiveDateTime;
use datakit_types::{AsCalendarDate, SearchPattern, TransformError, TransformerConfig};
use serde_json::Value;

use crate::{array_ops, case_conversion, date_handling, object_ops, text_processing};

/// Configured entry point to every datakit operation.
#[derive(Debug, Clone, Default)]
pub struct DataTransformer {
    config: TransformerConfig,
}

impl DataTransformer {
    /// Transformer using `config` as given; the environment is not consulted.
    pub fn new(config: TransformerConfig) -> Self {
        Self { config }
    }

    /// Transformer configured from `DATAKIT_*` environment variables.
    ///
    /// This is the only place the environment is read. `default()` and `new`
    /// never look at it.
    ///
    /// # Returns
    /// The configured transformer, or [`TransformError::InvalidConfig`] when a
    /// variable cannot be interpreted
    pub fn from_env() -> Result<Self, TransformError> {
        TransformerConfig::from_env().map(Self::new)
    }

    /// Active configuration.
    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    /// Rewrites every mapping key in `data` from snake_case to camelCase.
    ///
    /// # Arguments
    /// * `data` - Any JSON value; scalars come back unchanged
    ///
    /// # Returns
    /// A new document with the same nesting and converted keys
    pub fn snake_to_camel(&self, data: &Value) -> Value {
        case_conversion::snake_to_camel(data)
    }

    /// Rewrites every mapping key in `data` from camelCase to snake_case.
    ///
    /// A leading capital becomes a leading underscore (`Foo` → `_foo`).
    pub fn camel_to_snake(&self, data: &Value) -> Value {
        case_conversion::camel_to_snake(data)
    }

    /// Key conversion from kebab-case to camelCase.
    pub fn kebab_to_camel(&self, data: &Value) -> Value {
        case_conversion::kebab_to_camel(data)
    }

    /// Key conversion from camelCase to kebab-case.
    pub fn camel_to_kebab(&self, data: &Value) -> Value {
        case_conversion::camel_to_kebab(data)
    }

    /// Uppercases strings; other values pass through.
    pub fn to_upper_case(&self, data: &Value) -> Value {
        text_processing::to_upper_case(data)
    }

    /// Lowercases strings; other values pass through.
    pub fn to_lower_case(&self, data: &Value) -> Value {
        text_processing::to_lower_case(data)
    }

    pub fn capitalize(&self, data: &Value) -> Value {
        text_processing::capitalize(data)
    }

    pub fn trim(&self, data: &Value) -> Value {
        text_processing::trim(data)
    }

    /// Replaces every occurrence of a literal or regex `search`.
    pub fn replace_all(&self, data: &Value, search: impl Into<SearchPattern>, replacement: &str) -> Value {
        text_processing::replace_all(data, search, replacement)
    }

    pub fn slugify(&self, data: &Value) -> Value {
        text_processing::slugify(data)
    }

    /// Truncates strings longer than `max_length` characters and appends the
    /// configured ellipsis.
    ///
    /// # Arguments
    /// * `data` - The candidate value; non-strings pass through
    /// * `max_length` - Characters kept before the marker
    ///
    /// # Returns
    /// The shortened string, or `data` when it already fits
    pub fn truncate(&self, data: &Value, max_length: usize) -> Value {
        text_processing::truncate_with(data, max_length, &self.config.ellipsis)
    }

    pub fn unique(&self, data: &Value) -> Value {
        array_ops::unique(data)
    }

    pub fn flatten(&self, data: &Value) -> Value {
        array_ops::flatten(data)
    }

    /// Elements of the first array present in all others.
    pub fn intersection(&self, arrays: &[Value]) -> Value {
        array_ops::intersection(arrays)
    }

    pub fn difference(&self, left: &Value, right: &Value) -> Value {
        array_ops::difference(left, right)
    }

    /// Buckets array elements under the string `key_for` returns.
    pub fn group_by<F>(&self, data: &Value, key_for: F) -> Value
    where
        F: Fn(&Value) -> String,
    {
        array_ops::group_by(data, key_for)
    }

    /// Consecutive sub-arrays of `size`; `[]` for a size below one.
    pub fn chunk(&self, data: &Value, size: i64) -> Value {
        array_ops::chunk(data, size)
    }

    /// Structural copy that refuses nesting deeper than the configured
    /// `max_depth`.
    ///
    /// Use [`crate::object_ops::deep_clone`] for an unbounded, infallible
    /// copy.
    ///
    /// # Returns
    /// The copy, or [`TransformError::UnsupportedStructure`] past the limit
    pub fn deep_clone(&self, data: &Value) -> Result<Value, TransformError> {
        object_ops::deep_clone_with_limit(data, self.config.max_depth)
    }

    /// Shallow merge where later mappings win.
    pub fn merge_objects(&self, objects: &[Value]) -> Value {
        object_ops::merge_objects(objects)
    }

    pub fn pick(&self, data: &Value, keys: &[&str]) -> Value {
        object_ops::pick(data, keys)
    }

    pub fn omit(&self, data: &Value, keys: &[&str]) -> Value {
        object_ops::omit(data, keys)
    }

    /// Value at a dot-separated `path`, or `default`.
    pub fn get(&self, data: &Value, path: &str, default: Value) -> Value {
        object_ops::get(data, path, default)
    }

    /// Copy-on-write path assignment; `data` is left untouched.
    pub fn set(&self, data: &Value, path: &str, value: Value) -> Value {
        object_ops::set_cloned(data, path, value)
    }

    /// Renders `YYYY MM DD HH mm ss` tokens; `""` for non-dates.
    pub fn format_date(&self, date: impl AsCalendarDate, format: &str) -> String {
        date_handling::format_date(date, format)
    }

    /// First `YYYY-MM-DD` in `text`; `format` is not consulted.
    pub fn parse_date(&self, text: &str, format: &str) -> Option<NaiveDateTime> {
        date_handling::parse_date(text, format)
    }

    pub fn add_days(&self, date: impl AsCalendarDate, days: i64) -> Option<NaiveDateTime> {
        date_handling::add_days(date, days)
    }

    pub fn subtract_days(&self, date: impl AsCalendarDate, days: i64) -> Option<NaiveDateTime> {
        date_handling::subtract_days(date, days)
    }

    /// Whole days from `right` to `left`, rounded half up.
    pub fn difference_in_days(&self, left: impl AsCalendarDate, right: impl AsCalendarDate) -> i64 {
        date_handling::difference_in_days(left, right)
    }

    pub fn is_before(&self, left: impl AsCalendarDate, right: impl AsCalendarDate) -> bool {
        date_handling::is_before(left, right)
    }

    pub fn is_after(&self, left: impl AsCalendarDate, right: impl AsCalendarDate) -> bool {
        date_handling::is_after(left, right)
    }

    /// Applies `transform` when present, otherwise returns `data`.
    pub fn custom_transform<F>(&self, data: Value, transform: Option<F>) -> Value
    where
        F: FnOnce(Value) -> Value,
    {
        crate::custom_transform(data, transform)
    }
}

//! # Text Processing Utilities
//!
//! String transforms over JSON values. Every value-level function returns the
//! input unchanged when it is not a string; the `*_str` forms operate on text
//! the caller already holds.

use datakit_types::{DEFAULT_ELLIPSIS, SearchPattern, value_kind};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde_json::Value;
use tracing::debug;

static NON_SLUG_CHARACTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid slug filter"));
static SLUG_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]+").expect("valid slug separator"));

/// Applies `transform` to string values, passing every other value through.
fn map_text(operation: &str, data: &Value, transform: impl FnOnce(&str) -> String) -> Value {
    match data {
        Value::String(text) => Value::String(transform(text)),
        other => {
            debug!("{} passthrough for {} input", operation, value_kind(other));
            other.clone()
        }
    }
}

/// Uppercases the whole string.
///
/// # Example
/// ```rust
/// use datakit_util::text_processing::to_upper_case;
/// use serde_json::json;
///
/// assert_eq!(to_upper_case(&json!("hello")), json!("HELLO"));
/// assert_eq!(to_upper_case(&json!(42)), json!(42));
/// ```
pub fn to_upper_case(data: &Value) -> Value {
    map_text("to_upper_case", data, str::to_uppercase)
}

/// Lowercases the whole string.
pub fn to_lower_case(data: &Value) -> Value {
    map_text("to_lower_case", data, str::to_lowercase)
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(data: &Value) -> Value {
    map_text("capitalize", data, capitalize_str)
}

/// [`capitalize`] over a plain string.
pub fn capitalize_str(text: &str) -> String {
    let mut characters = text.chars();
    match characters.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(characters).collect(),
    }
}

/// Strips leading and trailing Unicode whitespace.
pub fn trim(data: &Value) -> Value {
    map_text("trim", data, |text| text.trim().to_string())
}

/// Replaces every occurrence of `search` with `replacement`.
///
/// Literal searches split on the needle and join with the replacement, so an
/// empty needle interleaves the replacement between characters. Regex searches
/// replace every non-overlapping match and insert `replacement` verbatim.
///
/// # Arguments
/// * `data` - The value to rewrite; non-strings pass through
/// * `search` - A `&str`/`String` needle or a compiled [`regex::Regex`]
/// * `replacement` - Inserted as-is; `$1` is not expanded
///
/// # Returns
/// The rewritten string, or a clone of `data`
///
/// # Example
/// ```rust
/// use datakit_util::text_processing::replace_all;
/// use regex::Regex;
/// use serde_json::json;
///
/// assert_eq!(replace_all(&json!("a.b.c"), ".", "/"), json!("a/b/c"));
/// let digits = Regex::new(r"\d+").unwrap();
/// assert_eq!(replace_all(&json!("r2d2"), &digits, "#"), json!("r#d#"));
/// ```
pub fn replace_all(data: &Value, search: impl Into<SearchPattern>, replacement: &str) -> Value {
    let search = search.into();
    map_text("replace_all", data, |text| replace_all_str(text, &search, replacement))
}

/// String form of [`replace_all`] taking an already converted pattern.
pub fn replace_all_str(text: &str, search: &SearchPattern, replacement: &str) -> String {
    match search {
        SearchPattern::Literal(needle) if needle.is_empty() => {
            let characters: Vec<String> = text.chars().map(String::from).collect();
            characters.join(replacement)
        }
        SearchPattern::Literal(needle) => text.split(needle.as_str()).collect::<Vec<_>>().join(replacement),
        SearchPattern::Regex(pattern) => pattern.replace_all(text, NoExpand(replacement)).into_owned(),
    }
}

/// Produces a URL-friendly slug.
///
/// Lowercases and trims, drops everything but word characters, whitespace and
/// `-`, then collapses whitespace, `_` and `-` runs into single hyphens.
///
/// # Returns
/// The slug (possibly empty), or a clone of `data` when it is not a string
///
/// # Example
/// ```rust
/// use datakit_util::text_processing::slugify;
/// use serde_json::json;
///
/// assert_eq!(slugify(&json!("  Hello_World!! ")), json!("hello-world"));
/// ```
pub fn slugify(data: &Value) -> Value {
    map_text("slugify", data, slugify_str)
}

/// Slug of a plain string.
pub fn slugify_str(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_SLUG_CHARACTERS.replace_all(lowered.trim(), "");
    let collapsed = SLUG_SEPARATORS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Cuts the string to `max_length` characters and appends `...`.
///
/// The result may be up to three characters longer than `max_length`; strings
/// that already fit are returned as they are.
///
/// # Arguments
/// * `data` - The value to shorten; non-strings pass through
/// * `max_length` - Number of characters (not bytes) kept
///
/// # Returns
/// The cut string with `...` appended, or `data` unchanged
///
/// # Example
/// ```rust
/// use datakit_util::text_processing::truncate;
/// use serde_json::json;
///
/// assert_eq!(truncate(&json!("hello world"), 5), json!("hello..."));
/// assert_eq!(truncate(&json!("hello"), 5), json!("hello"));
/// ```
pub fn truncate(data: &Value, max_length: usize) -> Value {
    truncate_with(data, max_length, DEFAULT_ELLIPSIS)
}

/// Like [`truncate`] with a caller-chosen marker.
pub fn truncate_with(data: &Value, max_length: usize, ellipsis: &str) -> Value {
    map_text("truncate", data, |text| truncate_str(text, max_length, ellipsis))
}

/// Character-boundary truncation of a plain string.
pub fn truncate_str(text: &str, max_length: usize, ellipsis: &str) -> String {
    match text.char_indices().nth(max_length) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ellipsis),
        None => text.to_string(),
    }
}

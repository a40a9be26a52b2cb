//! # Case Conversion
//!
//! Key-style conversion between `snake_case`, `kebab-case`, and `camelCase`,
//! for single tokens and recursively for every key of a JSON document.
//!
//! The literal rules are deliberately simple: `_x`/`-x` becomes `X` only for a
//! lowercase ASCII letter, and every uppercase ASCII letter becomes `_x`/`-x`,
//! including a leading one (`"Foo"` → `"_foo"`). Conversions are therefore not
//! inverses of each other on keys holding digits or acronyms. The
//! `*_normalized` functions segment words with `heck` instead.

use datakit_types::value_kind;
use heck::{ToLowerCamelCase, ToSnakeCase};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use tracing::debug;

static SNAKE_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([a-z])").expect("valid snake pattern"));
static KEBAB_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([a-z])").expect("valid kebab pattern"));
static UPPERCASE_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid uppercase pattern"));

fn uppercase_capture(captures: &Captures) -> String {
    captures[1].to_ascii_uppercase()
}

/// `first_name` → `firstName`.
pub fn snake_to_camel_key(key: &str) -> String {
    SNAKE_SEGMENT.replace_all(key, uppercase_capture).into_owned()
}

/// `firstName` → `first_name`; `Foo` → `_foo`.
pub fn camel_to_snake_key(key: &str) -> String {
    UPPERCASE_LETTER
        .replace_all(key, |captures: &Captures| format!("_{}", captures[0].to_ascii_lowercase()))
        .into_owned()
}

/// `first-name` → `firstName`.
pub fn kebab_to_camel_key(key: &str) -> String {
    KEBAB_SEGMENT.replace_all(key, uppercase_capture).into_owned()
}

/// `firstName` → `first-name`.
pub fn camel_to_kebab_key(key: &str) -> String {
    UPPERCASE_LETTER
        .replace_all(key, |captures: &Captures| format!("-{}", captures[0].to_ascii_lowercase()))
        .into_owned()
}

/// Word-aware snake case: `"HTTPServer2"` → `"http_server2"`, never a leading underscore.
pub fn to_snake_case_normalized(key: &str) -> String {
    key.to_snake_case()
}

/// Word-aware lower camel case: `"http_server"` → `"httpServer"`.
pub fn to_camel_case_normalized(key: &str) -> String {
    key.to_lower_camel_case()
}

/// Rebuilds `data` with every mapping key rewritten by `convert_key`.
///
/// Arrays are walked element-wise; scalars are returned unchanged. Two keys
/// that convert to the same name collapse into one entry holding the later
/// value.
///
/// # Arguments
/// * `data` - The document whose keys are rewritten
/// * `convert_key` - Applied to each key exactly once
///
/// # Returns
/// A new document; `data` is not modified
pub fn convert_keys(data: &Value, convert_key: &impl Fn(&str) -> String) -> Value {
    match data {
        Value::Array(items) => Value::Array(items.iter().map(|item| convert_keys(item, convert_key)).collect()),
        Value::Object(map) => {
            let mut converted = Map::with_capacity(map.len());
            for (key, value) in map {
                converted.insert(convert_key(key), convert_keys(value, convert_key));
            }
            Value::Object(converted)
        }
        scalar => {
            debug!("key conversion passthrough for {} input", value_kind(scalar));
            scalar.clone()
        }
    }
}

/// Converts every key in `data` from snake_case to camelCase.
///
/// # Example
/// ```rust
/// use datakit_util::case_conversion::snake_to_camel;
/// use serde_json::json;
///
/// let converted = snake_to_camel(&json!({"first_name": "A", "nested": {"last_name": "B"}}));
/// assert_eq!(converted, json!({"firstName": "A", "nested": {"lastName": "B"}}));
/// ```
pub fn snake_to_camel(data: &Value) -> Value {
    convert_keys(data, &snake_to_camel_key)
}

/// Converts every key in `data` from camelCase to snake_case.
pub fn camel_to_snake(data: &Value) -> Value {
    convert_keys(data, &camel_to_snake_key)
}

/// Converts every key in `data` from kebab-case to camelCase.
pub fn kebab_to_camel(data: &Value) -> Value {
    convert_keys(data, &kebab_to_camel_key)
}

/// Converts every key in `data` from camelCase to kebab-case.
pub fn camel_to_kebab(data: &Value) -> Value {
    convert_keys(data, &camel_to_kebab_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_level_rules() {
        assert_eq!(snake_to_camel_key("first_name"), "firstName");
        assert_eq!(snake_to_camel_key("a_b_c"), "aBC");
        assert_eq!(snake_to_camel_key("version_2"), "version_2");
        assert_eq!(camel_to_snake_key("firstName"), "first_name");
        assert_eq!(camel_to_snake_key("Foo"), "_foo");
        assert_eq!(camel_to_snake_key("userID"), "user_i_d");
        assert_eq!(kebab_to_camel_key("content-type"), "contentType");
        assert_eq!(camel_to_kebab_key("contentType"), "content-type");
    }

    #[test]
    fn normalized_variants_segment_words() {
        assert_eq!(to_snake_case_normalized("Foo"), "foo");
        assert_eq!(to_snake_case_normalized("userID"), "user_id");
        assert_eq!(to_camel_case_normalized("first_name"), "firstName");
        assert_eq!(to_camel_case_normalized("content-type"), "contentType");
    }

    #[test]
    fn structural_conversion_preserves_shape() {
        let source = json!({
            "firstName": "John",
            "contactDetails": {"emailAddress": "john.doe@example.com", "phoneNumber": "123-456-7890"},
            "hobbies": ["readingBooks", {"favoriteBook": "Dune"}]
        });
        let expected = json!({
            "first_name": "John",
            "contact_details": {"email_address": "john.doe@example.com", "phone_number": "123-456-7890"},
            "hobbies": ["readingBooks", {"favorite_book": "Dune"}]
        });
        assert_eq!(camel_to_snake(&source), expected);
        assert_eq!(snake_to_camel(&expected), source);
    }

    #[test]
    fn scalars_pass_through() {
        for scalar in [json!(null), json!(1), json!("first_name"), json!(true)] {
            assert_eq!(snake_to_camel(&scalar), scalar);
            assert_eq!(camel_to_kebab(&scalar), scalar);
        }
    }

    #[test]
    fn repeated_conversion_is_idempotent() {
        let data = json!({"first_name": {"last_name": [{"zip_code": 1}]}, "ok": 2});
        let once = snake_to_camel(&data);
        assert_eq!(snake_to_camel(&once), once);

        let snake = camel_to_snake(&once);
        assert_eq!(camel_to_snake(&snake), snake);
    }

    #[test]
    fn kebab_round_trip_on_documents() {
        let data = json!({"content-type": "json", "x-rate-limit": {"max-age": 10}});
        let camel = kebab_to_camel(&data);
        assert_eq!(camel, json!({"contentType": "json", "xRateLimit": {"maxAge": 10}}));
        assert_eq!(camel_to_kebab(&camel), data);
    }

    #[test]
    fn colliding_keys_keep_the_later_value() {
        let data = json!({"a_b": 1, "aB": 2});
        assert_eq!(snake_to_camel(&data), json!({"aB": 2}));
    }
}

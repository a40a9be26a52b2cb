//! Search patterns accepted by string replacement.

use regex::Regex;

/// What `replace_all` looks for: a literal substring or a compiled regex.
#[derive(Debug, Clone)]
pub enum SearchPattern {
    /// Plain substring, matched verbatim.
    Literal(String),
    /// Regular expression; every non-overlapping match is replaced.
    Regex(Regex),
}

impl From<&str> for SearchPattern {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for SearchPattern {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<Regex> for SearchPattern {
    fn from(value: Regex) -> Self {
        Self::Regex(value)
    }
}

impl From<&Regex> for SearchPattern {
    fn from(value: &Regex) -> Self {
        Self::Regex(value.clone())
    }
}

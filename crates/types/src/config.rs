//! Transformer configuration.
//!
//! Defaults cover every call site; hosts may embed the struct in their own
//! config file (it derives `Deserialize`) or let the environment override it.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::TransformError;

/// Environment variable overriding the deep-clone nesting limit.
pub const MAX_DEPTH_ENV: &str = "DATAKIT_MAX_DEPTH";
/// Environment variable overriding the truncation marker.
pub const ELLIPSIS_ENV: &str = "DATAKIT_ELLIPSIS";

pub const DEFAULT_MAX_DEPTH: usize = 128;
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Knobs shared by the facade's operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerConfig {
    /// Deepest nesting a structural copy will follow before giving up.
    pub max_depth: usize,
    /// Marker appended by `truncate`.
    pub ellipsis: String,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

impl TransformerConfig {
    /// Builds the configuration from defaults plus `DATAKIT_*` overrides.
    pub fn from_env() -> Result<Self, TransformError> {
        Self::from_env_vars(std::env::var(MAX_DEPTH_ENV).ok(), std::env::var(ELLIPSIS_ENV).ok())
    }

    fn from_env_vars(max_depth: Option<String>, ellipsis: Option<String>) -> Result<Self, TransformError> {
        let mut config = Self::default();

        if let Some(raw) = max_depth.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
            config.max_depth = parse_max_depth(raw)?;
        }
        if let Some(marker) = ellipsis {
            config.ellipsis = marker;
        }

        Ok(config)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }
}

fn parse_max_depth(raw: &str) -> Result<usize, TransformError> {
    match raw.parse::<usize>() {
        Ok(0) => {
            warn!("{} must be positive, got 0", MAX_DEPTH_ENV);
            Err(TransformError::InvalidConfig {
                name: MAX_DEPTH_ENV.to_string(),
                reason: "depth must be at least 1".to_string(),
            })
        }
        Ok(depth) => Ok(depth),
        Err(error) => {
            warn!("Ignoring unparsable {}={}: {}", MAX_DEPTH_ENV, raw, error);
            Err(TransformError::InvalidConfig {
                name: MAX_DEPTH_ENV.to_string(),
                reason: error.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        temp_env::with_vars([(MAX_DEPTH_ENV, None::<&str>), (ELLIPSIS_ENV, None::<&str>)], || {
            let config = TransformerConfig::from_env().expect("defaults load");
            assert_eq!(config, TransformerConfig::default());
            assert_eq!(config.max_depth, 128);
            assert_eq!(config.ellipsis, "...");
        });
    }

    #[test]
    fn default_never_reads_the_environment() {
        temp_env::with_vars([(MAX_DEPTH_ENV, Some("2")), (ELLIPSIS_ENV, Some("~"))], || {
            let config = TransformerConfig::default();
            assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
            assert_eq!(config.ellipsis, DEFAULT_ELLIPSIS);
        });
    }

    #[test]
    fn environment_overrides_defaults() {
        temp_env::with_vars([(MAX_DEPTH_ENV, Some(" 16 ")), (ELLIPSIS_ENV, Some("…"))], || {
            let config = TransformerConfig::from_env().expect("overrides load");
            assert_eq!(config.max_depth, 16);
            assert_eq!(config.ellipsis, "…");
        });
    }

    #[test]
    fn rejects_non_numeric_or_zero_depth() {
        temp_env::with_var(MAX_DEPTH_ENV, Some("deep"), || {
            let error = TransformerConfig::from_env().expect_err("non-numeric depth");
            assert!(matches!(error, TransformError::InvalidConfig { ref name, .. } if name == MAX_DEPTH_ENV));
        });
        temp_env::with_var(MAX_DEPTH_ENV, Some("0"), || {
            assert!(TransformerConfig::from_env().is_err());
        });
    }

    #[test]
    fn deserializes_partial_documents() {
        let config: TransformerConfig = serde_json::from_str(r#"{"ellipsis": " [more]"}"#).expect("partial config");
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.ellipsis, " [more]");
    }

    #[test]
    fn builder_methods_replace_fields() {
        let config = TransformerConfig::default().with_max_depth(4).with_ellipsis("~");
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.ellipsis, "~");
    }
}

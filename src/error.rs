//! Error types for the docsite library.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::Violations;

/// Result type alias using `SiteError`.
pub type Result<T> = std::result::Result<T, SiteError>;

/// Error types for configuration, content loading, and validation.
#[derive(Error, Debug)]
pub enum SiteError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A collection name was referenced that was never registered.
    ///
    /// This is a configuration defect, not an authoring defect, and is
    /// fatal to the build.
    #[error("Configuration error: no schema registered for collection '{collection}'")]
    UnknownCollection { collection: String },

    /// One or more fields of a record violate its collection's schema.
    ///
    /// Carries every field-level violation for the record, not just the
    /// first one found.
    #[error("Validation failed in collection '{collection}':\n{violations}")]
    Validation {
        collection: String,
        violations: Violations,
    },

    /// Frontmatter parsing error with file location.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl SiteError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new unknown-collection error.
    pub fn unknown_collection(collection: impl Into<String>) -> Self {
        Self::UnknownCollection {
            collection: collection.into(),
        }
    }

    /// Create a new validation error from a set of violations.
    pub fn validation(collection: impl Into<String>, violations: Violations) -> Self {
        Self::Validation {
            collection: collection.into(),
            violations,
        }
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True if this error is an authoring defect in a content document
    /// rather than a configuration defect.
    pub fn is_authoring_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Frontmatter { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = SiteError::config("missing field");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_unknown_collection_error() {
        let err = SiteError::unknown_collection("changelog");
        assert!(err.to_string().contains("changelog"));
        assert!(err.to_string().contains("no schema registered"));
        assert!(!err.is_authoring_error());
    }

    #[test]
    fn test_frontmatter_error() {
        let err = SiteError::frontmatter("content/docs/intro.md", "missing title");
        assert!(err.to_string().contains("Frontmatter error"));
        assert!(err.to_string().contains("content/docs/intro.md"));
        assert!(err.is_authoring_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SiteError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}

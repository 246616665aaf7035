//! Error types for relnotes

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RelnotesError
pub type Result<T> = std::result::Result<T, RelnotesError>;

/// Main error type for relnotes operations
#[derive(Debug, Error)]
pub enum RelnotesError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Template-related errors
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Issue tracker errors
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse configuration {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Version string is not valid semantic version syntax
    #[error("Invalid version '{version}': {reason}")]
    Invalid { version: String, reason: String },
}

/// Template parse and render errors
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template text could not be parsed
    #[error("Template syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// The template parsed but could not be executed against the data
    #[error("Template rendering failed at line {line}: {message}")]
    Render { line: usize, message: String },
}

/// Issue tracker provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No milestone matches the requested version
    #[error("Milestone not found for version {0}")]
    MilestoneNotFound(String),

    /// Transport-level failure talking to the provider
    #[error("Request to {provider} failed: {message}")]
    Request { provider: String, message: String },

    /// The provider answered with an error status
    #[error("{provider} API error: {status} - {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    /// Provider client is misconfigured (repository, token, base URL)
    #[error("Provider configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_not_found_message() {
        let err: RelnotesError = ProviderError::MilestoneNotFound("1.2.0".to_string()).into();
        assert_eq!(err.to_string(), "Milestone not found for version 1.2.0");
    }

    #[test]
    fn test_template_error_is_transparent() {
        let err: RelnotesError = TemplateError::Syntax {
            line: 3,
            message: "unclosed action".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Template syntax error at line 3: unclosed action"
        );
    }
}

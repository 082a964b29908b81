//! Error types for configuration loading.

/// Errors that can occur while loading or validating a `weft.toml` file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be parsed as valid TOML.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("missing required configuration field: {0}")]
    MissingField(String),

    /// A field has a value outside its valid range.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The offending field path.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },
}

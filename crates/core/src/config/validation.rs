use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired { field: String, hint: String },

    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create a missing required field error
    pub fn missing_required(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: field.into(),
            hint: hint.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Trait for validating configuration values
pub trait ConfigValidator<T: ?Sized> {
    /// Validate a configuration value
    fn validate(&self, value: &T) -> Result<(), ConfigError>;
}

static NAMESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\\[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("namespace pattern is a valid regex")
});

/// Validates a backslash-separated class namespace such as `App\Domain`
pub struct NamespaceValidator {
    pub field: &'static str,
}

impl ConfigValidator<str> for NamespaceValidator {
    fn validate(&self, value: &str) -> Result<(), ConfigError> {
        if value.is_empty() {
            return Err(ConfigError::missing_required(
                self.field,
                "A root namespace such as 'App' is required",
            ));
        }

        if !NAMESPACE_PATTERN.is_match(value) {
            return Err(ConfigError::invalid_value(
                self.field,
                value,
                "identifiers separated by '\\'",
            ));
        }

        Ok(())
    }
}

/// Validates that a configured path is not empty
pub struct PathValidator {
    pub field: &'static str,
}

impl ConfigValidator<std::path::Path> for PathValidator {
    fn validate(&self, value: &std::path::Path) -> Result<(), ConfigError> {
        if value.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value(self.field, "", "non-empty path"));
        }
        Ok(())
    }
}

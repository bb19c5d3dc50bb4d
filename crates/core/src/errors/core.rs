use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the blueprint generator
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The primary subject of a statement names no entity in the tree.
    #[error("The [{reference}] model could not be found (referenced by {context})")]
    Resolution { reference: String, context: String },

    #[error("Codegen error: {message}")]
    Codegen { message: String },

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a resolution error for a reference that matched no entity
    pub fn resolution(reference: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Resolution {
            reference: reference.into(),
            context: context.into(),
        }
    }

    /// Create a new codegen error
    pub fn codegen(message: impl Into<String>) -> Self {
        Self::Codegen {
            message: message.into(),
        }
    }

    /// Wrap an IO failure that happened while writing `path`
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Check if the error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if the error is a statement resolution failure
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution { .. })
    }

    /// Check if the error came from the filesystem
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Write { .. })
    }
}

/// Result alias used across the generator crates
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_message() {
        let error = CoreError::resolution("Post", "resource PostResource");
        assert!(error.is_resolution());
        assert_eq!(
            error.to_string(),
            "The [Post] model could not be found (referenced by resource PostResource)"
        );
    }

    #[test]
    fn test_write_error_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = CoreError::write("app/Http/Resources/PostResource.php", io);
        assert!(error.is_io());
        assert!(error.to_string().contains("app/Http/Resources/PostResource.php"));
    }

    #[test]
    fn test_config_error_converts() {
        let error: CoreError = ConfigError::invalid_value("namespace", "", "a namespace").into();
        assert!(!error.is_validation());
        assert!(error.to_string().contains("namespace"));
    }
}

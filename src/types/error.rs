//! Unified Error Type System
//!
//! Centralized error types for the whole crate.
//!
//! ## Error Categories
//!
//! - **ParseError**: one source file could not be parsed (recovered per file)
//! - **ProviderError**: a project provider failed (recovered by the inference engine)
//! - **InputValidation**: malformed input from an upstream collaborator (propagated)
//! - **Configuration**: invalid configuration values
//! - **System**: IO / JSON failures
//!
//! Only `InputValidation`, `Configuration` and `System` errors ever leave the public
//! batch entry points. Parse and provider errors are logged and absorbed at the boundary
//! that owns the batch.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories used to decide whether a failure may be absorbed by a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed source for one file
    ParseError,
    /// A provider's detect / infer step failed
    ProviderError,
    /// Upstream contract violation
    InputValidation,
    /// Invalid configuration
    Configuration,
    /// IO, JSON and other system failures
    System,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::ProviderError => write!(f, "PROVIDER_ERROR"),
            Self::InputValidation => write!(f, "INPUT_VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::System => write!(f, "SYSTEM"),
        }
    }
}

impl ErrorCategory {
    /// Whether a batch may log this error and continue with the remaining items
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ParseError | Self::ProviderError)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation error with context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// What validation failed
    pub kind: ValidationErrorKind,
    /// Field or component that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
    /// Expected value or format
    pub expected: Option<String>,
    /// Actual value received
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Validation failed for '{}': {}", field, self.message)?;
        } else {
            write!(f, "Validation failed: {}", self.message)?;
        }
        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            write!(f, " (expected {}, got {})", expected, actual)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add expected/actual values
    pub fn with_comparison(
        mut self,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required field missing or empty
    MissingField,
    /// Invalid format (absolute path, backslashes, parent segments)
    Format,
    /// Two fields disagree with each other
    Consistency,
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum LensError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Parse error in {path}: {message}")]
    Parse { message: String, path: String },

    #[error("Provider '{provider}' failed: {message}")]
    Provider { provider: String, message: String },

    #[error("{0}")]
    Validation(ValidationError),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<ValidationError> for LensError {
    fn from(err: ValidationError) -> Self {
        LensError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, LensError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl LensError {
    /// Create a parse error for one file
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a provider error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse { .. } => ErrorCategory::ParseError,
            Self::Provider { .. } => ErrorCategory::ProviderError,
            Self::Validation(_) => ErrorCategory::InputValidation,
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Io(_) | Self::Json(_) => ErrorCategory::System,
        }
    }

    /// Whether a batch boundary may absorb this error
    pub fn is_recoverable(&self) -> bool {
        self.category().is_recoverable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            LensError::parse("a.tsx", "bad").category(),
            ErrorCategory::ParseError
        );
        assert_eq!(
            LensError::provider("vite", "boom").category(),
            ErrorCategory::ProviderError
        );
        let validation: LensError =
            ValidationError::new(ValidationErrorKind::Format, "absolute path").into();
        assert_eq!(validation.category(), ErrorCategory::InputValidation);
        assert_eq!(
            LensError::Config("x".into()).category(),
            ErrorCategory::Configuration
        );
    }

    #[test]
    fn test_only_parse_and_provider_are_recoverable() {
        assert!(LensError::parse("a", "b").is_recoverable());
        assert!(LensError::provider("a", "b").is_recoverable());
        assert!(!LensError::Config("x".into()).is_recoverable());
        let validation: LensError =
            ValidationError::new(ValidationErrorKind::MissingField, "empty").into();
        assert!(!validation.is_recoverable());
    }

    #[test]
    fn test_validation_display() {
        let err = ValidationError::new(ValidationErrorKind::Consistency, "extension mismatch")
            .with_field("files[0].ext")
            .with_comparison("tsx", "ts");
        assert_eq!(
            err.to_string(),
            "Validation failed for 'files[0].ext': extension mismatch (expected tsx, got ts)"
        );
    }
}

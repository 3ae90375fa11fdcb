//! Custom error types for sealed-keys
//!
//! This module defines the error hierarchy for the library using thiserror.
//! Decryption failures are deliberately collapsed into a single variant with
//! no detail so callers probing many envelopes learn nothing about why one
//! failed.

use thiserror::Error;

/// Boxed underlying cause attached to encryption failures
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for sealed-keys operations
#[derive(Error, Debug)]
pub enum SealError {
    /// Missing or empty master material, missing required secrets, bad settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Attempt to encrypt an empty plaintext
    #[error("Refusing to encrypt an empty value")]
    EmptyInput,

    /// Envelope does not have the `salt:iv:ciphertext` shape
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Wrong master material, corrupted or truncated data, bad padding.
    /// Never carries detail.
    #[error("Decryption failed")]
    Decryption,

    /// Underlying cipher failure while producing an envelope
    #[error("Encryption error: {message}")]
    Encryption {
        message: String,
        #[source]
        source: BoxedCause,
    },

    /// A failure while processing one named secret
    #[error("Failed to process secret '{name}': {source}")]
    Secret {
        name: String,
        #[source]
        source: Box<SealError>,
    },

    /// A lookup found no usable secret under this name
    #[error("Secret not available: {0}")]
    Unavailable(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl SealError {
    /// Create an encryption error with its underlying cause attached
    pub fn encryption(message: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::Encryption {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Attach the name of the secret being processed
    pub fn for_secret(self, name: impl Into<String>) -> Self {
        Self::Secret {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Check if this is a configuration error (including one wrapped for a secret)
    pub fn is_config(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Secret { source, .. } => source.is_config(),
            _ => false,
        }
    }

    /// Check if this error means the envelope could not be opened
    pub fn is_decryption(&self) -> bool {
        matches!(self, Self::Decryption)
    }
}

impl From<std::io::Error> for SealError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SealError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for sealed-keys operations
pub type SealResult<T> = Result<T, SealError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = SealError::Config("VITE_PEPPER is not set".into());
        assert_eq!(err.to_string(), "Configuration error: VITE_PEPPER is not set");
    }

    #[test]
    fn test_decryption_error_has_no_detail() {
        assert_eq!(SealError::Decryption.to_string(), "Decryption failed");
        assert!(SealError::Decryption.source().is_none());
    }

    #[test]
    fn test_secret_wrapper_names_secret() {
        let err = SealError::EmptyInput.for_secret("GITHUB_TOKEN");
        assert_eq!(
            err.to_string(),
            "Failed to process secret 'GITHUB_TOKEN': Refusing to encrypt an empty value"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_config_sees_through_secret_wrapper() {
        let err = SealError::Config("missing".into()).for_secret("EMAILJS_SERVICE_ID");
        assert!(err.is_config());
        assert!(!SealError::Decryption.is_config());
    }

    #[test]
    fn test_encryption_keeps_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "bad key length");
        let err = SealError::encryption("Failed to create cipher", cause);
        assert_eq!(err.to_string(), "Encryption error: Failed to create cipher");
        assert_eq!(err.source().unwrap().to_string(), "bad key length");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SealError = io_err.into();
        assert!(matches!(err, SealError::Io(_)));
    }
}

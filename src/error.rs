// File: src/error.rs
use thiserror::Error;

/// Why an example pair could not be turned into a substitution cipher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("example lengths differ: original has {original} characters, encoded has {encoded}")]
    LengthMismatch { original: usize, encoded: usize },

    #[error("inconsistent pattern: '{source_char}' maps to both '{first}' and '{second}'")]
    InconsistentPattern {
        source_char: char,
        first: char,
        second: char,
    },

    /// Only raised in strict learning mode.
    #[error("ambiguous decode: '{first}' and '{second}' both encode to '{target}'")]
    AmbiguousDecode {
        target: char,
        first: char,
        second: char,
    },
}

/// Errors from resolving and chaining ciphers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("unknown cipher: {0}")]
    UnknownTransform(String),

    #[error("cipher chain is empty")]
    EmptyChain,

    #[error("'{0}' is a built-in cipher name")]
    ReservedName(String),

    #[error("invalid cipher name: '{0}'")]
    InvalidName(String),

    #[error("example text must not be blank")]
    EmptyExample,

    #[error("could not learn cipher: {0}")]
    Inference(#[from] InferenceError),
}

/// Errors from reading or writing the learned-cipher store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store bincode error: {0}")]
    Bincode(#[from] bincode::Error),
}

impl From<tempfile::PersistError> for StoreError {
    fn from(err: tempfile::PersistError) -> Self {
        StoreError::Io(err.error)
    }
}

/// Errors from loading the engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_errors_render_their_characters() {
        let err = InferenceError::InconsistentPattern {
            source_char: 'a',
            first: 'b',
            second: 'c',
        };
        assert_eq!(
            err.to_string(),
            "inconsistent pattern: 'a' maps to both 'b' and 'c'"
        );

        let err = InferenceError::LengthMismatch {
            original: 3,
            encoded: 2,
        };
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn inference_error_converts_into_cipher_error() {
        let err: CipherError = InferenceError::LengthMismatch {
            original: 1,
            encoded: 0,
        }
        .into();
        assert!(matches!(err, CipherError::Inference(_)));
        assert!(err.to_string().starts_with("could not learn cipher"));
    }
}

//! Error types for identifier generation, parsing, and scanning.

use thiserror::Error;

/// Errors that can occur when generating an identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The operating system's secure randomness source failed.
    ///
    /// No retry can fix a broken entropy source. Callers should treat this
    /// as unrecoverable and abort the operation chain.
    #[error("entropy source failure: {0}")]
    EntropySource(String),
}

/// Errors that can occur when parsing an identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input had the encoded length of a hex identifier but failed to
    /// decode under the hex alphabet.
    #[error("malformed hex encoding in {length}-character input: {reason}")]
    MalformedHex { length: usize, reason: String },

    /// The input had the encoded length of a base64 identifier but failed
    /// to decode under the URL-safe alphabet.
    #[error("malformed base64 encoding in {length}-character input: {reason}")]
    MalformedBase64 { length: usize, reason: String },

    /// A raw or decoded payload was not exactly the identifier length.
    #[error("invalid identifier length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The input length matched none of the recognized formats.
    #[error("unrecognized identifier format: '{0}'")]
    UnrecognizedFormat(String),
}

impl ParseError {
    /// Returns true if the input matched an encoded length but failed to
    /// decode under that encoding.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ParseError::MalformedHex { .. } | ParseError::MalformedBase64 { .. }
        )
    }
}

/// Errors that can occur when reading an identifier from a storage value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A text value, or a binary value reinterpreted as text, failed to
    /// parse as an identifier.
    #[error("scan failed: {0}")]
    Parse(#[from] ParseError),

    /// The storage layer produced a value of a type the adapter does not
    /// know how to interpret.
    #[error("cannot scan value of type {type_name} into an identifier")]
    UnsupportedType { type_name: &'static str },
}

impl ScanError {
    /// Builds a [`ScanError::UnsupportedType`] naming `T`.
    ///
    /// The scan value union is closed, so the core never produces this
    /// variant itself; persistence glue uses this constructor for driver
    /// value types outside the absent/text/binary contract.
    pub fn unsupported<T: ?Sized>() -> Self {
        ScanError::UnsupportedType {
            type_name: std::any::type_name::<T>(),
        }
    }
}

//! Reading identifiers out of storage values.
//!
//! Storage drivers hand back column values in whatever shape the column
//! mapping produces: no value at all, text, or a byte blob. [`ScanValue`]
//! is the closed set of shapes the identifier read path understands.
//! Persistence glue maps its driver's value type into a `ScanValue` and
//! calls [`SecureId::scan`]; driver values outside these shapes are
//! reported with [`ScanError::unsupported`](crate::ScanError::unsupported).
//!
//! Define the column as tightly as the database allows, e.g. `BINARY(32)`.

use crate::error::{ParseError, ScanError};
use crate::types::SecureId;

/// A value read back from a storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanValue<'a> {
    /// No value, e.g. a NULL column.
    Absent,
    /// A text value, e.g. a VARCHAR or TEXT column.
    Text(&'a str),
    /// A binary value, e.g. a BINARY(32) or BYTEA column.
    Binary(&'a [u8]),
}

impl SecureId {
    /// Reads an identifier out of a scanned storage value.
    ///
    /// Absent values, empty text, and empty binary values all yield
    /// [`SecureId::EMPTY`] without error, modeling "no row data" distinctly
    /// from malformed data. Non-empty text is parsed per
    /// [`SecureId::parse`], and a binary value of exactly 32 bytes is taken
    /// as the identifier itself.
    ///
    /// A non-empty binary value of any other length is reinterpreted as
    /// text and parsed. This accommodates drivers that return encoded text
    /// columns as byte blobs; it is a compatibility quirk, and it means a
    /// non-identifier blob can scan successfully if it happens to be valid
    /// text in one of the recognized encodings. Binary input that is not
    /// valid UTF-8 cannot take the text path and fails with
    /// [`ParseError::UnrecognizedFormat`].
    pub fn scan(value: ScanValue<'_>) -> Result<Self, ScanError> {
        match value {
            ScanValue::Absent => Ok(Self::EMPTY),

            ScanValue::Text(text) => {
                if text.is_empty() {
                    return Ok(Self::EMPTY);
                }

                Ok(Self::parse(text)?)
            }

            ScanValue::Binary(bytes) => {
                if bytes.is_empty() {
                    return Ok(Self::EMPTY);
                }

                if bytes.len() != Self::LEN {
                    let Ok(text) = std::str::from_utf8(bytes) else {
                        return Err(ScanError::Parse(ParseError::UnrecognizedFormat(
                            String::from_utf8_lossy(bytes).into_owned(),
                        )));
                    };
                    return Self::scan(ScanValue::Text(text));
                }

                Ok(Self::from_slice(bytes)?)
            }
        }
    }
}

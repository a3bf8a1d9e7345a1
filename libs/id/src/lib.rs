//! # secure-id
//!
//! A fixed-size, high-entropy identifier for systems that want UUID-shaped
//! ergonomics with stronger randomness guarantees.
//!
//! ## Design Principles
//!
//! - An identifier is 32 bytes (256 bits) drawn from the operating system
//!   entropy source, with no embedded version or variant bits
//! - The all-zero value is the empty identifier, a sentinel for "no value"
//! - Every external form round-trips (parse → format → parse)
//! - Parsing is strict; malformed input is a typed error, never a silently
//!   defaulted value
//!
//! ## Encodings
//!
//! A 32-byte payload has exactly one external length per encoding, so the
//! input length alone selects the parse format:
//!
//! - 64 characters: lowercase hex (via [`SecureId::to_hex`])
//! - 44 characters: padded URL-safe base64, the canonical `Display` form
//! - 32 bytes: the raw byte sequence
//!
//! ## Storage
//!
//! [`ScanValue`] is the closed set of value shapes a storage layer can hand
//! back (absent, text, binary); [`SecureId::scan`] converts them into
//! identifiers, mapping absent and empty values to [`SecureId::EMPTY`].

mod error;
mod scan;
mod types;

pub use error::{GenerateError, ParseError, ScanError};
pub use scan::ScanValue;
pub use types::SecureId;

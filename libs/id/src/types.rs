//! The secure identifier value type, its generator, and its codec.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::{GenerateError, ParseError};

/// A 256-bit secure random identifier.
///
/// Unlike an RFC 4122 UUID, a `SecureId` carries no internal structure: all
/// 32 bytes come from the operating system entropy source. Two identifiers
/// are equal iff all 32 bytes match. The all-zero value is the distinguished
/// empty identifier ([`SecureId::EMPTY`]), used as a sentinel for "no value"
/// such as an absent database column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SecureId([u8; 32]);

impl SecureId {
    /// The identifier length in bytes.
    pub const LEN: usize = 32;

    /// Length of the hex encoding in characters.
    pub const HEX_LEN: usize = Self::LEN * 2;

    /// Length of the padded URL-safe base64 encoding in characters.
    pub const BASE64_LEN: usize = Self::LEN.div_ceil(3) * 4;

    /// The empty (all-zero) identifier.
    pub const EMPTY: Self = Self([0; Self::LEN]);

    /// Generates a new identifier from the operating system entropy source.
    ///
    /// The all-zero pattern is redrawn, so the returned identifier is never
    /// [`SecureId::EMPTY`]. Uniqueness across calls is probabilistic, from
    /// 256 bits of entropy.
    ///
    /// A [`GenerateError::EntropySource`] failure is unrecoverable: callers
    /// should treat it as fatal and abort the operation chain rather than
    /// retry.
    pub fn try_generate() -> Result<Self, GenerateError> {
        let mut bytes = [0u8; Self::LEN];
        loop {
            OsRng
                .try_fill_bytes(&mut bytes)
                .map_err(|err| GenerateError::EntropySource(err.to_string()))?;

            let id = Self(bytes);
            if !id.is_empty() {
                return Ok(id);
            }
        }
    }

    /// Generates a new identifier, panicking if the entropy source fails.
    ///
    /// A failing entropy source is a platform-level emergency; returning a
    /// weak identifier instead would be worse than terminating. Use
    /// [`SecureId::try_generate`] to handle the failure as a value.
    #[must_use]
    pub fn generate() -> Self {
        match Self::try_generate() {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns true iff every byte is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Parses an identifier from hex, padded URL-safe base64, or raw bytes.
    ///
    /// The three encodings have mutually exclusive lengths for a 32-byte
    /// payload (64, 44, and 32), so the input length alone selects the
    /// format:
    ///
    /// 1. 64 characters are decoded as lowercase hex
    /// 2. 44 characters are decoded as padded URL-safe base64
    /// 3. a 32-byte input is taken as the raw identifier bytes
    ///
    /// A decode failure under the selected format is an error; it never
    /// falls through to another format. Any other input length is
    /// [`ParseError::UnrecognizedFormat`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.len() == Self::HEX_LEN {
            let mut bytes = [0u8; Self::LEN];
            hex::decode_to_slice(input, &mut bytes).map_err(|err| ParseError::MalformedHex {
                length: input.len(),
                reason: err.to_string(),
            })?;
            return Ok(Self(bytes));
        }

        if input.len() == Self::BASE64_LEN {
            let decoded = URL_SAFE
                .decode(input)
                .map_err(|err| ParseError::MalformedBase64 {
                    length: input.len(),
                    reason: err.to_string(),
                })?;
            // 44 unpadded symbols decode to 33 bytes, so re-check the length
            return Self::from_slice(&decoded);
        }

        if input.len() == Self::LEN {
            let mut bytes = [0u8; Self::LEN];
            bytes.copy_from_slice(input.as_bytes());
            return Ok(Self(bytes));
        }

        Err(ParseError::UnrecognizedFormat(input.to_string()))
    }

    /// Parses an identifier, panicking on failure.
    ///
    /// For inputs already validated out-of-band. Never call this on
    /// untrusted input; use [`SecureId::parse`] instead.
    #[must_use]
    pub fn must_parse(input: &str) -> Self {
        match Self::parse(input) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an identifier from a raw byte slice.
    ///
    /// Fails with [`ParseError::InvalidLength`] unless the slice is exactly
    /// 32 bytes. No format sniffing is performed.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.len() != Self::LEN {
            return Err(ParseError::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }

        let mut id = [0u8; Self::LEN];
        id.copy_from_slice(bytes);
        Ok(Self(id))
    }

    /// Returns the lowercase hex encoding (64 characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Consumes the identifier and returns the raw bytes.
    #[must_use]
    pub const fn into_bytes(self) -> [u8; Self::LEN] {
        self.0
    }
}

impl Default for SecureId {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Display for SecureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&URL_SAFE.encode(self.0))
    }
}

impl std::str::FromStr for SecureId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; SecureId::LEN]> for SecureId {
    fn from(bytes: [u8; SecureId::LEN]) -> Self {
        Self(bytes)
    }
}

impl From<SecureId> for [u8; SecureId::LEN] {
    fn from(id: SecureId) -> Self {
        id.0
    }
}

impl TryFrom<&[u8]> for SecureId {
    type Error = ParseError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for SecureId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl serde::Serialize for SecureId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for SecureId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_generate_not_empty() {
        assert!(!SecureId::generate().is_empty());
    }

    #[test]
    fn test_generate_unique() {
        assert_ne!(SecureId::generate(), SecureId::generate());
    }

    #[test]
    fn test_try_generate_not_empty() {
        assert!(!SecureId::try_generate().unwrap().is_empty());
    }

    #[test]
    fn test_base64_roundtrip() {
        let id = SecureId::generate();
        let s = id.to_string();
        assert_eq!(s.len(), SecureId::BASE64_LEN);
        assert_eq!(SecureId::parse(&s).unwrap(), id);
    }

    #[test]
    fn test_hex_roundtrip() {
        let id = SecureId::generate();
        let s = id.to_hex();
        assert_eq!(s.len(), SecureId::HEX_LEN);
        assert_eq!(SecureId::parse(&s).unwrap(), id);
    }

    #[test]
    fn test_raw_roundtrip() {
        let raw = "abcdefghijklmnopqrstuvwxyz012345";
        assert_eq!(raw.len(), SecureId::LEN);
        let id = SecureId::parse(raw).unwrap();
        assert_eq!(id.as_bytes(), raw.as_bytes());
    }

    #[test]
    fn test_from_slice_roundtrip() {
        let id = SecureId::generate();
        assert_eq!(SecureId::from_slice(id.as_bytes()).unwrap(), id);
    }

    #[test]
    fn test_from_slice_invalid_length() {
        assert_eq!(
            SecureId::from_slice(&[0xab; 16]).unwrap_err(),
            ParseError::InvalidLength {
                expected: 32,
                actual: 16
            }
        );
    }

    #[test]
    fn test_known_vector() {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let id = SecureId::from(bytes);

        assert_eq!(
            id.to_hex(),
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f"
        );
        assert_eq!(id.to_string(), "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=");
        assert_eq!(SecureId::parse(&id.to_hex()).unwrap(), id);
        assert_eq!(SecureId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_hex_zeroes_is_empty() {
        let id = SecureId::parse(&"00".repeat(32)).unwrap();
        assert!(id.is_empty());
        assert_eq!(id, SecureId::EMPTY);
    }

    #[test]
    fn test_empty_renders_and_parses() {
        let b64 = SecureId::EMPTY.to_string();
        assert_eq!(b64, format!("{}=", "A".repeat(43)));
        assert!(SecureId::parse(&b64).unwrap().is_empty());

        let hex = SecureId::EMPTY.to_hex();
        assert_eq!(hex, "0".repeat(64));
        assert!(SecureId::parse(&hex).unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_hex() {
        assert!(matches!(
            SecureId::parse(&"zz".repeat(32)),
            Err(ParseError::MalformedHex { length: 64, .. })
        ));
    }

    #[test]
    fn test_parse_hex_never_falls_through() {
        // 64 valid base64 symbols that are not hex must fail as hex, not be
        // retried under another format
        assert!(matches!(
            SecureId::parse(&"g".repeat(64)),
            Err(ParseError::MalformedHex { length: 64, .. })
        ));
    }

    #[test]
    fn test_parse_malformed_base64() {
        assert!(matches!(
            SecureId::parse(&"!".repeat(44)),
            Err(ParseError::MalformedBase64 { length: 44, .. })
        ));
    }

    #[test]
    fn test_parse_base64_wrong_payload_length() {
        // 44 symbols with no padding decode to 33 bytes
        assert_eq!(
            SecureId::parse(&"A".repeat(44)).unwrap_err(),
            ParseError::InvalidLength {
                expected: 32,
                actual: 33
            }
        );
    }

    #[test]
    fn test_parse_unrecognized_lengths() {
        for len in [0, 1, 16, 31, 33, 43, 45, 63, 65, 128] {
            let input = "a".repeat(len);
            assert!(
                matches!(
                    SecureId::parse(&input),
                    Err(ParseError::UnrecognizedFormat(_))
                ),
                "length {len} should not parse"
            );
        }
    }

    #[test]
    fn test_from_str() {
        let id = SecureId::generate();
        let parsed: SecureId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_must_parse_roundtrip() {
        let id = SecureId::generate();
        assert_eq!(SecureId::must_parse(&id.to_hex()), id);
    }

    #[test]
    #[should_panic(expected = "unrecognized identifier format")]
    fn test_must_parse_rejects_garbage() {
        SecureId::must_parse("not an identifier");
    }

    #[test]
    fn test_default_is_empty() {
        assert!(SecureId::default().is_empty());
    }

    #[test]
    fn test_byte_conversions() {
        let id = SecureId::generate();
        let bytes: [u8; 32] = id.into();
        assert_eq!(SecureId::from(bytes), id);
        assert_eq!(SecureId::try_from(&bytes[..]).unwrap(), id);
        assert_eq!(id.as_ref(), &bytes[..]);
        assert_eq!(id.into_bytes(), bytes);
    }

    #[test]
    fn test_json_roundtrip() {
        let id = SecureId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: SecureId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_json_is_base64_string() {
        let json = serde_json::to_string(&SecureId::EMPTY).unwrap();
        assert_eq!(json, format!("\"{}=\"", "A".repeat(43)));
    }

    #[test]
    fn test_json_rejects_garbage() {
        let result: Result<SecureId, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_roundtrips_through_every_encoding(bytes in any::<[u8; 32]>()) {
            let id = SecureId::from(bytes);
            prop_assert_eq!(SecureId::parse(&id.to_string()).unwrap(), id);
            prop_assert_eq!(SecureId::parse(&id.to_hex()).unwrap(), id);
            prop_assert_eq!(SecureId::from_slice(id.as_bytes()).unwrap(), id);
        }

        #[test]
        fn prop_parse_never_panics(input in ".*") {
            let _ = SecureId::parse(&input);
        }

        #[test]
        fn prop_parse_rejects_unrecognized_lengths(input in ".*") {
            let len = input.len();
            if len != SecureId::HEX_LEN && len != SecureId::BASE64_LEN && len != SecureId::LEN {
                prop_assert!(SecureId::parse(&input).is_err());
            }
        }
    }
}

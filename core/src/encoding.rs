//! Base64 for keys and signatures
//!
//! Standard alphabet, padding required. URL-safe input is rejected.

use crate::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode bytes as standard, padded base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard, padded base64. Surrounding whitespace is ignored.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use proptest::prelude::*;

    #[test]
    fn test_known_vector() {
        assert_eq!(encode(b"hello"), "aGVsbG8=");
        assert_eq!(decode("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_trailing_newline_accepted() {
        assert_eq!(decode("aGVsbG8=\n").unwrap(), b"hello");
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(matches!(decode("not base64!"), Err(Error::InvalidEncoding(_))));
        // Missing padding
        assert!(matches!(decode("aGVsbG8"), Err(Error::InvalidEncoding(_))));
        // URL-safe alphabet
        assert!(matches!(decode("-_-_"), Err(Error::InvalidEncoding(_))));
    }

    proptest! {
        #[test]
        fn test_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
            prop_assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
        }
    }
}

//! Master-key container: decoded and validated once at startup, then shared
//! read-only across all request handlers.
//!
//! There is deliberately no mutable key state and no per-request "is the key
//! set" guard. The key either validates at startup — after which it is
//! immutable for the process lifetime — or the service refuses to start.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::crypto::KEY_LEN;

/// Errors produced while loading the master key.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The configured key string is not valid standard base64.
    #[error("master key is not valid base64")]
    InvalidEncoding,

    /// The decoded key material has an unexpected length.
    #[error("master key has invalid length: expected {KEY_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

/// Fixed-size key buffer holding exactly [`KEY_LEN`] bytes.
///
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which plaintext key material lives in RAM.
pub struct MasterKey(Box<[u8; KEY_LEN]>);

impl MasterKey {
    /// Decode a standard-base64 key string, enforcing the exact key length.
    ///
    /// This is the single validation point for key material: called once in
    /// `main` against the configured `MASTER_KEY` value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidEncoding`] if the string is not base64,
    /// [`KeyError::InvalidLength`] if it decodes to anything but
    /// [`KEY_LEN`] bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| KeyError::InvalidEncoding)?;
        Self::from_bytes(&bytes)
    }

    /// Build a key from raw bytes, enforcing the exact key length.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidLength`] if `bytes` is not [`KEY_LEN`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != KEY_LEN {
            return Err(KeyError::InvalidLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Raw key bytes, for handing to the envelope codec.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("MasterKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_valid_base64_key() {
        let raw = [0x42u8; KEY_LEN];
        let key = MasterKey::from_base64(&STANDARD.encode(raw)).unwrap();
        assert_eq!(key.as_bytes(), raw.as_slice());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let encoded = format!("  {}\n", STANDARD.encode([0u8; KEY_LEN]));
        assert!(MasterKey::from_base64(&encoded).is_ok());
    }

    #[test]
    fn rejects_non_base64_input() {
        assert!(matches!(
            MasterKey::from_base64("!!! not base64 !!!"),
            Err(KeyError::InvalidEncoding)
        ));
    }

    #[test]
    fn rejects_wrong_decoded_length() {
        let short = STANDARD.encode([0u8; 16]);
        assert!(matches!(
            MasterKey::from_base64(&short),
            Err(KeyError::InvalidLength(16))
        ));
    }

    #[test]
    fn rejects_wrong_raw_length() {
        assert!(matches!(
            MasterKey::from_bytes(&[0u8; 31]),
            Err(KeyError::InvalidLength(31))
        ));
    }

    #[test]
    fn redacted_in_debug() {
        let key = MasterKey::from_bytes(&[0xFFu8; KEY_LEN]).unwrap();
        assert!(format!("{key:?}").contains("REDACTED"));
    }
}

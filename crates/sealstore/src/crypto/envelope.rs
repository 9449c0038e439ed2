//! AES-256-GCM sealing and opening of whole object blobs.
//!
//! **Algorithm choice:** AES-256-GCM with a 16-byte nonce drawn fresh from
//! the OS CSPRNG on every seal. The nonce is 128-bit (not GCM's common
//! 96-bit) so that existing envelopes remain readable; GCM derives the
//! counter block from non-96-bit nonces via GHASH, per the mode definition.
//!
//! **Never reuse a nonce under the same key.** GCM nonce reuse breaks both
//! confidentiality and authentication, which is why callers cannot supply
//! one.

use aes_gcm::{
    aead::{consts::U16, AeadInPlace, KeyInit, OsRng},
    aes::Aes256,
    AesGcm, Nonce, Tag,
};
use thiserror::Error;

/// AES-256-GCM parameterised with the envelope's 16-byte nonce.
type EnvelopeCipher = AesGcm<Aes256, U16>;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the per-envelope nonce.
pub const NONCE_LEN: usize = 16;

/// Byte length of the GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Fixed envelope prefix: nonce followed by tag. Anything shorter cannot be
/// an envelope and is rejected before any cipher work.
pub const HEADER_LEN: usize = NONCE_LEN + TAG_LEN;

/// Errors produced by the envelope codec.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The master key is the wrong length (must be [`KEY_LEN`] bytes).
    /// A setup defect, not a per-request condition — never retryable.
    #[error("invalid master key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// The blob is too short to contain a nonce and tag.
    #[error("envelope shorter than {HEADER_LEN} bytes")]
    TruncatedEnvelope,

    /// Tag verification failed. Wrong key, corrupted nonce, tag, or
    /// ciphertext, and trailing garbage all land here — one failure mode,
    /// no detail about the cause.
    #[error("envelope authentication failed")]
    AuthenticationFailed,

    /// The plaintext exceeds the GCM per-message length bound.
    #[error("plaintext exceeds cipher length bound")]
    PlaintextTooLarge,
}

/// Encrypt `plaintext` into a self-contained envelope.
///
/// A random 16-byte nonce is generated per call via the OS CSPRNG, so
/// sealing the same plaintext twice produces two different envelopes. The
/// returned buffer is `nonce || tag || ciphertext` and is exactly
/// `HEADER_LEN + plaintext.len()` bytes — GCM is a counter mode and adds no
/// padding. The empty plaintext is valid and seals to a bare header.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;

    // Use OsRng for a cryptographically secure random nonce.
    use aes_gcm::aead::rand_core::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // Encrypt in place in the envelope's ciphertext region, then drop the
    // detached tag into the slot between nonce and ciphertext.
    let mut envelope = vec![0u8; HEADER_LEN + plaintext.len()];
    envelope[..NONCE_LEN].copy_from_slice(&nonce_bytes);
    envelope[HEADER_LEN..].copy_from_slice(plaintext);

    let tag = cipher
        .encrypt_in_place_detached(nonce, b"", &mut envelope[HEADER_LEN..])
        .map_err(|_| CipherError::PlaintextTooLarge)?;
    envelope[NONCE_LEN..HEADER_LEN].copy_from_slice(&tag);

    Ok(envelope)
}

/// Decrypt an envelope previously produced by [`seal`], verifying integrity.
///
/// Plaintext is returned only if the tag verifies against (key, nonce,
/// ciphertext); the AEAD implementation compares tags in constant time.
/// Nothing — not even a prefix — is returned from a blob that fails
/// verification.
///
/// # Errors
///
/// Returns [`CipherError::TruncatedEnvelope`] if `envelope` is shorter than
/// [`HEADER_LEN`] bytes; this is checked before any cipher work.
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AuthenticationFailed`] for every verification
/// failure, regardless of which region of the envelope was damaged.
pub fn open(envelope: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    if envelope.len() < HEADER_LEN {
        return Err(CipherError::TruncatedEnvelope);
    }
    let cipher = build_cipher(key)?;

    let nonce = Nonce::from_slice(&envelope[..NONCE_LEN]);
    let tag = Tag::from_slice(&envelope[NONCE_LEN..HEADER_LEN]);

    let mut plaintext = envelope[HEADER_LEN..].to_vec();
    cipher
        .decrypt_in_place_detached(nonce, b"", &mut plaintext, tag)
        .map_err(|_| CipherError::AuthenticationFailed)?;

    Ok(plaintext)
}

fn build_cipher(key: &[u8]) -> Result<EnvelopeCipher, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }
    EnvelopeCipher::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn random_key() -> Vec<u8> {
        use aes_gcm::aead::rand_core::RngCore;
        let mut key = vec![0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn seal_open_round_trip() {
        let key = random_key();
        let plaintext = b"the quick brown fox";
        let envelope = seal(plaintext, &key).unwrap();
        let opened = open(&envelope, &key).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn empty_plaintext_round_trip() {
        let key = random_key();
        let envelope = seal(b"", &key).unwrap();
        assert_eq!(envelope.len(), HEADER_LEN);
        assert_eq!(open(&envelope, &key).unwrap(), b"");
    }

    #[test]
    fn envelope_length_is_header_plus_plaintext() {
        let key = random_key();
        for len in [1usize, 11, 4096] {
            let plaintext = vec![0xA5u8; len];
            let envelope = seal(&plaintext, &key).unwrap();
            assert_eq!(envelope.len(), HEADER_LEN + len);
        }
    }

    #[test]
    fn ciphertext_differs_from_plaintext() {
        let key = random_key();
        let plaintext = b"not secret enough";
        let envelope = seal(plaintext, &key).unwrap();
        assert_ne!(&envelope[HEADER_LEN..], plaintext.as_slice());
    }

    #[test]
    fn sealing_twice_gives_different_envelopes() {
        let key = random_key();
        let a = seal(b"same input", &key).unwrap();
        let b = seal(b"same input", &key).unwrap();
        assert_ne!(a, b);
        // The nonce region itself must differ, not just the ciphertext.
        assert_ne!(a[..NONCE_LEN], b[..NONCE_LEN]);
    }

    #[test]
    fn nonces_do_not_collide_across_many_seals() {
        let key = random_key();
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let envelope = seal(b"", &key).unwrap();
            let mut nonce = [0u8; NONCE_LEN];
            nonce.copy_from_slice(&envelope[..NONCE_LEN]);
            assert!(seen.insert(nonce), "nonce reused across seal calls");
        }
    }

    #[test]
    fn tampering_any_region_fails_authentication() {
        let key = random_key();
        let envelope = seal(b"tamper me", &key).unwrap();
        // One bit in the nonce, one in the tag, one in the ciphertext.
        for index in [0, NONCE_LEN, HEADER_LEN] {
            let mut damaged = envelope.clone();
            damaged[index] ^= 0x01;
            assert!(matches!(
                open(&damaged, &key),
                Err(CipherError::AuthenticationFailed)
            ));
        }
    }

    #[test]
    fn trailing_garbage_fails_authentication() {
        let key = random_key();
        let mut envelope = seal(b"exact bytes only", &key).unwrap();
        envelope.push(0x00);
        assert!(matches!(
            open(&envelope, &key),
            Err(CipherError::AuthenticationFailed)
        ));
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let envelope = seal(b"secret", &random_key()).unwrap();
        assert!(matches!(
            open(&envelope, &random_key()),
            Err(CipherError::AuthenticationFailed)
        ));
    }

    #[test]
    fn short_blobs_rejected_before_decryption() {
        let key = random_key();
        for len in [0usize, 1, HEADER_LEN - 1] {
            let blob = vec![0u8; len];
            assert!(matches!(
                open(&blob, &key),
                Err(CipherError::TruncatedEnvelope)
            ));
        }
    }

    #[test]
    fn invalid_key_lengths_rejected() {
        let good_key = random_key();
        let envelope = seal(b"x", &good_key).unwrap();
        for len in [0usize, 16, 31, 33] {
            let bad_key = vec![0u8; len];
            assert!(matches!(
                seal(b"x", &bad_key),
                Err(CipherError::InvalidKeyLength)
            ));
            assert!(matches!(
                open(&envelope, &bad_key),
                Err(CipherError::InvalidKeyLength)
            ));
        }
    }
}

//! Cipher key management

use cursus_core::SecretString;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// Symmetric key for the token cipher
///
/// Derived once at process start and held for the lifetime of the process.
/// The bytes are wiped on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CipherKey([u8; KEY_LEN]);

impl CipherKey {
    /// Use raw key bytes
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Convert a configured secret into a key
    ///
    /// The secret's UTF-8 bytes are truncated to, or zero-padded up to,
    /// [`KEY_LEN`] bytes.
    pub fn from_secret(secret: &str) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        let source = secret.as_bytes();
        let len = source.len().min(KEY_LEN);
        bytes[..len].copy_from_slice(&source[..len]);
        if source.len() < KEY_LEN {
            tracing::debug!(
                secret_len = source.len(),
                "encryption secret shorter than key length, zero-padding"
            );
        }
        Self(bytes)
    }

    /// Convert a configured secret string into a key
    pub fn from_config_secret(secret: &SecretString) -> Self {
        Self::from_secret(secret.expose())
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CipherKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secret_is_zero_padded() {
        let key = CipherKey::from_secret("abc");
        assert_eq!(&key.as_bytes()[..3], b"abc");
        assert!(key.as_bytes()[3..].iter().all(|b| *b == 0));
    }

    #[test]
    fn long_secret_is_truncated() {
        let secret = "x".repeat(40);
        let key = CipherKey::from_secret(&secret);
        assert_eq!(key.as_bytes(), &[b'x'; KEY_LEN]);
        assert_eq!(
            CipherKey::from_secret(&secret).as_bytes(),
            CipherKey::from_secret(&"x".repeat(KEY_LEN)).as_bytes()
        );
    }

    #[test]
    fn raw_bytes_are_used_verbatim() {
        let key = CipherKey::from_bytes([7u8; KEY_LEN]);
        assert_eq!(key.as_bytes(), &[7u8; KEY_LEN]);

        let padded = CipherKey::from_secret(&"\u{7}".repeat(KEY_LEN));
        assert_eq!(key.as_bytes(), padded.as_bytes());
    }

    #[test]
    fn debug_is_redacted() {
        let key = CipherKey::from_secret("super-secret-value");
        assert_eq!(format!("{key:?}"), "CipherKey(<redacted>)");
    }
}

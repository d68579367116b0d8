//! Sealed token codec
//!
//! Seals an opaque bearer token with AES-256-GCM and encodes the result for
//! cookie transport.
//!
//! # Wire format
//!
//! ```text
//! base64url-nopad( nonce[12] ‖ ciphertext[n] ‖ tag[16] )
//! ```
//!
//! # Security
//!
//! - A fresh nonce is drawn from the OS CSPRNG for every seal
//! - Any decoding, length, tag or UTF-8 failure collapses into one
//!   [`DecryptError`]; no partial plaintext is ever returned
//! - Plaintext tokens and key bytes are never logged

use crate::key::CipherKey;
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use cursus_core::{CursusError, CursusResult};
use rand_core::OsRng;
use std::fmt;

/// AES-GCM nonce length in bytes (96 bits)
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes (128 bits)
pub const TAG_LEN: usize = 16;

/// A sealed value could not be opened
///
/// Raised for malformed encoding, short input, tag mismatch or a wrong key
/// alike; callers cannot tell these apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("sealed token could not be opened")]
pub struct DecryptError;

impl From<DecryptError> for CursusError {
    fn from(err: DecryptError) -> Self {
        CursusError::crypto(err.to_string())
    }
}

/// Authenticated-encryption codec for bearer tokens
///
/// Cheap to share: seal and open take `&self` and need no synchronization.
#[derive(Clone)]
pub struct TokenCipher {
    cipher: Aes256Gcm,
}

impl TokenCipher {
    /// Create a cipher bound to `key`
    pub fn new(key: &CipherKey) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Create a cipher from a configured secret
    pub fn from_secret(secret: &str) -> Self {
        Self::new(&CipherKey::from_secret(secret))
    }

    /// Seal `plaintext` into URL-safe text
    pub fn seal(&self, plaintext: &str) -> CursusResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        // Ciphertext comes back with the tag appended
        let sealed = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| CursusError::crypto(format!("AES-GCM encryption failed: {e}")))?;

        let mut framed = Vec::with_capacity(NONCE_LEN + sealed.len());
        framed.extend_from_slice(&nonce);
        framed.extend_from_slice(&sealed);

        Ok(URL_SAFE_NO_PAD.encode(framed))
    }

    /// Open a value produced by [`TokenCipher::seal`]
    pub fn open(&self, sealed: &str) -> Result<String, DecryptError> {
        let framed = URL_SAFE_NO_PAD.decode(sealed).map_err(|_| DecryptError)?;
        if framed.len() < NONCE_LEN + TAG_LEN {
            return Err(DecryptError);
        }

        let (nonce, body) = framed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), body)
            .map_err(|_| DecryptError)?;

        String::from_utf8(plaintext).map_err(|_| DecryptError)
    }

    /// Whether `sealed` opens cleanly
    ///
    /// Swallows the error, so absent and corrupted values look the same.
    pub fn can_open(&self, sealed: &str) -> bool {
        self.open(sealed).is_ok()
    }
}

impl fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCipher").finish_non_exhaustive()
    }
}

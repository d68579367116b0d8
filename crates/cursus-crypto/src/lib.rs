//! Cursus Crypto: sealed session tokens
//!
//! Authenticated encryption (AES-256-GCM, 96-bit nonce, 128-bit tag) for
//! the bearer token carried in the session cookie. The sealed value is
//! opaque and tamper-evident; its validity window is the embedded token's
//! own expiry, never the encryption layer's.

#![forbid(unsafe_code)]

pub mod cipher;
pub mod key;

pub use cipher::{DecryptError, TokenCipher, NONCE_LEN, TAG_LEN};
pub use key::{CipherKey, KEY_LEN};

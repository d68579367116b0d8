//! Cursus Session: sealed bearer tokens carried in a cookie
//!
//! [`SessionCarrier`] bridges the token cipher to HTTP. It issues the
//! `access_token` cookie holding the sealed raw token, revokes it, and reads
//! it back from request headers. Reading never fails: an absent cookie and a
//! corrupted one both come back as `None`, so callers fall through to an
//! anonymous request either way.

#![forbid(unsafe_code)]

pub mod carrier;

pub use carrier::SessionCarrier;
pub use cookie::{Cookie, SameSite};

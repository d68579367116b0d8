//! Caller identification from an opened bearer token

use crate::identifiers::UserId;
use crate::CursusResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Maps a raw bearer token to the user it identifies
///
/// The token format (and its expiry) is owned by the implementation. An
/// unknown, expired or malformed token yields `Ok(None)`.
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Identify the caller presenting `raw_token`
    async fn authenticate(&self, raw_token: &str) -> CursusResult<Option<UserId>>;
}

#[async_trait]
impl<T: TokenAuthenticator + ?Sized> TokenAuthenticator for Arc<T> {
    async fn authenticate(&self, raw_token: &str) -> CursusResult<Option<UserId>> {
        (**self).authenticate(raw_token).await
    }
}

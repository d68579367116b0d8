//! Static bearer-token table

use async_trait::async_trait;
use cursus_core::{CursusResult, TokenAuthenticator, UserId};
use std::collections::HashMap;
use std::fmt;

/// Authenticator backed by a fixed token-to-user table
///
/// Intended for development and tests; real deployments verify signed
/// tokens instead.
#[derive(Clone, Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, UserId>,
}

impl StaticTokenAuthenticator {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` as identifying `user`
    pub fn with_token(mut self, token: impl Into<String>, user: UserId) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }

    /// Register `token` as identifying `user`
    pub fn insert(&mut self, token: impl Into<String>, user: UserId) {
        self.tokens.insert(token.into(), user);
    }
}

impl fmt::Debug for StaticTokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenAuthenticator")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

#[async_trait]
impl TokenAuthenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, raw_token: &str) -> CursusResult<Option<UserId>> {
        Ok(self.tokens.get(raw_token).copied())
    }
}

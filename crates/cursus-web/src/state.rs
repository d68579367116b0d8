//! Shared application state

use cursus_authorization::AccessResolver;
use cursus_core::{
    CursusResult, OrganizationGraph, PositionStore, SessionConfig, TokenAuthenticator,
};
use cursus_session::SessionCarrier;
use std::fmt;
use std::sync::Arc;

/// State shared by every handler and middleware
#[derive(Clone)]
pub struct AppState {
    /// Access resolver over the organization stores
    pub resolver: AccessResolver,
    /// Session cookie carrier
    pub carrier: SessionCarrier,
    /// Raw token to user mapping
    pub authenticator: Arc<dyn TokenAuthenticator>,
}

impl AppState {
    /// Assemble state from its parts
    pub fn new(
        resolver: AccessResolver,
        carrier: SessionCarrier,
        authenticator: Arc<dyn TokenAuthenticator>,
    ) -> Self {
        Self {
            resolver,
            carrier,
            authenticator,
        }
    }

    /// Build state from session configuration and the three stores
    pub fn from_config(
        session: &SessionConfig,
        graph: Arc<dyn OrganizationGraph>,
        positions: Arc<dyn PositionStore>,
        authenticator: Arc<dyn TokenAuthenticator>,
    ) -> CursusResult<Self> {
        Ok(Self::new(
            AccessResolver::new(graph, positions),
            SessionCarrier::from_config(session)?,
            authenticator,
        ))
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("carrier", &self.carrier)
            .finish_non_exhaustive()
    }
}

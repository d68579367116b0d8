//! Access denial error

use cursus_core::{CursusError, ResourceRef, UserId};

/// The actor may not operate on the resource
///
/// Raised identically whether the resource is inaccessible or does not
/// exist, so callers cannot probe for existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("access denied to {resource}")]
pub struct AccessDenied {
    /// Actor whose request was denied
    pub actor: UserId,
    /// Resource the actor asked for
    pub resource: ResourceRef,
}

impl From<AccessDenied> for CursusError {
    fn from(err: AccessDenied) -> Self {
        CursusError::permission_denied(err.to_string())
    }
}

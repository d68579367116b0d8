//! Session and access middleware
//!
//! [`establish_session`] wraps the whole router: it opens the session cookie,
//! authenticates the raw token and stores the caller as an [`Actor`] request
//! extension. Requests without a usable session continue anonymously.
//!
//! [`require_access`] is attached per resource route with `route_layer`. It
//! runs `validate_access` for the route's kind and the `:id` path segment
//! before the handler, and hands the checked [`ResourceRef`] on as an
//! extension.

use crate::error::ApiError;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::{FromRequestParts, Path, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use cursus_core::{ResourceKind, ResourceRef, UserId};

/// Authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized("no active session"))
    }
}

/// Resolve the session cookie into an [`Actor`]
pub async fn establish_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = state.carrier.read_session(request.headers()) {
        match state.authenticator.authenticate(&token).await {
            Ok(Some(user)) => {
                tracing::trace!(actor = %user, "session established");
                request.extensions_mut().insert(Actor(user));
            }
            Ok(None) => tracing::debug!("session token not recognised, continuing anonymously"),
            Err(error) => tracing::warn!(
                error = %error,
                "token authentication failed, continuing anonymously"
            ),
        }
    }
    next.run(request).await
}

/// Refuse the request unless the actor may operate on `kind`/`:id`
pub async fn require_access(
    State((state, kind)): State<(AppState, ResourceKind)>,
    Actor(actor): Actor,
    Path(id): Path<u64>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let resource = ResourceRef::new(kind, id);
    state.resolver.validate_access(actor, resource).await?;
    request.extensions_mut().insert(resource);
    Ok(next.run(request).await)
}

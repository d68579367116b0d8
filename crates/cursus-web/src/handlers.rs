//! Request handlers

use crate::error::ApiError;
use crate::middleware::Actor;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse};
use axum::{Extension, Json};
use cursus_core::{ResourceKind, ResourceRef, UserId};
use serde::{Deserialize, Serialize};

/// Body of `POST /session`
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// Raw bearer token to seal
    pub token: String,
    /// Cookie lifetime, defaulting to the configured one
    #[serde(default)]
    pub max_age_seconds: Option<u64>,
}

/// Response of `POST /session`
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    /// Authenticated user
    pub user: UserId,
}

/// Response of `GET /access/:kind/:id`
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessView {
    /// Whether the current actor may operate on the resource
    pub allowed: bool,
}

/// Response of a guarded resource route
#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceView {
    /// Resource kind
    pub kind: ResourceKind,
    /// Resource id
    pub id: u64,
    /// Actor the access check ran for
    pub actor: UserId,
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /session`: authenticate a raw token and issue the sealed cookie
pub async fn open_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .authenticator
        .authenticate(&request.token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("unknown token"))?;

    let max_age = request
        .max_age_seconds
        .unwrap_or_else(|| state.carrier.default_max_age());
    let cookie = state.carrier.issue(&request.token, max_age)?;

    tracing::debug!(actor = %user, max_age, "session issued");
    Ok((
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Json(SessionView { user }),
    ))
}

/// `DELETE /session`: clear the session cookie
pub async fn close_session(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, state.carrier.revoke().to_string())]),
    )
}

/// `GET /access/:kind/:id`: boolean access query for the current actor
pub async fn check_access(
    State(state): State<AppState>,
    actor: Option<Actor>,
    Path((kind, id)): Path<(String, u64)>,
) -> Result<Json<AccessView>, ApiError> {
    let kind: ResourceKind = kind
        .parse()
        .map_err(|_| ApiError::bad_request(format!("unknown resource kind: {kind}")))?;
    let allowed = match actor {
        Some(Actor(actor)) => {
            state
                .resolver
                .has_access(actor, ResourceRef::new(kind, id))
                .await
        }
        None => false,
    };
    Ok(Json(AccessView { allowed }))
}

/// Guarded resource route; only reached after the access check passed
pub async fn show_resource(
    Actor(actor): Actor,
    Extension(resource): Extension<ResourceRef>,
) -> Json<ResourceView> {
    Json(ResourceView {
        kind: resource.kind(),
        id: resource.raw_id(),
        actor,
    })
}

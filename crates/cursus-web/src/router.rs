//! Route table

use crate::handlers::{check_access, close_session, health, open_session, show_resource};
use crate::middleware::{establish_session, require_access};
use crate::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use cursus_core::ResourceKind;

/// Collection path segment for a resource kind
pub fn collection(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Rti => "rtis",
        ResourceKind::Campus => "campuses",
        ResourceKind::Program => "programs",
        ResourceKind::Term => "terms",
        ResourceKind::CurricularUnit => "curricular-units",
        ResourceKind::Course => "courses",
        ResourceKind::WeeklyPlanning => "weekly-plannings",
        ResourceKind::ProgrammaticContent => "programmatic-contents",
        ResourceKind::Activity => "activities",
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/session", post(open_session).delete(close_session))
        .route("/access/:kind/:id", get(check_access));

    for kind in ResourceKind::ALL {
        app = app.merge(guarded(&state, kind));
    }

    app.layer(from_fn_with_state(state.clone(), establish_session))
        .with_state(state)
}

fn guarded(state: &AppState, kind: ResourceKind) -> Router<AppState> {
    Router::new()
        .route(&format!("/{}/:id", collection(kind)), get(show_resource))
        .route_layer(from_fn_with_state((state.clone(), kind), require_access))
}

//! Cursus Web: axum transport for the access core
//!
//! ```text
//! request ─▶ establish_session ─▶ require_access ─▶ handler
//!            (cookie → Actor)      (validate_access)
//! ```
//!
//! - `POST /session`, `DELETE /session`: issue and revoke the sealed cookie
//! - `GET /access/:kind/:id`: boolean access query
//! - `GET /<collection>/:id`: one guarded route per resource kind
//! - `GET /health`

#![forbid(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use middleware::Actor;
pub use router::{collection, router};
pub use state::AppState;

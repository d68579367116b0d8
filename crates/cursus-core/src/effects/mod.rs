//! Store interfaces consumed by the access core
//!
//! These are pure signatures with no implementations. In-memory handlers
//! live in `cursus-effects`; production deployments back them with their
//! own persistence layer.
//!
//! All lookups are read-only. Implementations must be safe for unbounded
//! concurrent use and return read-committed snapshot data; the resolver takes
//! no locks across a check.

pub mod authentication;
pub mod organization;
pub mod positions;

pub use authentication::TokenAuthenticator;
pub use organization::OrganizationGraph;
pub use positions::PositionStore;

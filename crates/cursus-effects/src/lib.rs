//! Cursus Effects: in-memory store handlers
//!
//! Implementations of the `cursus-core` store interfaces held entirely in
//! memory, plus [`OrganizationSnapshot`] for seeding them from TOML.

#![forbid(unsafe_code)]

pub mod authentication;
pub mod organization;
pub mod positions;
pub mod snapshot;

pub use authentication::StaticTokenAuthenticator;
pub use organization::MemoryOrganizationGraph;
pub use positions::MemoryPositionStore;
pub use snapshot::{MemoryStores, OrganizationSnapshot};

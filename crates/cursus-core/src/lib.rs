//! Cursus Core - organizational model and store interfaces
//!
//! Foundation types shared by the access-control core of the Cursus
//! course-planning platform:
//!
//! - Arena-style identifiers for every organizational entity
//! - Typed references to the nine protected resource kinds
//! - Roles, scopes and positional grants
//! - Store interfaces (organizational graph, positions, token authentication)
//! - The unified [`CursusError`] and layered [`config::CursusConfig`]
//!
//! The containment tree, root first:
//!
//! ```text
//! RTI ─┬─ Campus ─┐
//!      └─ Campus ─┴─ (offers) Program ─ Term ─ CurricularUnit ─ Course
//!                                  Course ─ WeeklyPlanning ─ ProgrammaticContent ─ Activity
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod effects;
pub mod errors;
pub mod identifiers;
pub mod position;
pub mod resource;

pub use config::{CursusConfig, SecretString, ServerConfig, SessionConfig};
pub use effects::{OrganizationGraph, PositionStore, TokenAuthenticator};
pub use errors::{CursusError, CursusResult};
pub use identifiers::{
    ActivityId, CampusId, CourseId, CurricularUnitId, ParseIdError, PositionId, ProgramId,
    ProgrammaticContentId, RtiId, TermId, UserId, WeeklyPlanningId,
};
pub use position::{Position, Role, Scope};
pub use resource::{ResourceKind, ResourceRef};

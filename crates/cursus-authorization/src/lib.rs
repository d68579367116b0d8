//! Cursus Authorization: hierarchical access resolution
//!
//! Answers "may this actor operate on this resource?" for every protected
//! resource kind by walking the organizational containment tree up to the
//! owning campuses and RTIs and intersecting them with the actor's position
//! scopes.
//!
//! Two forms share one decision:
//!
//! - [`AccessResolver::has_access`] returns `bool` and never fails
//! - [`AccessResolver::validate_access`] raises [`AccessDenied`]
//!
//! Access is monotonic toward the leaves: a grant on an RTI reaches every
//! campus, program, term, curricular unit, course, weekly planning,
//! programmatic content and activity beneath it, while a campus grant never
//! reaches its RTI.

#![forbid(unsafe_code)]

pub mod ancestry;
pub mod errors;
pub mod resolver;

pub use ancestry::{resolve_owning_scope, OwningScope};
pub use errors::AccessDenied;
pub use resolver::{match_positions, AccessDecision, AccessResolver, GrantBasis};

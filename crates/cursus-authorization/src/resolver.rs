//! Access resolver
//!
//! Decides whether an actor may operate on a protected resource by matching
//! the resource's owning campuses and RTIs against the actor's positions.
//!
//! # Decision
//!
//! 1. A course is granted to any user directly assigned as its teacher,
//!    independent of organizational scope.
//! 2. The resource is resolved to its [`OwningScope`]; no resolvable
//!    ancestor means deny.
//! 3. The actor's positions are fetched; none means deny.
//! 4. Grant iff some position is scoped to an owning RTI or campus.
//!
//! Roles are not consulted. Every failure (missing resource, store error)
//! degrades to a denial that looks exactly like an ordinary one.

use crate::ancestry::{resolve_owning_scope, OwningScope};
use crate::errors::AccessDenied;
use cursus_core::{
    CampusId, CourseId, CursusResult, OrganizationGraph, PositionStore, ResourceRef, RtiId,
    Scope, UserId,
};
use std::fmt;
use std::sync::Arc;

/// Why access was granted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantBasis {
    /// Actor is directly assigned as teacher of the course
    DirectAssignment(CourseId),
    /// Actor holds a position scoped to an owning RTI
    RtiScope(RtiId),
    /// Actor holds a position scoped to an owning campus
    CampusScope(CampusId),
}

impl fmt::Display for GrantBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrantBasis::DirectAssignment(course) => write!(f, "teacher of {course}"),
            GrantBasis::RtiScope(rti) => write!(f, "position on {rti}"),
            GrantBasis::CampusScope(campus) => write!(f, "position on {campus}"),
        }
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access granted
    Granted(GrantBasis),
    /// Access denied
    Denied,
}

impl AccessDecision {
    /// Whether access was granted
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted(_))
    }
}

/// Hierarchical access resolver
///
/// Stateless apart from its read-only store handles; safe to share across
/// any number of concurrent requests.
#[derive(Clone)]
pub struct AccessResolver {
    graph: Arc<dyn OrganizationGraph>,
    positions: Arc<dyn PositionStore>,
}

impl AccessResolver {
    /// Create a resolver over the given stores
    pub fn new(graph: Arc<dyn OrganizationGraph>, positions: Arc<dyn PositionStore>) -> Self {
        Self { graph, positions }
    }

    /// Decide access, surfacing store failures
    pub async fn decide(
        &self,
        actor: UserId,
        resource: impl Into<ResourceRef>,
    ) -> CursusResult<AccessDecision> {
        let resource = resource.into();

        if let ResourceRef::Course(course) = resource {
            if self.graph.assigned_teachers(course).await?.contains(&actor) {
                return Ok(AccessDecision::Granted(GrantBasis::DirectAssignment(
                    course,
                )));
            }
        }

        let Some(scope) = resolve_owning_scope(self.graph.as_ref(), resource).await? else {
            return Ok(AccessDecision::Denied);
        };

        let positions = self.positions.positions_of(actor).await?;
        Ok(match_positions(&scope, positions.iter().map(|p| p.scope())))
    }

    /// Whether `actor` may operate on `resource`
    ///
    /// Never fails: missing resources, actors without positions and store
    /// errors all answer `false`.
    pub async fn has_access(&self, actor: UserId, resource: impl Into<ResourceRef>) -> bool {
        let resource = resource.into();
        self.check(actor, resource).await.is_granted()
    }

    /// Require that `actor` may operate on `resource`
    ///
    /// Same decision as [`AccessResolver::has_access`], raised as
    /// [`AccessDenied`] instead of `false`.
    pub async fn validate_access(
        &self,
        actor: UserId,
        resource: impl Into<ResourceRef>,
    ) -> Result<(), AccessDenied> {
        let resource = resource.into();
        if self.check(actor, resource).await.is_granted() {
            Ok(())
        } else {
            Err(AccessDenied { actor, resource })
        }
    }

    async fn check(&self, actor: UserId, resource: ResourceRef) -> AccessDecision {
        match self.decide(actor, resource).await {
            Ok(AccessDecision::Granted(basis)) => {
                tracing::trace!(
                    actor = %actor,
                    resource = %resource,
                    basis = %basis,
                    "access granted"
                );
                AccessDecision::Granted(basis)
            }
            Ok(AccessDecision::Denied) => {
                tracing::debug!(actor = %actor, resource = %resource, "access denied");
                AccessDecision::Denied
            }
            Err(error) => {
                tracing::warn!(
                    actor = %actor,
                    resource = %resource,
                    error = %error,
                    "access lookup failed, denying"
                );
                AccessDecision::Denied
            }
        }
    }
}

impl fmt::Debug for AccessResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessResolver").finish_non_exhaustive()
    }
}

/// Match position scopes against an owning scope
///
/// RTI grants are reported ahead of campus grants when both apply.
pub fn match_positions(
    owning: &OwningScope,
    scopes: impl IntoIterator<Item = Scope>,
) -> AccessDecision {
    let mut campus_match = None;
    for scope in scopes {
        if !owning.is_covered_by(&scope) {
            continue;
        }
        match scope {
            Scope::Rti(rti) => return AccessDecision::Granted(GrantBasis::RtiScope(rti)),
            Scope::Campus(campus) => {
                campus_match.get_or_insert(GrantBasis::CampusScope(campus));
            }
        }
    }
    campus_match.map_or(AccessDecision::Denied, AccessDecision::Granted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cursus_core::{CursusError, Position, ProgramId};
    use std::collections::BTreeSet;

    struct FailingGraph;

    #[async_trait]
    impl OrganizationGraph for FailingGraph {
        async fn parent_of(&self, _node: ResourceRef) -> CursusResult<Option<ResourceRef>> {
            Err(CursusError::storage("connection reset"))
        }

        async fn contains(&self, _node: ResourceRef) -> CursusResult<bool> {
            Err(CursusError::storage("connection reset"))
        }

        async fn offering_campuses(
            &self,
            _program: ProgramId,
        ) -> CursusResult<BTreeSet<CampusId>> {
            Err(CursusError::storage("connection reset"))
        }

        async fn assigned_teachers(&self, _course: CourseId) -> CursusResult<BTreeSet<UserId>> {
            Err(CursusError::storage("connection reset"))
        }
    }

    struct NoPositions;

    #[async_trait]
    impl PositionStore for NoPositions {
        async fn positions_of(&self, _user: UserId) -> CursusResult<Vec<Position>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_store_failure_fails_closed() {
        let resolver = AccessResolver::new(Arc::new(FailingGraph), Arc::new(NoPositions));

        assert!(resolver.decide(UserId(1), CourseId(1)).await.is_err());
        assert!(!resolver.has_access(UserId(1), CourseId(1)).await);
        assert_eq!(
            resolver.validate_access(UserId(1), RtiId(1)).await,
            Err(AccessDenied {
                actor: UserId(1),
                resource: ResourceRef::Rti(RtiId(1)),
            })
        );
    }

    #[test]
    fn test_rti_basis_preferred_over_campus() {
        let owning = OwningScope::campus(CampusId(10), RtiId(1));
        let decision = match_positions(
            &owning,
            [Scope::Campus(CampusId(10)), Scope::Rti(RtiId(1))],
        );
        assert_eq!(decision, AccessDecision::Granted(GrantBasis::RtiScope(RtiId(1))));
    }

    #[test]
    fn test_no_scopes_denies() {
        let owning = OwningScope::campus(CampusId(10), RtiId(1));
        assert_eq!(match_positions(&owning, Vec::<Scope>::new()), AccessDecision::Denied);
        assert_eq!(
            match_positions(&owning, [Scope::Campus(CampusId(11)), Scope::Rti(RtiId(2))]),
            AccessDecision::Denied
        );
    }
}

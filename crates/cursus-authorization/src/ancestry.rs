//! Ancestry resolution
//!
//! Walks parent links from a resource up to the campuses and RTIs that own
//! it. Each hop must move strictly rootward by kind, so the walk ends after
//! at most six hops even if the store returns inconsistent edges.
//!
//! ```text
//! Activity → ProgrammaticContent → WeeklyPlanning → Course
//!          → CurricularUnit → Term → Program ⇒ {Campus → RTI}*
//! ```
//!
//! A program may be offered at several campuses, so everything at or below
//! a program resolves to the union of its offering campuses and their RTIs.

use cursus_core::{CampusId, CursusResult, OrganizationGraph, ResourceRef, RtiId, Scope};
use std::collections::BTreeSet;

/// Campuses and RTIs owning a resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwningScope {
    campuses: BTreeSet<CampusId>,
    rtis: BTreeSet<RtiId>,
}

impl OwningScope {
    /// Scope of an RTI: the RTI alone, no campus
    pub fn rti(rti: RtiId) -> Self {
        Self {
            campuses: BTreeSet::new(),
            rtis: BTreeSet::from([rti]),
        }
    }

    /// Scope of a campus: the campus and its RTI
    pub fn campus(campus: CampusId, rti: RtiId) -> Self {
        Self {
            campuses: BTreeSet::from([campus]),
            rtis: BTreeSet::from([rti]),
        }
    }

    /// Owning campuses
    pub fn campuses(&self) -> &BTreeSet<CampusId> {
        &self.campuses
    }

    /// Owning RTIs
    pub fn rtis(&self) -> &BTreeSet<RtiId> {
        &self.rtis
    }

    /// Whether a grant on `scope` covers this resource
    ///
    /// An RTI grant covers every campus beneath it; a campus grant covers
    /// only that campus's subtree and never the RTI itself.
    pub fn is_covered_by(&self, scope: &Scope) -> bool {
        match scope {
            Scope::Rti(rti) => self.rtis.contains(rti),
            Scope::Campus(campus) => self.campuses.contains(campus),
        }
    }

    fn merge(&mut self, other: OwningScope) {
        self.campuses.extend(other.campuses);
        self.rtis.extend(other.rtis);
    }

    fn is_empty(&self) -> bool {
        self.campuses.is_empty() && self.rtis.is_empty()
    }
}

/// Resolve the campuses and RTIs owning `resource`
///
/// Returns `Ok(None)` when the resource does not exist or has no resolvable
/// ancestor. Store failures propagate as errors.
pub async fn resolve_owning_scope<G>(
    graph: &G,
    resource: ResourceRef,
) -> CursusResult<Option<OwningScope>>
where
    G: OrganizationGraph + ?Sized,
{
    let mut node = resource;
    loop {
        match node {
            ResourceRef::Rti(rti) => {
                return Ok(graph
                    .contains(node)
                    .await?
                    .then(|| OwningScope::rti(rti)));
            }
            ResourceRef::Campus(campus) => return campus_scope(graph, campus).await,
            ResourceRef::Program(program) => {
                let mut scope = OwningScope::default();
                for campus in graph.offering_campuses(program).await? {
                    // Campuses without an RTI contribute nothing
                    if let Some(campus_scope) = campus_scope(graph, campus).await? {
                        scope.merge(campus_scope);
                    }
                }
                return Ok((!scope.is_empty()).then_some(scope));
            }
            _ => {
                let expected = node.kind().parent_kind();
                match graph.parent_of(node).await? {
                    Some(parent) if Some(parent.kind()) == expected => node = parent,
                    Some(parent) => {
                        tracing::warn!(
                            node = %node,
                            parent = %parent,
                            "inconsistent containment edge, treating as orphan"
                        );
                        return Ok(None);
                    }
                    None => return Ok(None),
                }
            }
        }
    }
}

async fn campus_scope<G>(graph: &G, campus: CampusId) -> CursusResult<Option<OwningScope>>
where
    G: OrganizationGraph + ?Sized,
{
    match graph.parent_of(ResourceRef::Campus(campus)).await? {
        Some(ResourceRef::Rti(rti)) => Ok(Some(OwningScope::campus(campus, rti))),
        Some(parent) => {
            tracing::warn!(
                campus = %campus,
                parent = %parent,
                "campus parent is not an RTI, treating as orphan"
            );
            Ok(None)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursus_core::{
        ActivityId, CourseId, CurricularUnitId, ProgramId, ProgrammaticContentId, TermId,
        WeeklyPlanningId,
    };
    use cursus_effects::MemoryOrganizationGraph;

    fn graph() -> MemoryOrganizationGraph {
        let graph = MemoryOrganizationGraph::new();
        graph.insert_rti(RtiId(1)).unwrap();
        graph.insert_rti(RtiId(2)).unwrap();
        graph.insert_campus(CampusId(10), RtiId(1)).unwrap();
        graph.insert_campus(CampusId(20), RtiId(2)).unwrap();
        graph
            .insert_program(ProgramId(100), [CampusId(10), CampusId(20)])
            .unwrap();
        graph.insert_term(TermId(1000), ProgramId(100)).unwrap();
        graph
            .insert_curricular_unit(CurricularUnitId(2000), TermId(1000))
            .unwrap();
        graph
            .insert_course(CourseId(3000), CurricularUnitId(2000))
            .unwrap();
        graph
            .insert_weekly_planning(WeeklyPlanningId(4000), CourseId(3000))
            .unwrap();
        graph
            .insert_programmatic_content(ProgrammaticContentId(5000), WeeklyPlanningId(4000))
            .unwrap();
        graph
            .insert_activity(ActivityId(6000), ProgrammaticContentId(5000))
            .unwrap();
        graph
    }

    #[tokio::test]
    async fn test_leaf_resolves_to_offering_union() {
        let scope = resolve_owning_scope(&graph(), ActivityId(6000).into())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            scope.campuses(),
            &BTreeSet::from([CampusId(10), CampusId(20)])
        );
        assert_eq!(scope.rtis(), &BTreeSet::from([RtiId(1), RtiId(2)]));
    }

    #[tokio::test]
    async fn test_campus_and_rti_resolve_to_themselves() {
        let graph = graph();
        assert_eq!(
            resolve_owning_scope(&graph, CampusId(10).into())
                .await
                .unwrap(),
            Some(OwningScope::campus(CampusId(10), RtiId(1)))
        );
        assert_eq!(
            resolve_owning_scope(&graph, RtiId(2).into()).await.unwrap(),
            Some(OwningScope::rti(RtiId(2)))
        );
    }

    #[tokio::test]
    async fn test_missing_resources_resolve_to_none() {
        let graph = graph();
        for missing in [
            ResourceRef::Rti(RtiId(9)),
            ResourceRef::Campus(CampusId(99)),
            ResourceRef::Program(ProgramId(999)),
            ResourceRef::Course(CourseId(9999)),
            ResourceRef::Activity(ActivityId(99999)),
        ] {
            assert_eq!(
                resolve_owning_scope(&graph, missing).await.unwrap(),
                None,
                "{missing} should not resolve"
            );
        }
    }

    #[test]
    fn test_campus_grant_does_not_cover_rti() {
        let rti_scope = OwningScope::rti(RtiId(1));
        assert!(!rti_scope.is_covered_by(&Scope::Campus(CampusId(10))));
        assert!(rti_scope.is_covered_by(&Scope::Rti(RtiId(1))));

        let campus_scope = OwningScope::campus(CampusId(10), RtiId(1));
        assert!(campus_scope.is_covered_by(&Scope::Rti(RtiId(1))));
        assert!(!campus_scope.is_covered_by(&Scope::Campus(CampusId(11))));
    }
}

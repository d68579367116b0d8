//! Organizational graph lookups

use crate::identifiers::{CampusId, CourseId, ProgramId, UserId};
use crate::resource::ResourceRef;
use crate::CursusResult;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Read-only view of the containment edges between organizational entities
#[async_trait]
pub trait OrganizationGraph: Send + Sync {
    /// Single containment parent of `node`
    ///
    /// Returns `Ok(None)` when the node does not exist. Programs and RTIs
    /// have no single parent and also yield `Ok(None)`; callers resolve
    /// programs through [`OrganizationGraph::offering_campuses`].
    async fn parent_of(&self, node: ResourceRef) -> CursusResult<Option<ResourceRef>>;

    /// Whether `node` exists
    async fn contains(&self, node: ResourceRef) -> CursusResult<bool>;

    /// Campuses offering `program`; empty when the program does not exist
    async fn offering_campuses(&self, program: ProgramId) -> CursusResult<BTreeSet<CampusId>>;

    /// Users directly assigned as teachers of `course`
    async fn assigned_teachers(&self, course: CourseId) -> CursusResult<BTreeSet<UserId>>;
}

#[async_trait]
impl<T: OrganizationGraph + ?Sized> OrganizationGraph for Arc<T> {
    async fn parent_of(&self, node: ResourceRef) -> CursusResult<Option<ResourceRef>> {
        (**self).parent_of(node).await
    }

    async fn contains(&self, node: ResourceRef) -> CursusResult<bool> {
        (**self).contains(node).await
    }

    async fn offering_campuses(&self, program: ProgramId) -> CursusResult<BTreeSet<CampusId>> {
        (**self).offering_campuses(program).await
    }

    async fn assigned_teachers(&self, course: CourseId) -> CursusResult<BTreeSet<UserId>> {
        (**self).assigned_teachers(course).await
    }
}

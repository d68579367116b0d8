//! In-memory organizational graph
//!
//! Holds containment edges keyed by arena ids. Every insert checks that the
//! parent already exists and that the id is unused, so the graph is a tree
//! by construction: a node can only ever point at one older node.

use async_trait::async_trait;
use cursus_core::{
    ActivityId, CampusId, CourseId, CurricularUnitId, CursusError, CursusResult,
    OrganizationGraph, ProgramId, ProgrammaticContentId, ResourceRef, RtiId, TermId, UserId,
    WeeklyPlanningId,
};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Default)]
struct GraphState {
    nodes: HashSet<ResourceRef>,
    parents: HashMap<ResourceRef, ResourceRef>,
    offerings: HashMap<ProgramId, BTreeSet<CampusId>>,
    teachers: HashMap<CourseId, BTreeSet<UserId>>,
}

impl GraphState {
    fn insert_child(&mut self, node: ResourceRef, parent: ResourceRef) -> CursusResult<()> {
        if !self.nodes.contains(&parent) {
            return Err(CursusError::invalid(format!(
                "cannot insert {node}: parent {parent} does not exist"
            )));
        }
        self.insert_node(node)?;
        self.parents.insert(node, parent);
        Ok(())
    }

    fn insert_node(&mut self, node: ResourceRef) -> CursusResult<()> {
        if !self.nodes.insert(node) {
            return Err(CursusError::invalid(format!("{node} already exists")));
        }
        Ok(())
    }
}

/// Organizational graph held in memory
///
/// Lookups take a short read lock per call; a single access check therefore
/// sees read-committed data, not a consistent snapshot across hops.
#[derive(Debug, Default)]
pub struct MemoryOrganizationGraph {
    state: RwLock<GraphState>,
}

impl MemoryOrganizationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an RTI
    pub fn insert_rti(&self, rti: RtiId) -> CursusResult<()> {
        self.state.write().insert_node(rti.into())
    }

    /// Add a campus under `rti`
    pub fn insert_campus(&self, campus: CampusId, rti: RtiId) -> CursusResult<()> {
        self.state.write().insert_child(campus.into(), rti.into())
    }

    /// Add a program offered at `campuses`
    pub fn insert_program(
        &self,
        program: ProgramId,
        campuses: impl IntoIterator<Item = CampusId>,
    ) -> CursusResult<()> {
        let mut state = self.state.write();
        let campuses: BTreeSet<CampusId> = campuses.into_iter().collect();
        if let Some(missing) = campuses
            .iter()
            .find(|campus| !state.nodes.contains(&ResourceRef::Campus(**campus)))
        {
            return Err(CursusError::invalid(format!(
                "cannot insert {program}: offering {missing} does not exist"
            )));
        }
        state.insert_node(program.into())?;
        state.offerings.insert(program, campuses);
        Ok(())
    }

    /// Offer an existing program at an additional campus
    pub fn offer_program(&self, program: ProgramId, campus: CampusId) -> CursusResult<()> {
        let mut state = self.state.write();
        if !state.nodes.contains(&ResourceRef::Campus(campus)) {
            return Err(CursusError::invalid(format!("{campus} does not exist")));
        }
        match state.offerings.get_mut(&program) {
            Some(campuses) => {
                campuses.insert(campus);
                Ok(())
            }
            None => Err(CursusError::invalid(format!("{program} does not exist"))),
        }
    }

    /// Add a term to `program`
    pub fn insert_term(&self, term: TermId, program: ProgramId) -> CursusResult<()> {
        self.state.write().insert_child(term.into(), program.into())
    }

    /// Add a curricular unit to `term`
    pub fn insert_curricular_unit(&self, unit: CurricularUnitId, term: TermId) -> CursusResult<()> {
        self.state.write().insert_child(unit.into(), term.into())
    }

    /// Add a course to `unit`
    pub fn insert_course(&self, course: CourseId, unit: CurricularUnitId) -> CursusResult<()> {
        self.state.write().insert_child(course.into(), unit.into())
    }

    /// Add a weekly planning to `course`
    pub fn insert_weekly_planning(
        &self,
        planning: WeeklyPlanningId,
        course: CourseId,
    ) -> CursusResult<()> {
        self.state
            .write()
            .insert_child(planning.into(), course.into())
    }

    /// Add programmatic content to `planning`
    pub fn insert_programmatic_content(
        &self,
        content: ProgrammaticContentId,
        planning: WeeklyPlanningId,
    ) -> CursusResult<()> {
        self.state
            .write()
            .insert_child(content.into(), planning.into())
    }

    /// Add an activity to `content`
    pub fn insert_activity(
        &self,
        activity: ActivityId,
        content: ProgrammaticContentId,
    ) -> CursusResult<()> {
        self.state
            .write()
            .insert_child(activity.into(), content.into())
    }

    /// Assign `teacher` to `course`
    pub fn assign_teacher(&self, course: CourseId, teacher: UserId) -> CursusResult<()> {
        let mut state = self.state.write();
        if !state.nodes.contains(&ResourceRef::Course(course)) {
            return Err(CursusError::invalid(format!("{course} does not exist")));
        }
        state.teachers.entry(course).or_default().insert(teacher);
        Ok(())
    }

    /// Remove `teacher` from `course`; returns whether an assignment existed
    pub fn unassign_teacher(&self, course: CourseId, teacher: UserId) -> bool {
        self.state
            .write()
            .teachers
            .get_mut(&course)
            .is_some_and(|teachers| teachers.remove(&teacher))
    }

    /// Number of nodes in the graph
    pub fn len(&self) -> usize {
        self.state.read().nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.state.read().nodes.is_empty()
    }
}

#[async_trait]
impl OrganizationGraph for MemoryOrganizationGraph {
    async fn parent_of(&self, node: ResourceRef) -> CursusResult<Option<ResourceRef>> {
        Ok(self.state.read().parents.get(&node).copied())
    }

    async fn contains(&self, node: ResourceRef) -> CursusResult<bool> {
        Ok(self.state.read().nodes.contains(&node))
    }

    async fn offering_campuses(&self, program: ProgramId) -> CursusResult<BTreeSet<CampusId>> {
        Ok(self
            .state
            .read()
            .offerings
            .get(&program)
            .cloned()
            .unwrap_or_default())
    }

    async fn assigned_teachers(&self, course: CourseId) -> CursusResult<BTreeSet<UserId>> {
        Ok(self
            .state
            .read()
            .teachers
            .get(&course)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> MemoryOrganizationGraph {
        let graph = MemoryOrganizationGraph::new();
        graph.insert_rti(RtiId(1)).unwrap();
        graph.insert_campus(CampusId(10), RtiId(1)).unwrap();
        graph.insert_program(ProgramId(100), [CampusId(10)]).unwrap();
        graph.insert_term(TermId(1000), ProgramId(100)).unwrap();
        graph
    }

    #[test]
    fn test_len_counts_nodes() {
        let empty = MemoryOrganizationGraph::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let graph = graph();
        assert!(!graph.is_empty());
        assert_eq!(graph.len(), 4);
    }

    #[tokio::test]
    async fn test_parent_edges() {
        let graph = graph();
        assert_eq!(
            graph.parent_of(TermId(1000).into()).await.unwrap(),
            Some(ResourceRef::Program(ProgramId(100)))
        );
        assert_eq!(
            graph.parent_of(CampusId(10).into()).await.unwrap(),
            Some(ResourceRef::Rti(RtiId(1)))
        );
        assert_eq!(graph.parent_of(ProgramId(100).into()).await.unwrap(), None);
        assert_eq!(graph.parent_of(TermId(9).into()).await.unwrap(), None);
    }

    #[test]
    fn test_missing_parent_is_rejected() {
        let graph = graph();
        assert!(graph
            .insert_curricular_unit(CurricularUnitId(1), TermId(404))
            .is_err());
        assert!(graph.insert_program(ProgramId(101), [CampusId(404)]).is_err());
        assert!(graph.insert_campus(CampusId(11), RtiId(404)).is_err());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let graph = graph();
        assert!(graph.insert_term(TermId(1000), ProgramId(100)).is_err());
        assert!(graph.insert_rti(RtiId(1)).is_err());
    }

    #[tokio::test]
    async fn test_offering_union_grows() {
        let graph = graph();
        graph.insert_campus(CampusId(11), RtiId(1)).unwrap();
        graph.offer_program(ProgramId(100), CampusId(11)).unwrap();
        let campuses = graph.offering_campuses(ProgramId(100)).await.unwrap();
        assert_eq!(campuses.len(), 2);
        assert!(graph
            .offering_campuses(ProgramId(404))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_teacher_assignment() {
        let graph = graph();
        graph
            .insert_curricular_unit(CurricularUnitId(5), TermId(1000))
            .unwrap();
        graph.insert_course(CourseId(7), CurricularUnitId(5)).unwrap();
        graph.assign_teacher(CourseId(7), UserId(3)).unwrap();
        assert!(graph.assign_teacher(CourseId(8), UserId(3)).is_err());

        let teachers = graph.assigned_teachers(CourseId(7)).await.unwrap();
        assert!(teachers.contains(&UserId(3)));

        assert!(graph.unassign_teacher(CourseId(7), UserId(3)));
        assert!(!graph.unassign_teacher(CourseId(7), UserId(3)));
    }
}

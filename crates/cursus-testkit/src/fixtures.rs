//! Standard organization fixture
//!
//! ```text
//! rti-1 ─┬─ campus-10 ─┐
//!        └─ campus-11 ─┴─ program-100 ─ term-1000 ─ curricular_unit-3000 ─ course-4000 ─ ...
//!           campus-11 ─── program-101 ─ term-1010 ─ curricular_unit-3010 ─ course-4010 ─ ...
//! rti-2 ─── campus-20 ─── program-200 ─ term-2000 ─ curricular_unit-3020 ─ course-4020 ─ ...
//! ```
//!
//! Every course carries one weekly planning (5xxx), one programmatic content
//! (6xxx) and one activity (7xxx) with the same suffix.

use cursus_core::{
    ActivityId, CampusId, CourseId, CurricularUnitId, Position, PositionId, ProgramId,
    ProgrammaticContentId, ResourceRef, Role, RtiId, Scope, TermId, UserId, WeeklyPlanningId,
};
use cursus_effects::{MemoryOrganizationGraph, MemoryPositionStore, StaticTokenAuthenticator};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Actors present in the standard fixture
pub mod actors {
    use cursus_core::UserId;

    /// TEACHER position on campus-10
    pub const CAMPUS_TEACHER: UserId = UserId(1);
    /// ADMIN position on rti-1
    pub const RTI_ADMIN: UserId = UserId(2);
    /// TEACHER position on campus-10, directly assigned to course-4020 (campus-20)
    pub const ASSIGNED_TEACHER: UserId = UserId(3);
    /// No positions at all
    pub const NO_POSITIONS: UserId = UserId(4);
    /// EDUCATION_MANAGER position on campus-20
    pub const SOUTH_MANAGER: UserId = UserId(5);
    /// Not known to any store
    pub const STRANGER: UserId = UserId(99);

    /// Every actor holding a fixture token
    pub const ALL: [UserId; 5] = [
        CAMPUS_TEACHER,
        RTI_ADMIN,
        ASSIGNED_TEACHER,
        NO_POSITIONS,
        SOUTH_MANAGER,
    ];
}

/// Fixture course chains: (program, term, unit, course, planning, content, activity)
const CHAINS: [(u64, u64, u64, u64, u64, u64, u64); 3] = [
    (100, 1000, 3000, 4000, 5000, 6000, 7000),
    (101, 1010, 3010, 4010, 5010, 6010, 7010),
    (200, 2000, 3020, 4020, 5020, 6020, 7020),
];

/// Shared stores populated with the standard organization
#[derive(Debug, Clone)]
pub struct OrgFixture {
    /// Organizational graph
    pub graph: Arc<MemoryOrganizationGraph>,
    /// Position grants
    pub positions: Arc<MemoryPositionStore>,
    /// Static bearer tokens, `token-<user>` for every actor
    pub authenticator: Arc<StaticTokenAuthenticator>,
    edges: Vec<(ResourceRef, ResourceRef)>,
}

impl OrgFixture {
    /// Build the standard fixture
    pub fn standard() -> Self {
        let graph = MemoryOrganizationGraph::new();
        let mut edges = Vec::new();

        graph.insert_rti(RtiId(1)).unwrap();
        graph.insert_rti(RtiId(2)).unwrap();
        for (campus, rti) in [(10, 1), (11, 1), (20, 2)] {
            graph.insert_campus(CampusId(campus), RtiId(rti)).unwrap();
            edges.push((CampusId(campus).into(), RtiId(rti).into()));
        }

        let offerings: [(u64, &[u64]); 3] = [(100, &[10, 11]), (101, &[11]), (200, &[20])];
        for (program, campuses) in offerings {
            graph
                .insert_program(
                    ProgramId(program),
                    campuses.iter().map(|c| CampusId(*c)),
                )
                .unwrap();
            for campus in campuses {
                edges.push((ProgramId(program).into(), CampusId(*campus).into()));
            }
        }

        for (program, term, unit, course, planning, content, activity) in CHAINS {
            graph.insert_term(TermId(term), ProgramId(program)).unwrap();
            graph
                .insert_curricular_unit(CurricularUnitId(unit), TermId(term))
                .unwrap();
            graph
                .insert_course(CourseId(course), CurricularUnitId(unit))
                .unwrap();
            graph
                .insert_weekly_planning(WeeklyPlanningId(planning), CourseId(course))
                .unwrap();
            graph
                .insert_programmatic_content(
                    ProgrammaticContentId(content),
                    WeeklyPlanningId(planning),
                )
                .unwrap();
            graph
                .insert_activity(ActivityId(activity), ProgrammaticContentId(content))
                .unwrap();

            edges.push((TermId(term).into(), ProgramId(program).into()));
            edges.push((CurricularUnitId(unit).into(), TermId(term).into()));
            edges.push((CourseId(course).into(), CurricularUnitId(unit).into()));
            edges.push((WeeklyPlanningId(planning).into(), CourseId(course).into()));
            edges.push((
                ProgrammaticContentId(content).into(),
                WeeklyPlanningId(planning).into(),
            ));
            edges.push((
                ActivityId(activity).into(),
                ProgrammaticContentId(content).into(),
            ));
        }

        graph
            .assign_teacher(CourseId(4020), actors::ASSIGNED_TEACHER)
            .unwrap();

        let positions = MemoryPositionStore::new();
        let grants = [
            (1, actors::CAMPUS_TEACHER, Role::Teacher, Scope::Campus(CampusId(10))),
            (2, actors::RTI_ADMIN, Role::Admin, Scope::Rti(RtiId(1))),
            (3, actors::ASSIGNED_TEACHER, Role::Teacher, Scope::Campus(CampusId(10))),
            (
                4,
                actors::SOUTH_MANAGER,
                Role::EducationManager,
                Scope::Campus(CampusId(20)),
            ),
        ];
        for (id, user, role, scope) in grants {
            positions
                .grant(Position::new(PositionId(id), user, role, scope))
                .unwrap();
        }

        let mut authenticator = StaticTokenAuthenticator::new();
        for user in actors::ALL {
            authenticator.insert(token_for(user), user);
        }

        Self {
            graph: Arc::new(graph),
            positions: Arc::new(positions),
            authenticator: Arc::new(authenticator),
            edges,
        }
    }

    /// Every resource in the fixture
    pub fn resources(&self) -> Vec<ResourceRef> {
        let mut all: BTreeSet<ResourceRef> = BTreeSet::new();
        for (child, parent) in &self.edges {
            all.insert(*child);
            all.insert(*parent);
        }
        all.into_iter().collect()
    }

    /// `ancestor` and every resource beneath it
    pub fn descendants_of(&self, ancestor: ResourceRef) -> Vec<ResourceRef> {
        let mut found = BTreeSet::from([ancestor]);
        loop {
            let before = found.len();
            for (child, parent) in &self.edges {
                if found.contains(parent) {
                    found.insert(*child);
                }
            }
            if found.len() == before {
                break;
            }
        }
        found.into_iter().collect()
    }
}

/// Bearer token registered for `user` in the fixture authenticator
pub fn token_for(user: UserId) -> String {
    format!("token-{}", user.get())
}

/// Resources that exist nowhere in the fixture, one per kind
pub fn missing_resources() -> Vec<ResourceRef> {
    cursus_core::ResourceKind::ALL
        .iter()
        .map(|kind| ResourceRef::new(*kind, 987_654))
        .collect()
}

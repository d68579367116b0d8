//! End-to-end access decisions over the standard organization fixture

#![allow(clippy::unwrap_used, clippy::expect_used)]

use cursus_authorization::{AccessDecision, AccessDenied, AccessResolver, GrantBasis};
use cursus_core::{
    ActivityId, CampusId, CourseId, CurricularUnitId, Position, PositionId, ProgramId,
    ProgrammaticContentId, ResourceRef, Role, RtiId, Scope, TermId, WeeklyPlanningId,
};
use cursus_effects::MemoryOrganizationGraph;
use cursus_testkit::{actors, missing_resources, OrgFixture};
use std::sync::Arc;

fn resolver(fixture: &OrgFixture) -> AccessResolver {
    AccessResolver::new(fixture.graph.clone(), fixture.positions.clone())
}

#[tokio::test]
async fn campus_teacher_reaches_course_on_their_campus() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    assert!(resolver.has_access(actors::CAMPUS_TEACHER, CourseId(4000)).await);
    assert_eq!(
        resolver
            .decide(actors::CAMPUS_TEACHER, CourseId(4000))
            .await
            .unwrap(),
        AccessDecision::Granted(GrantBasis::CampusScope(CampusId(10)))
    );
}

#[tokio::test]
async fn direct_assignment_overrides_missing_scope() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    // course-4020 lives under campus-20; the actor only holds campus-10
    assert!(resolver.has_access(actors::ASSIGNED_TEACHER, CourseId(4020)).await);
    assert_eq!(
        resolver
            .decide(actors::ASSIGNED_TEACHER, CourseId(4020))
            .await
            .unwrap(),
        AccessDecision::Granted(GrantBasis::DirectAssignment(CourseId(4020)))
    );

    // The campus-10 teacher without the assignment is refused
    assert!(!resolver.has_access(actors::CAMPUS_TEACHER, CourseId(4020)).await);
}

#[tokio::test]
async fn direct_assignment_does_not_extend_to_course_children() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    assert!(
        !resolver
            .has_access(actors::ASSIGNED_TEACHER, WeeklyPlanningId(5020))
            .await
    );
    assert!(!resolver.has_access(actors::ASSIGNED_TEACHER, ActivityId(7020)).await);
}

#[tokio::test]
async fn direct_assignment_grants_without_any_position() {
    let fixture = OrgFixture::standard();
    fixture
        .graph
        .assign_teacher(CourseId(4000), actors::NO_POSITIONS)
        .unwrap();
    let resolver = resolver(&fixture);

    assert!(resolver.has_access(actors::NO_POSITIONS, CourseId(4000)).await);
    assert!(!resolver.has_access(actors::NO_POSITIONS, TermId(1000)).await);
}

#[tokio::test]
async fn program_offered_at_two_campuses_needs_only_one() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    // program-100 is offered at campus-10 and campus-11
    assert!(resolver.has_access(actors::CAMPUS_TEACHER, ProgramId(100)).await);
    // program-101 is offered only at campus-11
    assert!(!resolver.has_access(actors::CAMPUS_TEACHER, ProgramId(101)).await);
}

#[tokio::test]
async fn campus_grant_covers_whole_subtree() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    let subtree: [ResourceRef; 8] = [
        CampusId(10).into(),
        ProgramId(100).into(),
        TermId(1000).into(),
        CurricularUnitId(3000).into(),
        CourseId(4000).into(),
        WeeklyPlanningId(5000).into(),
        ProgrammaticContentId(6000).into(),
        ActivityId(7000).into(),
    ];
    for resource in subtree {
        assert!(
            resolver.has_access(actors::CAMPUS_TEACHER, resource).await,
            "{resource} should be reachable from campus-10"
        );
    }
}

#[tokio::test]
async fn campus_grant_never_reaches_its_rti_or_siblings() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    assert!(!resolver.has_access(actors::CAMPUS_TEACHER, RtiId(1)).await);
    assert!(!resolver.has_access(actors::CAMPUS_TEACHER, CampusId(11)).await);
    assert!(!resolver.has_access(actors::CAMPUS_TEACHER, CampusId(20)).await);
}

#[tokio::test]
async fn rti_admin_reaches_every_campus_but_not_other_rtis() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    assert!(resolver.has_access(actors::RTI_ADMIN, RtiId(1)).await);
    assert!(resolver.has_access(actors::RTI_ADMIN, CampusId(11)).await);
    assert!(resolver.has_access(actors::RTI_ADMIN, ActivityId(7010)).await);
    assert_eq!(
        resolver.decide(actors::RTI_ADMIN, CourseId(4010)).await.unwrap(),
        AccessDecision::Granted(GrantBasis::RtiScope(RtiId(1)))
    );

    assert!(!resolver.has_access(actors::RTI_ADMIN, RtiId(2)).await);
    assert!(!resolver.has_access(actors::RTI_ADMIN, CourseId(4020)).await);
}

#[tokio::test]
async fn role_is_not_consulted() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    assert!(resolver.has_access(actors::SOUTH_MANAGER, ActivityId(7020)).await);
    assert!(!resolver.has_access(actors::SOUTH_MANAGER, ActivityId(7000)).await);

    fixture
        .positions
        .grant(Position::new(
            PositionId(50),
            actors::NO_POSITIONS,
            Role::Student,
            Scope::Campus(CampusId(20)),
        ))
        .unwrap();
    assert!(resolver.has_access(actors::NO_POSITIONS, ActivityId(7020)).await);
}

#[tokio::test]
async fn actor_without_positions_is_denied_everywhere() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    for resource in fixture.resources() {
        assert!(!resolver.has_access(actors::NO_POSITIONS, resource).await);
        assert!(!resolver.has_access(actors::STRANGER, resource).await);
    }
}

#[tokio::test]
async fn missing_and_inaccessible_are_indistinguishable() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    let inaccessible = resolver
        .validate_access(actors::CAMPUS_TEACHER, CourseId(4010))
        .await
        .unwrap_err();
    let missing = resolver
        .validate_access(actors::CAMPUS_TEACHER, CourseId(987_654))
        .await
        .unwrap_err();

    assert_eq!(inaccessible.actor, missing.actor);
    assert_eq!(inaccessible.resource.kind(), missing.resource.kind());
    assert_eq!(
        inaccessible.to_string().replace("4010", "#"),
        missing.to_string().replace("987654", "#")
    );

    for resource in missing_resources() {
        assert!(!resolver.has_access(actors::RTI_ADMIN, resource).await);
        assert_eq!(
            resolver.validate_access(actors::RTI_ADMIN, resource).await,
            Err(AccessDenied {
                actor: actors::RTI_ADMIN,
                resource,
            })
        );
    }
}

#[tokio::test]
async fn boolean_and_raising_forms_agree() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    for actor in actors::ALL {
        for resource in fixture.resources() {
            let allowed = resolver.has_access(actor, resource).await;
            let validated = resolver.validate_access(actor, resource).await.is_ok();
            assert_eq!(allowed, validated, "{actor} on {resource}");
        }
    }
}

#[tokio::test]
async fn orphaned_program_is_denied() {
    let graph = MemoryOrganizationGraph::new();
    graph.insert_rti(RtiId(1)).unwrap();
    graph.insert_campus(CampusId(10), RtiId(1)).unwrap();
    // No offering campus: the program and everything beneath it is orphaned
    graph
        .insert_program(ProgramId(100), Vec::<CampusId>::new())
        .unwrap();
    graph.insert_term(TermId(1000), ProgramId(100)).unwrap();

    let fixture = OrgFixture::standard();
    let resolver = AccessResolver::new(Arc::new(graph), fixture.positions.clone());

    assert!(!resolver.has_access(actors::RTI_ADMIN, ProgramId(100)).await);
    assert!(!resolver.has_access(actors::RTI_ADMIN, TermId(1000)).await);
    assert!(resolver.has_access(actors::RTI_ADMIN, CampusId(10)).await);
}

#[tokio::test]
async fn revoked_position_takes_effect_on_next_check() {
    let fixture = OrgFixture::standard();
    let resolver = resolver(&fixture);

    assert!(resolver.has_access(actors::SOUTH_MANAGER, CourseId(4020)).await);
    fixture.positions.revoke(PositionId(4)).unwrap();
    assert!(!resolver.has_access(actors::SOUTH_MANAGER, CourseId(4020)).await);
}

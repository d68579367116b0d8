//! Protected resource kinds and typed resource references

use crate::identifiers::{
    ActivityId, CampusId, CourseId, CurricularUnitId, ParseIdError, ProgramId,
    ProgrammaticContentId, RtiId, TermId, WeeklyPlanningId,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a protected resource
///
/// Ordered from the root of the containment tree to its leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Regional Technological Institute
    Rti,
    /// Campus
    Campus,
    /// Program
    Program,
    /// Term
    Term,
    /// Curricular unit
    CurricularUnit,
    /// Course
    Course,
    /// Weekly planning
    WeeklyPlanning,
    /// Programmatic content
    ProgrammaticContent,
    /// Activity
    Activity,
}

impl ResourceKind {
    /// All protected kinds, root first
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Rti,
        ResourceKind::Campus,
        ResourceKind::Program,
        ResourceKind::Term,
        ResourceKind::CurricularUnit,
        ResourceKind::Course,
        ResourceKind::WeeklyPlanning,
        ResourceKind::ProgrammaticContent,
        ResourceKind::Activity,
    ];

    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Rti => "rti",
            ResourceKind::Campus => "campus",
            ResourceKind::Program => "program",
            ResourceKind::Term => "term",
            ResourceKind::CurricularUnit => "curricular_unit",
            ResourceKind::Course => "course",
            ResourceKind::WeeklyPlanning => "weekly_planning",
            ResourceKind::ProgrammaticContent => "programmatic_content",
            ResourceKind::Activity => "activity",
        }
    }

    /// Kind of the single containment parent, if the kind has one
    ///
    /// Programs are offered at a set of campuses and RTIs are roots, so
    /// neither has a single parent.
    pub fn parent_kind(&self) -> Option<ResourceKind> {
        match self {
            ResourceKind::Rti | ResourceKind::Program => None,
            ResourceKind::Campus => Some(ResourceKind::Rti),
            ResourceKind::Term => Some(ResourceKind::Program),
            ResourceKind::CurricularUnit => Some(ResourceKind::Term),
            ResourceKind::Course => Some(ResourceKind::CurricularUnit),
            ResourceKind::WeeklyPlanning => Some(ResourceKind::Course),
            ResourceKind::ProgrammaticContent => Some(ResourceKind::WeeklyPlanning),
            ResourceKind::Activity => Some(ResourceKind::ProgrammaticContent),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseIdError {
                kind: "resource kind",
                input: s.to_string(),
            })
    }
}

/// Typed reference to a protected resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ResourceRef {
    /// Regional Technological Institute
    Rti(RtiId),
    /// Campus
    Campus(CampusId),
    /// Program
    Program(ProgramId),
    /// Term
    Term(TermId),
    /// Curricular unit
    CurricularUnit(CurricularUnitId),
    /// Course
    Course(CourseId),
    /// Weekly planning
    WeeklyPlanning(WeeklyPlanningId),
    /// Programmatic content
    ProgrammaticContent(ProgrammaticContentId),
    /// Activity
    Activity(ActivityId),
}

impl ResourceRef {
    /// Build a reference from a kind and a raw id, as received from transport
    pub fn new(kind: ResourceKind, raw: u64) -> Self {
        match kind {
            ResourceKind::Rti => ResourceRef::Rti(RtiId(raw)),
            ResourceKind::Campus => ResourceRef::Campus(CampusId(raw)),
            ResourceKind::Program => ResourceRef::Program(ProgramId(raw)),
            ResourceKind::Term => ResourceRef::Term(TermId(raw)),
            ResourceKind::CurricularUnit => ResourceRef::CurricularUnit(CurricularUnitId(raw)),
            ResourceKind::Course => ResourceRef::Course(CourseId(raw)),
            ResourceKind::WeeklyPlanning => ResourceRef::WeeklyPlanning(WeeklyPlanningId(raw)),
            ResourceKind::ProgrammaticContent => {
                ResourceRef::ProgrammaticContent(ProgrammaticContentId(raw))
            }
            ResourceKind::Activity => ResourceRef::Activity(ActivityId(raw)),
        }
    }

    /// Kind of the referenced resource
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceRef::Rti(_) => ResourceKind::Rti,
            ResourceRef::Campus(_) => ResourceKind::Campus,
            ResourceRef::Program(_) => ResourceKind::Program,
            ResourceRef::Term(_) => ResourceKind::Term,
            ResourceRef::CurricularUnit(_) => ResourceKind::CurricularUnit,
            ResourceRef::Course(_) => ResourceKind::Course,
            ResourceRef::WeeklyPlanning(_) => ResourceKind::WeeklyPlanning,
            ResourceRef::ProgrammaticContent(_) => ResourceKind::ProgrammaticContent,
            ResourceRef::Activity(_) => ResourceKind::Activity,
        }
    }

    /// Raw integer id of the referenced resource
    pub fn raw_id(&self) -> u64 {
        match self {
            ResourceRef::Rti(id) => id.0,
            ResourceRef::Campus(id) => id.0,
            ResourceRef::Program(id) => id.0,
            ResourceRef::Term(id) => id.0,
            ResourceRef::CurricularUnit(id) => id.0,
            ResourceRef::Course(id) => id.0,
            ResourceRef::WeeklyPlanning(id) => id.0,
            ResourceRef::ProgrammaticContent(id) => id.0,
            ResourceRef::Activity(id) => id.0,
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind(), self.raw_id())
    }
}

macro_rules! impl_from_id {
    ($($id:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$id> for ResourceRef {
                fn from(id: $id) -> Self {
                    ResourceRef::$variant(id)
                }
            }
        )*
    };
}

impl_from_id!(
    RtiId => Rti,
    CampusId => Campus,
    ProgramId => Program,
    TermId => Term,
    CurricularUnitId => CurricularUnit,
    CourseId => Course,
    WeeklyPlanningId => WeeklyPlanning,
    ProgrammaticContentId => ProgrammaticContent,
    ActivityId => Activity,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matches_kind() {
        for kind in ResourceKind::ALL {
            let r = ResourceRef::new(kind, 42);
            assert_eq!(r.kind(), kind);
            assert_eq!(r.raw_id(), 42);
        }
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>().unwrap(), kind);
        }
        assert!("teacher".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_parent_chain_reaches_program_or_rti() {
        let mut kind = ResourceKind::Activity;
        let mut hops = 0;
        while let Some(parent) = kind.parent_kind() {
            kind = parent;
            hops += 1;
        }
        assert_eq!(kind, ResourceKind::Program);
        assert_eq!(hops, 6);
        assert_eq!(ResourceKind::Campus.parent_kind(), Some(ResourceKind::Rti));
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceRef::from(CourseId(9)).to_string(), "course-9");
    }
}

//! Organization snapshots
//!
//! A TOML document describing the organizational tree, teacher assignments,
//! positions and static tokens. Loading it builds the in-memory stores,
//! rejecting dangling parents, duplicate ids and duplicate RTI or campus
//! names.
//!
//! ```toml
//! [[rtis]]
//! id = 1
//! name = "RTI North"
//!
//! [[campuses]]
//! id = 10
//! name = "Harbor Campus"
//! rti = 1
//!
//! [[programs]]
//! id = 100
//! name = "Software Engineering"
//! campuses = [10]
//!
//! [[positions]]
//! id = 1
//! user = 7
//! role = "TEACHER"
//! scope = { kind = "CAMPUS", id = 10 }
//! ```

use crate::{MemoryOrganizationGraph, MemoryPositionStore, StaticTokenAuthenticator};
use cursus_core::{
    ActivityId, CampusId, CourseId, CurricularUnitId, CursusError, CursusResult, Position,
    PositionId, ProgramId, ProgrammaticContentId, Role, RtiId, Scope, TermId, UserId,
    WeeklyPlanningId,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// RTI entry
#[derive(Debug, Clone, Deserialize)]
pub struct RtiEntry {
    /// Identifier
    pub id: RtiId,
    /// Unique name
    pub name: String,
}

/// Campus entry
#[derive(Debug, Clone, Deserialize)]
pub struct CampusEntry {
    /// Identifier
    pub id: CampusId,
    /// Unique name
    pub name: String,
    /// Owning RTI
    pub rti: RtiId,
}

/// Program entry
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramEntry {
    /// Identifier
    pub id: ProgramId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Campuses offering the program
    pub campuses: Vec<CampusId>,
}

/// Term entry
#[derive(Debug, Clone, Deserialize)]
pub struct TermEntry {
    /// Identifier
    pub id: TermId,
    /// Owning program
    pub program: ProgramId,
    /// Position of the term within the program
    #[serde(default)]
    pub sequence: u32,
}

/// Curricular unit entry
#[derive(Debug, Clone, Deserialize)]
pub struct CurricularUnitEntry {
    /// Identifier
    pub id: CurricularUnitId,
    /// Owning term
    pub term: TermId,
    /// Display name
    #[serde(default)]
    pub name: String,
}

/// Course entry
#[derive(Debug, Clone, Deserialize)]
pub struct CourseEntry {
    /// Identifier
    pub id: CourseId,
    /// Owning curricular unit
    pub curricular_unit: CurricularUnitId,
    /// Directly assigned teachers
    #[serde(default)]
    pub teachers: Vec<UserId>,
}

/// Weekly planning entry
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyPlanningEntry {
    /// Identifier
    pub id: WeeklyPlanningId,
    /// Owning course
    pub course: CourseId,
}

/// Programmatic content entry
#[derive(Debug, Clone, Deserialize)]
pub struct ProgrammaticContentEntry {
    /// Identifier
    pub id: ProgrammaticContentId,
    /// Owning weekly planning
    pub weekly_planning: WeeklyPlanningId,
}

/// Activity entry
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEntry {
    /// Identifier
    pub id: ActivityId,
    /// Owning programmatic content
    pub programmatic_content: ProgrammaticContentId,
}

/// Position entry
#[derive(Debug, Clone, Deserialize)]
pub struct PositionEntry {
    /// Identifier
    pub id: PositionId,
    /// Holder
    pub user: UserId,
    /// Role
    pub role: Role,
    /// Campus or RTI scope
    pub scope: Scope,
}

/// Static bearer token entry
#[derive(Clone, Deserialize)]
pub struct TokenEntry {
    /// Raw bearer token
    pub token: String,
    /// User the token identifies
    pub user: UserId,
}

/// Complete organization snapshot
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrganizationSnapshot {
    /// Regional Technological Institutes
    pub rtis: Vec<RtiEntry>,
    /// Campuses
    pub campuses: Vec<CampusEntry>,
    /// Programs
    pub programs: Vec<ProgramEntry>,
    /// Terms
    pub terms: Vec<TermEntry>,
    /// Curricular units
    pub curricular_units: Vec<CurricularUnitEntry>,
    /// Courses
    pub courses: Vec<CourseEntry>,
    /// Weekly plannings
    pub weekly_plannings: Vec<WeeklyPlanningEntry>,
    /// Programmatic contents
    pub programmatic_contents: Vec<ProgrammaticContentEntry>,
    /// Activities
    pub activities: Vec<ActivityEntry>,
    /// Position grants
    pub positions: Vec<PositionEntry>,
    /// Static bearer tokens
    pub tokens: Vec<TokenEntry>,
}

impl std::fmt::Debug for TokenEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEntry")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Stores built from a snapshot
#[derive(Debug, Default)]
pub struct MemoryStores {
    /// Organizational graph
    pub graph: MemoryOrganizationGraph,
    /// Position grants
    pub positions: MemoryPositionStore,
    /// Token table
    pub authenticator: StaticTokenAuthenticator,
}

impl OrganizationSnapshot {
    /// Parse a snapshot document
    pub fn from_toml_str(content: &str) -> CursusResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a snapshot file
    pub fn load(path: &Path) -> CursusResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CursusError::config(format!("Failed to read snapshot {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Build the in-memory stores, validating the tree as it is assembled
    pub fn into_stores(self) -> CursusResult<MemoryStores> {
        unique_names("RTI", self.rtis.iter().map(|r| r.name.as_str()))?;
        unique_names("campus", self.campuses.iter().map(|c| c.name.as_str()))?;

        let graph = MemoryOrganizationGraph::new();
        for rti in &self.rtis {
            graph.insert_rti(rti.id)?;
        }
        for campus in &self.campuses {
            graph.insert_campus(campus.id, campus.rti)?;
        }
        for program in &self.programs {
            graph.insert_program(program.id, program.campuses.iter().copied())?;
        }
        for term in &self.terms {
            graph.insert_term(term.id, term.program)?;
        }
        for unit in &self.curricular_units {
            graph.insert_curricular_unit(unit.id, unit.term)?;
        }
        for course in &self.courses {
            graph.insert_course(course.id, course.curricular_unit)?;
            for teacher in &course.teachers {
                graph.assign_teacher(course.id, *teacher)?;
            }
        }
        for planning in &self.weekly_plannings {
            graph.insert_weekly_planning(planning.id, planning.course)?;
        }
        for content in &self.programmatic_contents {
            graph.insert_programmatic_content(content.id, content.weekly_planning)?;
        }
        for activity in &self.activities {
            graph.insert_activity(activity.id, activity.programmatic_content)?;
        }

        let positions = MemoryPositionStore::new();
        for entry in &self.positions {
            positions.grant(Position::new(entry.id, entry.user, entry.role, entry.scope))?;
        }

        let mut authenticator = StaticTokenAuthenticator::new();
        for entry in self.tokens {
            authenticator.insert(entry.token, entry.user);
        }

        tracing::info!(
            nodes = graph.len(),
            positions = self.positions.len(),
            "organization snapshot loaded"
        );

        Ok(MemoryStores {
            graph,
            positions,
            authenticator,
        })
    }
}

fn unique_names<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> CursusResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(CursusError::invalid(format!(
                "duplicate {kind} name: {name}"
            )));
        }
    }
    Ok(())
}

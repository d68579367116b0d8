//! Positional grants held by users

use crate::identifiers::{CampusId, PositionId, RtiId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried by a position
///
/// Roles are not consulted by scope access checks; operation-level
/// authorization by role is layered on top by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Organization administrator
    Admin,
    /// Education manager
    EducationManager,
    /// Teacher
    Teacher,
    /// Student
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "ADMIN",
            Role::EducationManager => "EDUCATION_MANAGER",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        };
        f.write_str(name)
    }
}

/// Organizational unit a position applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    /// A single campus and everything beneath it
    Campus(CampusId),
    /// A whole RTI, every campus beneath it included
    Rti(RtiId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Campus(id) => id.fmt(f),
            Scope::Rti(id) => id.fmt(f),
        }
    }
}

/// A role bound to exactly one scope, held by one user
///
/// Fields are private and there are no setters: re-scoping a position means
/// revoking it and granting a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    id: PositionId,
    user: UserId,
    role: Role,
    scope: Scope,
}

impl Position {
    /// Create a position
    pub fn new(id: PositionId, user: UserId, role: Role, scope: Scope) -> Self {
        Self {
            id,
            user,
            role,
            scope,
        }
    }

    /// Position identifier
    pub fn id(&self) -> PositionId {
        self.id
    }

    /// Holder of the position
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Role carried by the position
    pub fn role(&self) -> Role {
        self.role
    }

    /// Scope the position applies to
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

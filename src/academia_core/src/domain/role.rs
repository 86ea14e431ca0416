use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Closed set of roles a signed-in user can hold.
///
/// The backend speaks several vocabularies (English and Spanish, upper and lower case);
/// everything is normalized into this enum at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown role tag: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Lowest-privilege role, used when the backend sends a tag we cannot map.
    pub const LOWEST: Role = Role::Student;

    pub const ALL: [Role; 3] = [Role::Admin, Role::Instructor, Role::Student];

    /// Strictly match a backend tag against the known vocabularies.
    pub fn parse_tag(tag: &str) -> Result<Role, UnknownRole> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "admin" | "administrator" | "administrador" | "role_admin" => Ok(Role::Admin),
            "instructor" | "profesor" | "teacher" | "role_profesor" => Ok(Role::Instructor),
            "student" | "estudiante" | "role_estudiante" => Ok(Role::Student),
            _ => Err(UnknownRole(tag.to_string())),
        }
    }

    /// Map a backend tag into the domain, defaulting to [`Role::LOWEST`].
    ///
    /// The fallback is logged so that drift in the backend vocabulary shows up in traces
    /// instead of silently downgrading users.
    pub fn from_backend(tag: &str) -> Role {
        Self::parse_tag(tag).unwrap_or_else(|UnknownRole(tag)| {
            tracing::warn!(
                role_tag = %tag,
                fallback = %Role::LOWEST,
                "Unmapped backend role tag"
            );
            Role::LOWEST
        })
    }

    /// Tag the backend expects when a role is sent to it.
    pub fn backend_tag(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Instructor => "PROFESOR",
            Role::Student => "ESTUDIANTE",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse_tag(s)
    }
}

// Lenient on the way in: persisted and backend payloads both go through the vocabulary map.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Role::from_backend(&tag))
    }
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::role::Role;

/// Identifier of a user as the backend knows it.
///
/// Backends hand out both numeric and string ids, so it is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id for identities the client has to build itself.
    pub fn synthesized() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => UserId(text),
            RawId::Number(number) => UserId(number.to_string()),
        })
    }
}

/// The authenticated principal.
///
/// Field aliases cover the backend's Spanish user payload; serialization always uses the
/// canonical names so the persisted copy is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(alias = "id_usuario", alias = "userId")]
    id: UserId,
    #[serde(default, alias = "nombre")]
    name: String,
    #[serde(alias = "correo", alias = "username")]
    email: String,
    #[serde(alias = "rol")]
    role: Role,
    #[serde(
        default = "Utc::now",
        alias = "fecha_registro",
        alias = "createdAt",
        alias = "joinedAt"
    )]
    joined_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            joined_at,
        }
    }

    /// Build an identity for a backend that only confirmed the login identifier and a role.
    pub fn synthesize(identifier: &str, role: Role) -> Self {
        let name = identifier
            .split_once('@')
            .map(|(local, _)| local)
            .unwrap_or(identifier);

        Self::new(UserId::synthesized(), name, identifier, role, Utc::now())
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_spanish_backend_payload() {
        let identity: Identity = serde_json::from_value(serde_json::json!({
            "id_usuario": 42,
            "nombre": "Ana",
            "correo": "ana@example.com",
            "rol": "PROFESOR",
            "fecha_registro": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(identity.id().as_str(), "42");
        assert_eq!(identity.name(), "Ana");
        assert_eq!(identity.email(), "ana@example.com");
        assert_eq!(identity.role(), Role::Instructor);
        assert_eq!(identity.joined_at().to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn persisted_form_round_trips() {
        let identity = Identity::new(
            UserId::new("u-1"),
            "Bo",
            "bo@example.com",
            Role::Admin,
            Utc::now(),
        );

        let json = serde_json::to_string(&identity).unwrap();
        assert!(json.contains("\"role\":\"admin\""));

        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }

    #[test]
    fn synthesized_identity_uses_identifier() {
        let identity = Identity::synthesize("carla@example.com", Role::Student);

        assert_eq!(identity.email(), "carla@example.com");
        assert_eq!(identity.name(), "carla");
        assert!(!identity.id().as_str().is_empty());
    }

    #[test]
    fn synthesized_identity_accepts_plain_usernames() {
        let identity = Identity::synthesize("dmitri", Role::Admin);
        assert_eq!(identity.name(), "dmitri");
    }
}

use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use super::role::Role;

/// What the user typed into the login form.
#[derive(Debug, Clone)]
pub struct Credentials {
    identifier: String,
    secret: Secret<String>,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: Secret<String>) -> Self {
        Self {
            identifier: identifier.into().trim().to_string(),
            secret,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &Secret<String> {
        &self.secret
    }

    /// Body of `POST /auth/login`.
    pub fn login_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.identifier,
            "password": self.secret.expose_secret(),
        })
    }
}

/// Data collected by the registration form.
#[derive(Debug, Clone)]
pub struct RegistrationProfile {
    name: String,
    email: String,
    secret: Secret<String>,
    role: Role,
}

#[derive(Serialize)]
struct RegisterPayload<'a> {
    username: &'a str,
    password: &'a str,
    role: &'a str,
}

impl RegistrationProfile {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        secret: Secret<String>,
        role: Option<Role>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            secret,
            role: role.unwrap_or(Role::LOWEST),
        }
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

    /// Credentials for the follow-up login once the account exists.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.secret.clone())
    }

    /// Body of `POST /auth/register`. The email doubles as the username.
    pub fn register_payload(&self) -> serde_json::Value {
        let payload = RegisterPayload {
            username: &self.email,
            password: self.secret.expose_secret(),
            role: self.role.backend_tag(),
        };
        serde_json::json!(payload)
    }
}

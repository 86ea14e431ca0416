use chrono::{DateTime, Utc};
use http::HeaderValue;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::{
        identity::{Identity, UserId},
        role::Role,
        session::Session,
        token::BearerToken,
    },
    error::ContractError,
};

/// Authentication payload returned by the login endpoint, in one of the shapes the backend has
/// been observed to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEnvelope {
    /// `{ "user": {...}, "token": "..." }`
    Full { identity: Identity, token: BearerToken },
    /// `{ "token": "...", "role": "..." }`; the identity has to be synthesized client-side.
    Minimal { token: BearerToken, role: Role },
}

#[derive(Deserialize)]
struct FullShape {
    user: Value,
    #[serde(alias = "accessToken")]
    token: String,
}

#[derive(Deserialize)]
struct MinimalShape {
    #[serde(alias = "accessToken")]
    token: String,
    #[serde(alias = "rol")]
    role: String,
}

/// Blank tokens mean "no token"; tokens that cannot travel in an `Authorization` header are
/// rejected outright.
fn issued_token(raw: &str) -> Result<Option<BearerToken>, ContractError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let token = BearerToken::new(raw);
    HeaderValue::from_str(&token.authorization_value())
        .map_err(|_| ContractError::InvalidToken)?;
    Ok(Some(token))
}

/// Whether the body carries a non-blank token under any of its known names.
fn carries_token(value: &Value) -> bool {
    ["token", "accessToken"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .any(|token| !token.trim().is_empty())
}

impl AuthEnvelope {
    pub fn decode(body: &str) -> Result<Self, ContractError> {
        let value: Value = serde_json::from_str(body).map_err(|_| ContractError::NotJson)?;
        Self::decode_value(&value)
    }

    /// Try the known shapes in priority order and fail closed when none fits.
    ///
    /// A `user` that does not decode only rules out the full shape; the minimal shape is still
    /// tried before the user is reported as malformed.
    pub fn decode_value(value: &Value) -> Result<Self, ContractError> {
        let mut malformed_user = None;

        if let Ok(full) = FullShape::deserialize(value)
            && let Some(token) = issued_token(&full.token)?
        {
            match serde_json::from_value::<Identity>(full.user) {
                Ok(identity) => return Ok(AuthEnvelope::Full { identity, token }),
                Err(e) => malformed_user = Some(e.to_string()),
            }
        }

        if let Ok(minimal) = MinimalShape::deserialize(value)
            && let Some(token) = issued_token(&minimal.token)?
        {
            return Ok(AuthEnvelope::Minimal {
                token,
                role: Role::from_backend(&minimal.role),
            });
        }

        Err(malformed_user.map_or(ContractError::UnknownShape, ContractError::MalformedUser))
    }

    /// Turn the envelope into a session; `identifier` is what the user logged in with.
    pub fn into_session(self, identifier: &str) -> Session {
        match self {
            AuthEnvelope::Full { identity, token } => Session::new(identity, token),
            AuthEnvelope::Minimal { token, role } => {
                Session::new(Identity::synthesize(identifier, role), token)
            }
        }
    }
}

/// What the registration endpoint told us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationReply {
    /// The backend signed the user in straight away.
    SignedIn(AuthEnvelope),
    /// The account exists; a separate login is needed.
    Acknowledged {
        id: Option<UserId>,
        message: Option<String>,
        joined_at: Option<DateTime<Utc>>,
    },
}

#[derive(Deserialize, Default)]
struct AcknowledgementShape {
    #[serde(default, alias = "userId", alias = "id_usuario")]
    id: Option<UserId>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "createdAt", alias = "fecha_registro")]
    joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    user: Option<Value>,
}

impl RegistrationReply {
    /// Decode a 2xx registration body. An empty body is a plain acknowledgement.
    pub fn decode(body: &str) -> Result<Self, ContractError> {
        if body.trim().is_empty() {
            return Ok(RegistrationReply::Acknowledged {
                id: None,
                message: None,
                joined_at: None,
            });
        }

        let value: Value = serde_json::from_str(body).map_err(|_| ContractError::NotJson)?;

        match &value {
            Value::Object(_) => {}
            Value::String(message) => {
                return Ok(RegistrationReply::Acknowledged {
                    id: None,
                    message: Some(message.clone()),
                    joined_at: None,
                });
            }
            _ => return Err(ContractError::UnknownShape),
        }

        match AuthEnvelope::decode_value(&value) {
            Ok(envelope) => return Ok(RegistrationReply::SignedIn(envelope)),
            // An issued token must never be dropped by reading the body as an acknowledgement.
            Err(e) if carries_token(&value) => return Err(e),
            Err(_) => {}
        }

        let ack = AcknowledgementShape::deserialize(&value)
            .map_err(|e| ContractError::MalformedUser(e.to_string()))?;

        // `{ "user": {...}, "token": null }` still tells us the id the backend assigned.
        let id = ack.id.or_else(|| {
            ack.user
                .as_ref()
                .and_then(|user| user.get("id").or_else(|| user.get("id_usuario")))
                .and_then(|id| UserId::deserialize(id).ok())
        });

        Ok(RegistrationReply::Acknowledged {
            id,
            message: ack.message,
            joined_at: ack.joined_at,
        })
    }
}

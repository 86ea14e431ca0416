use super::{identity::Identity, role::Role, token::BearerToken};

/// An identity paired with the bearer token that proves it.
///
/// A `Session` value always has both halves, so holding one means the user is authenticated;
/// absence is modelled as `Option<Session>` by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    identity: Identity,
    token: BearerToken,
}

impl Session {
    pub fn new(identity: Identity, token: BearerToken) -> Self {
        Self { identity, token }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    pub fn role(&self) -> Role {
        self.identity.role()
    }

    /// Same token, new profile data. Used when the profile is refreshed.
    pub fn with_identity(&self, identity: Identity) -> Self {
        Self {
            identity,
            token: self.token.clone(),
        }
    }

    pub fn into_parts(self) -> (Identity, BearerToken) {
        (self.identity, self.token)
    }
}

use academia_core::{
    ApiClient, ApiRequest, AuthEnvelope, AuthError, ContractError, DurableStorage, Identity,
    Navigator, RegistrationProfile, RegistrationReply, Session, UserId,
};
use chrono::Utc;

use super::failure::{credential_failure, storage_failure};
use crate::{endpoints::REGISTER_ENDPOINT, session_store::SessionStore};

pub const REGISTERED_MESSAGE: &str = "Registration successful";

/// Response from the register use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The backend issued a token right away and the session is active.
    Authenticated(Session),
    /// The account exists but nobody is signed in yet; follow up with a login.
    Registered { identity: Identity, message: String },
    /// The backend accepted the registration but its body could not be understood.
    /// The identity is rebuilt from the submitted profile.
    Degraded {
        identity: Identity,
        warning: AuthError,
    },
}

impl RegistrationOutcome {
    pub fn identity(&self) -> &Identity {
        match self {
            RegistrationOutcome::Authenticated(session) => session.identity(),
            RegistrationOutcome::Registered { identity, .. }
            | RegistrationOutcome::Degraded { identity, .. } => identity,
        }
    }

    pub fn needs_login(&self) -> bool {
        !matches!(self, RegistrationOutcome::Authenticated(_))
    }
}

/// Register use case - creates an account and, when the backend allows it, a session
pub struct RegisterUseCase<'a, A, S, N> {
    api: &'a A,
    store: &'a SessionStore<S, N>,
}

impl<'a, A, S, N> RegisterUseCase<'a, A, S, N>
where
    A: ApiClient,
    S: DurableStorage,
    N: Navigator,
{
    pub fn new(api: &'a A, store: &'a SessionStore<S, N>) -> Self {
        Self { api, store }
    }

    /// Execute the register use case
    ///
    /// Non-2xx responses are always errors, whatever their body says.
    #[tracing::instrument(
        name = "RegisterUseCase::execute",
        skip(self, profile),
        fields(email = %profile.email(), role = %profile.role())
    )]
    pub async fn execute(
        &self,
        profile: &RegistrationProfile,
    ) -> Result<RegistrationOutcome, AuthError> {
        let request = ApiRequest::post(REGISTER_ENDPOINT, profile.register_payload());
        let response = self.api.send(request).await.map_err(credential_failure)?;

        match RegistrationReply::decode(response.body()) {
            Ok(RegistrationReply::SignedIn(envelope)) => {
                let (identity, token) = match envelope {
                    AuthEnvelope::Full { identity, token } => (identity, token),
                    AuthEnvelope::Minimal { token, role } => {
                        let identity = Identity::new(
                            UserId::synthesized(),
                            profile.name(),
                            profile.email(),
                            role,
                            Utc::now(),
                        );
                        (identity, token)
                    }
                };

                let session = self.store.set(identity, token).map_err(storage_failure)?;
                Ok(RegistrationOutcome::Authenticated(session))
            }
            Ok(RegistrationReply::Acknowledged {
                id,
                message,
                joined_at,
            }) => {
                let identity = Identity::new(
                    id.unwrap_or_else(UserId::synthesized),
                    profile.name(),
                    profile.email(),
                    profile.role(),
                    joined_at.unwrap_or_else(Utc::now),
                );
                Ok(RegistrationOutcome::Registered {
                    identity,
                    message: message.unwrap_or_else(|| REGISTERED_MESSAGE.to_string()),
                })
            }
            Err(contract_error) => Ok(self.degraded(profile, contract_error)),
        }
    }

    fn degraded(
        &self,
        profile: &RegistrationProfile,
        contract_error: ContractError,
    ) -> RegistrationOutcome {
        tracing::warn!(
            error = %contract_error,
            "Registration accepted with an unreadable response body"
        );

        RegistrationOutcome::Degraded {
            identity: Identity::new(
                UserId::synthesized(),
                profile.name(),
                profile.email(),
                profile.role(),
                Utc::now(),
            ),
            warning: AuthError::from(contract_error),
        }
    }
}

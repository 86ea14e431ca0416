use std::sync::Arc;

use academia_core::{
    ApiClient, AuthError, Credentials, DurableStorage, Navigator, RegistrationProfile, Session,
    StorageError,
};

use crate::{
    session_store::SessionStore,
    use_cases::{
        LoginUseCase, LogoutUseCase, RefreshProfileUseCase, RegisterUseCase, RegistrationOutcome,
    },
};

/// Entry point for everything that turns credentials into a session and back.
pub struct CredentialExchangeClient<A, S, N> {
    api: Arc<A>,
    store: Arc<SessionStore<S, N>>,
}

impl<A, S, N> Clone for CredentialExchangeClient<A, S, N> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            store: Arc::clone(&self.store),
        }
    }
}

impl<A, S, N> CredentialExchangeClient<A, S, N>
where
    A: ApiClient,
    S: DurableStorage,
    N: Navigator,
{
    pub fn new(api: Arc<A>, store: Arc<SessionStore<S, N>>) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &Arc<SessionStore<S, N>> {
        &self.store
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        LoginUseCase::new(self.api.as_ref(), self.store.as_ref())
            .execute(credentials)
            .await
    }

    pub async fn register(
        &self,
        profile: &RegistrationProfile,
    ) -> Result<RegistrationOutcome, AuthError> {
        RegisterUseCase::new(self.api.as_ref(), self.store.as_ref())
            .execute(profile)
            .await
    }

    /// Register, then log in with the same credentials if the backend did not sign the user in.
    pub async fn register_and_login(
        &self,
        profile: &RegistrationProfile,
    ) -> Result<Session, AuthError> {
        match self.register(profile).await? {
            RegistrationOutcome::Authenticated(session) => Ok(session),
            _ => self.login(&profile.credentials()).await,
        }
    }

    pub async fn refresh_profile(&self) -> Result<Session, AuthError> {
        RefreshProfileUseCase::new(self.api.as_ref(), self.store.as_ref())
            .execute()
            .await
    }

    pub fn logout(&self) -> Result<(), StorageError> {
        LogoutUseCase::new(self.store.as_ref()).execute()
    }
}

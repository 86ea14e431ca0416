use academia_core::{
    ApiClient, ApiRequest, AuthEnvelope, AuthError, Credentials, DurableStorage, Navigator, Session,
};

use super::failure::{credential_failure, storage_failure};
use crate::{endpoints::LOGIN_ENDPOINT, session_store::SessionStore};

/// Login use case - exchanges credentials for a session
pub struct LoginUseCase<'a, A, S, N> {
    api: &'a A,
    store: &'a SessionStore<S, N>,
}

impl<'a, A, S, N> LoginUseCase<'a, A, S, N>
where
    A: ApiClient,
    S: DurableStorage,
    N: Navigator,
{
    pub fn new(api: &'a A, store: &'a SessionStore<S, N>) -> Self {
        Self { api, store }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `credentials` - Identifier and secret typed by the user
    ///
    /// # Returns
    /// The established session. On any failure the store is left as it was.
    #[tracing::instrument(
        name = "LoginUseCase::execute",
        skip(self, credentials),
        fields(identifier = %credentials.identifier())
    )]
    pub async fn execute(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let request = ApiRequest::post(LOGIN_ENDPOINT, credentials.login_payload());
        let response = self.api.send(request).await.map_err(credential_failure)?;

        let envelope = AuthEnvelope::decode(response.body()).map_err(|e| {
            tracing::warn!(error = %e, "Login response matched no known envelope");
            AuthError::from(e)
        })?;

        let (identity, token) = envelope
            .into_session(credentials.identifier())
            .into_parts();

        self.store.set(identity, token).map_err(storage_failure)
    }
}

use academia_core::{
    ApiClient, ApiRequest, AuthError, ContractError, DurableStorage, Identity, Navigator, Session,
};
use serde::Deserialize;

use super::failure::{session_failure, storage_failure};
use crate::{endpoints::PROFILE_ENDPOINT, session_store::SessionStore};

/// The profile endpoint answers either with the user itself or wrapped in `{ "user": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileBody {
    Wrapped { user: Identity },
    Bare(Identity),
}

/// Refresh profile use case - re-reads the signed-in user from the backend
pub struct RefreshProfileUseCase<'a, A, S, N> {
    api: &'a A,
    store: &'a SessionStore<S, N>,
}

impl<'a, A, S, N> RefreshProfileUseCase<'a, A, S, N>
where
    A: ApiClient,
    S: DurableStorage,
    N: Navigator,
{
    pub fn new(api: &'a A, store: &'a SessionStore<S, N>) -> Self {
        Self { api, store }
    }

    /// Execute the refresh use case
    ///
    /// Fails with `Unauthorized` without calling the backend when nobody is signed in.
    #[tracing::instrument(name = "RefreshProfileUseCase::execute", skip(self))]
    pub async fn execute(&self) -> Result<Session, AuthError> {
        if !self.store.is_authenticated() {
            return Err(AuthError::Unauthorized);
        }

        let response = self
            .api
            .send(ApiRequest::get(PROFILE_ENDPOINT))
            .await
            .map_err(session_failure)?;

        let identity = match response.json::<ProfileBody>() {
            Ok(ProfileBody::Wrapped { user }) | Ok(ProfileBody::Bare(user)) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Profile response is not a user payload");
                return Err(ContractError::MalformedUser(e.to_string()).into());
            }
        };

        // The session may have been torn down while the request was in flight.
        self.store
            .replace_identity(identity)
            .map_err(storage_failure)?
            .ok_or(AuthError::Unauthorized)
    }
}

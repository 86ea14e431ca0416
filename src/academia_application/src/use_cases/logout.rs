use academia_core::{DurableStorage, Navigator, StorageError};

use crate::session_store::SessionStore;

/// Logout use case - ends the session on this client
///
/// The backend keeps no session state for bearer tokens, so nothing is sent to it.
pub struct LogoutUseCase<'a, S, N> {
    store: &'a SessionStore<S, N>,
}

impl<'a, S, N> LogoutUseCase<'a, S, N>
where
    S: DurableStorage,
    N: Navigator,
{
    pub fn new(store: &'a SessionStore<S, N>) -> Self {
        Self { store }
    }

    /// Execute the logout use case
    ///
    /// # Returns
    /// Ok(()) on success. The in-memory session is gone even when an error is returned.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self))]
    pub fn execute(&self) -> Result<(), StorageError> {
        self.store.clear()
    }
}

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use academia_core::{
    BearerToken, CURRENT_USER_KEY, DurableStorage, Identity, LOGIN_VIEW, Navigator, Role, Session,
    StorageError, StorageWrite, TOKEN_KEY,
};
use arc_swap::ArcSwapOption;
use secrecy::ExposeSecret;
use tokio::sync::mpsc;

/// Value pushed to observers: the current identity, or `None` when signed out.
pub type SessionUpdate = Option<Identity>;

#[derive(Default)]
struct Observers {
    next_id: u64,
    senders: Vec<(u64, mpsc::UnboundedSender<SessionUpdate>)>,
}

impl Observers {
    fn register(&mut self, sender: mpsc::UnboundedSender<SessionUpdate>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.senders.push((id, sender));
        id
    }

    fn publish(&mut self, update: &SessionUpdate) {
        // A failed send means the subscription was dropped without unregistering.
        self.senders
            .retain(|(_, sender)| sender.send(update.clone()).is_ok());
    }
}

fn lock(observers: &Mutex<Observers>) -> MutexGuard<'_, Observers> {
    observers.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Live feed of session changes.
///
/// The first value is the state at subscription time; every later write follows in order.
/// Dropping the subscription unregisters it.
pub struct Subscription {
    id: u64,
    receiver: mpsc::UnboundedReceiver<SessionUpdate>,
    observers: Weak<Mutex<Observers>>,
}

impl Subscription {
    /// Wait for the next value. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<SessionUpdate> {
        self.receiver.recv().await
    }

    /// Take the next value if one is already queued.
    pub fn try_next(&mut self) -> Option<SessionUpdate> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade() {
            lock(&observers).senders.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Single source of truth for who is signed in.
///
/// Reads are lock-free. Writes are serialized: durable storage is updated first, and only when
/// that succeeds does the in-memory session change and observers hear about it, so readers never
/// see memory and storage disagree.
pub struct SessionStore<S, N> {
    storage: S,
    navigator: N,
    login_view: String,
    current: ArcSwapOption<Session>,
    observers: Arc<Mutex<Observers>>,
}

impl<S, N> SessionStore<S, N>
where
    S: DurableStorage,
    N: Navigator,
{
    /// Build the store and resume any session persisted by a previous run.
    ///
    /// Missing, partial or unreadable entries mean "no session"; they are purged so storage
    /// matches memory.
    pub fn hydrate(storage: S, navigator: N) -> Self {
        let restored = match read_persisted(&storage) {
            Ok(session) => session,
            Err(reason) => {
                tracing::warn!(%reason, "Discarding persisted session");
                if let Err(e) = storage.apply(&[
                    StorageWrite::Remove(CURRENT_USER_KEY),
                    StorageWrite::Remove(TOKEN_KEY),
                ]) {
                    tracing::warn!(error = %e, "Failed to purge persisted session");
                }
                None
            }
        };

        if let Some(session) = &restored {
            tracing::info!(user_id = %session.identity().id(), "Resumed persisted session");
        }

        Self {
            storage,
            navigator,
            login_view: LOGIN_VIEW.to_string(),
            current: ArcSwapOption::new(restored.map(Arc::new)),
            observers: Arc::new(Mutex::new(Observers::default())),
        }
    }

    pub fn with_login_view(mut self, login_view: impl Into<String>) -> Self {
        self.login_view = login_view.into();
        self
    }

    /// Current identity, if any.
    pub fn current(&self) -> Option<Identity> {
        self.current
            .load_full()
            .map(|session| session.identity().clone())
    }

    pub fn session(&self) -> Option<Arc<Session>> {
        self.current.load_full()
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.current
            .load_full()
            .map(|session| session.token().clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.load().is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.current
            .load_full()
            .is_some_and(|session| session.role() == role)
    }

    /// Subscribe to session changes, starting with the present value.
    pub fn observe(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut observers = lock(&self.observers);

        // Seeded under the writer lock so no write can slip in between.
        let _ = sender.send(self.current());
        let id = observers.register(sender);

        Subscription {
            id,
            receiver,
            observers: Arc::downgrade(&self.observers),
        }
    }

    /// Replace the current session, persist it and notify observers before returning.
    pub fn set(&self, identity: Identity, token: BearerToken) -> Result<Session, StorageError> {
        let session = Session::new(identity, token);
        self.write(session.clone())?;
        tracing::info!(
            user_id = %session.identity().id(),
            role = %session.role(),
            "Session established"
        );
        Ok(session)
    }

    /// Swap in fresh profile data while keeping the token.
    ///
    /// Does nothing and returns `None` when nobody is signed in.
    pub fn replace_identity(&self, identity: Identity) -> Result<Option<Session>, StorageError> {
        let mut observers = lock(&self.observers);

        let Some(current) = self.current.load_full() else {
            return Ok(None);
        };

        let session = current.with_identity(identity);
        self.persist(&session)?;
        self.current.store(Some(Arc::new(session.clone())));
        observers.publish(&Some(session.identity().clone()));

        Ok(Some(session))
    }

    /// Drop the session, wipe durable storage, notify observers and send the user to login.
    ///
    /// Memory is cleared even when storage cannot be wiped; the storage error is still returned.
    pub fn clear(&self) -> Result<(), StorageError> {
        let result = {
            let mut observers = lock(&self.observers);

            let result = self.storage.apply(&[
                StorageWrite::Remove(CURRENT_USER_KEY),
                StorageWrite::Remove(TOKEN_KEY),
            ]);
            self.current.store(None);
            observers.publish(&None);
            result
        };

        if let Err(e) = &result {
            tracing::error!(error = %e, "Failed to wipe persisted session");
        }
        tracing::info!("Session cleared");

        // Outside the lock: navigators may subscribe.
        self.navigator.navigate(&self.login_view);

        result
    }

    fn write(&self, session: Session) -> Result<(), StorageError> {
        let mut observers = lock(&self.observers);

        self.persist(&session)?;
        let identity = session.identity().clone();
        self.current.store(Some(Arc::new(session)));
        observers.publish(&Some(identity));

        Ok(())
    }

    fn persist(&self, session: &Session) -> Result<(), StorageError> {
        let identity = serde_json::to_string(session.identity())
            .map_err(|e| StorageError::UnexpectedError(e.to_string()))?;
        let token = session.token().as_ref().expose_secret();

        self.storage.apply(&[
            StorageWrite::Set(CURRENT_USER_KEY, &identity),
            StorageWrite::Set(TOKEN_KEY, token),
        ])
    }
}

fn read_persisted<S: DurableStorage>(storage: &S) -> Result<Option<Session>, String> {
    let identity = storage.get(CURRENT_USER_KEY).map_err(|e| e.to_string())?;
    let token = storage.get(TOKEN_KEY).map_err(|e| e.to_string())?;

    match (identity, token) {
        (None, None) => Ok(None),
        (Some(identity), Some(token)) if !token.trim().is_empty() => {
            let identity: Identity = serde_json::from_str(&identity)
                .map_err(|e| format!("unreadable identity: {e}"))?;
            Ok(Some(Session::new(identity, BearerToken::new(token))))
        }
        _ => Err("identity and token are not both present".to_string()),
    }
}

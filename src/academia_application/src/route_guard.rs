use std::sync::Arc;

use academia_core::{
    Admission, AdmissionPolicy, DurableStorage, NavigationIntent, Navigator, RouteTable,
};

use crate::session_store::SessionStore;

/// Decides, once per navigation attempt, whether a view may be entered.
///
/// The decision itself is [`AdmissionPolicy::evaluate`]; this type feeds it the session as it
/// stands when the check starts and carries out the redirect on denial.
pub struct RouteGuard<S, N, G> {
    store: Arc<SessionStore<S, N>>,
    policy: AdmissionPolicy,
    routes: RouteTable,
    navigator: G,
}

impl<S, N, G> RouteGuard<S, N, G>
where
    S: DurableStorage,
    N: Navigator,
    G: Navigator,
{
    pub fn new(store: Arc<SessionStore<S, N>>, navigator: G) -> Self {
        Self {
            store,
            policy: AdmissionPolicy::default(),
            routes: RouteTable::default(),
            navigator,
        }
    }

    pub fn with_policy(mut self, policy: AdmissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn policy(&self) -> &AdmissionPolicy {
        &self.policy
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Check entry into `intent`, redirecting when it is refused.
    #[tracing::instrument(name = "RouteGuard::can_activate", skip(self), fields(path = intent.path()))]
    pub fn can_activate(&self, intent: &NavigationIntent) -> Admission {
        // Only the value present at subscription time matters; later changes are ignored.
        let identity = self.store.observe().try_next().flatten();
        let admission = self.policy.evaluate(identity.as_ref(), intent);

        if let Admission::Deny { redirect_to } = &admission {
            tracing::info!(redirect_to = %redirect_to, "Navigation denied");
            self.navigator.navigate(redirect_to);
        }

        admission
    }

    /// Resolve `path` against the route table, then check it.
    pub fn can_activate_path(&self, path: &str) -> Admission {
        let intent = self.routes.intent_for(path);
        self.can_activate(&intent)
    }

    /// Gate for fetching a lazily loaded feature group.
    ///
    /// Never fails: a refusal redirects exactly like [`Self::can_activate`] and reports `false`.
    pub fn can_load(&self, intent: &NavigationIntent) -> bool {
        self.can_activate(intent).is_allowed()
    }
}

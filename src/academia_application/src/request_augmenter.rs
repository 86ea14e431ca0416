use std::sync::Arc;

use academia_core::{
    ApiClient, ApiError, ApiRequest, ApiResponse, DurableStorage, FailureClass, HttpTransport,
    Navigator, Notification, NotificationSink, TransportError,
};
use async_trait::async_trait;
use http::{
    HeaderValue,
    header::{AUTHORIZATION, CONTENT_TYPE},
};

use crate::{
    endpoints::{LOGIN_ENDPOINT, REGISTER_ENDPOINT},
    session_store::SessionStore,
};

pub mod messages {
    pub const SESSION_EXPIRED_TITLE: &str = "Session expired";
    pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
    pub const ACCESS_DENIED_TITLE: &str = "Access denied";
    pub const ACCESS_DENIED: &str = "You do not have permission to perform this action.";
    pub const SERVER_ERROR_TITLE: &str = "Server error";
    pub const SERVER_ERROR: &str = "An internal error occurred. Please try again.";
    pub const CONNECTION_ERROR_TITLE: &str = "Connection error";
    pub const CONNECTION_ERROR: &str =
        "Could not reach the server. Check your internet connection.";
}

/// Wraps every outbound API call: attaches the bearer token on the way out and runs the
/// session-level side effects of a failure on the way back.
///
/// Failures are always handed back to the caller unchanged after the side effects ran.
pub struct RequestAugmenter<T, S, N, M> {
    transport: T,
    store: Arc<SessionStore<S, N>>,
    notifications: M,
    credential_endpoints: Vec<String>,
}

impl<T, S, N, M> RequestAugmenter<T, S, N, M>
where
    T: HttpTransport,
    S: DurableStorage,
    N: Navigator,
    M: NotificationSink,
{
    pub fn new(transport: T, store: Arc<SessionStore<S, N>>, notifications: M) -> Self {
        Self {
            transport,
            store,
            notifications,
            credential_endpoints: vec![LOGIN_ENDPOINT.to_string(), REGISTER_ENDPOINT.to_string()],
        }
    }

    pub fn store(&self) -> &Arc<SessionStore<S, N>> {
        &self.store
    }

    /// Credential endpoints never carry a token, and a 401 from them is a rejected login rather
    /// than an expired session.
    fn is_credential_endpoint(&self, path: &str) -> bool {
        self.credential_endpoints
            .iter()
            .any(|endpoint| path.contains(endpoint.as_str()))
    }

    fn prepare(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        if self.is_credential_endpoint(request.path()) {
            return Ok(());
        }

        let Some(token) = self.store.token() else {
            return Ok(());
        };

        let authorization = HeaderValue::from_str(&token.authorization_value())
            .map_err(|_| ApiError::InvalidRequest("token is not a valid header value".into()))?;

        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(())
    }

    fn handle_failure(&self, error: &ApiError, credential_endpoint: bool) {
        use messages::*;

        let notification = match error.class() {
            FailureClass::Unauthorized if credential_endpoint => None,
            FailureClass::Unauthorized => {
                tracing::info!("Backend rejected the session token");
                if let Err(e) = self.store.clear() {
                    tracing::error!(error = %e, "Session teardown incomplete");
                }
                Some(Notification::error(SESSION_EXPIRED_TITLE, SESSION_EXPIRED))
            }
            FailureClass::Forbidden => Some(Notification::error(ACCESS_DENIED_TITLE, ACCESS_DENIED)),
            FailureClass::ServerError => Some(Notification::error(SERVER_ERROR_TITLE, SERVER_ERROR)),
            FailureClass::NetworkError => {
                Some(Notification::error(CONNECTION_ERROR_TITLE, CONNECTION_ERROR))
            }
            FailureClass::Other => None,
        };

        if let Some(notification) = notification {
            self.notifications.notify(notification);
        }
    }
}

#[async_trait]
impl<T, S, N, M> ApiClient for RequestAugmenter<T, S, N, M>
where
    T: HttpTransport,
    S: DurableStorage,
    N: Navigator,
    M: NotificationSink,
{
    #[tracing::instrument(
        name = "RequestAugmenter::send",
        skip_all,
        fields(method = %request.method(), path = %request.path())
    )]
    async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let credential_endpoint = self.is_credential_endpoint(request.path());

        if let Err(error) = self.prepare(&mut request) {
            self.handle_failure(&error, credential_endpoint);
            return Err(error);
        }

        let error = match self.transport.send(request).await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => ApiError::Status {
                status: response.status(),
                body: response.body().to_string(),
            },
            Err(TransportError::Unreachable(reason)) => ApiError::Network(reason),
            Err(TransportError::InvalidRequest(reason)) => ApiError::InvalidRequest(reason),
        };

        tracing::debug!(error = %error, class = ?error.class(), "Outbound call failed");
        self.handle_failure(&error, credential_endpoint);

        Err(error)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use academia_core::{BearerToken, Role};
    use http::StatusCode;

    use super::*;
    use crate::session_store::tests::{MockNavigator, MockStorage, identity};

    /// Records the requests it sees and answers with a scripted result.
    #[derive(Clone)]
    pub(crate) struct ScriptedTransport {
        pub(crate) seen: Arc<Mutex<Vec<ApiRequest>>>,
        pub(crate) reply: Arc<Mutex<Result<ApiResponse, TransportError>>>,
    }

    impl ScriptedTransport {
        pub(crate) fn replying(status: u16, body: &str) -> Self {
            Self {
                seen: Arc::default(),
                reply: Arc::new(Mutex::new(Ok(ApiResponse::new(
                    StatusCode::from_u16(status).unwrap(),
                    body,
                )))),
            }
        }

        pub(crate) fn unreachable() -> Self {
            Self {
                seen: Arc::default(),
                reply: Arc::new(Mutex::new(Err(TransportError::Unreachable(
                    "connection refused".to_string(),
                )))),
            }
        }

        pub(crate) fn last_request(&self) -> ApiRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            self.reply.lock().unwrap().clone()
        }
    }

    #[derive(Clone, Default)]
    pub(crate) struct MockNotifications {
        pub(crate) received: Arc<Mutex<Vec<Notification>>>,
    }

    impl MockNotifications {
        pub(crate) fn titles(&self) -> Vec<String> {
            self.received
                .lock()
                .unwrap()
                .iter()
                .map(|n| n.title.clone())
                .collect()
        }
    }

    impl NotificationSink for MockNotifications {
        fn notify(&self, notification: Notification) {
            self.received.lock().unwrap().push(notification);
        }
    }

    type TestAugmenter =
        RequestAugmenter<ScriptedTransport, MockStorage, MockNavigator, MockNotifications>;

    fn augmenter(
        transport: ScriptedTransport,
        signed_in: bool,
    ) -> (TestAugmenter, MockNotifications, MockNavigator) {
        let navigator = MockNavigator::default();
        let store = Arc::new(SessionStore::hydrate(
            MockStorage::default(),
            navigator.clone(),
        ));
        if signed_in {
            store
                .set(identity("ana", Role::Student), BearerToken::new("abc"))
                .unwrap();
        }
        let notifications = MockNotifications::default();
        (
            RequestAugmenter::new(transport, store, notifications.clone()),
            notifications,
            navigator,
        )
    }

    #[tokio::test]
    async fn attaches_token_and_json_content_type() {
        let transport = ScriptedTransport::replying(200, "[]");
        let (augmenter, _, _) = augmenter(transport.clone(), true);

        augmenter.send(ApiRequest::get("/cursos")).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer abc");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn no_token_means_no_authorization_header() {
        let transport = ScriptedTransport::replying(200, "[]");
        let (augmenter, _, _) = augmenter(transport.clone(), false);

        augmenter.send(ApiRequest::get("/cursos")).await.unwrap();

        assert!(transport.last_request().headers().get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn login_endpoint_never_carries_the_token() {
        let transport = ScriptedTransport::replying(200, "{}");
        let (augmenter, _, _) = augmenter(transport.clone(), true);

        for path in ["/auth/login", "/api/auth/login?next=/x", "/auth/register"] {
            augmenter
                .send(ApiRequest::post(path, serde_json::json!({})))
                .await
                .unwrap();
            assert!(transport.last_request().headers().get(AUTHORIZATION).is_none());
        }
    }

    #[tokio::test]
    async fn unauthorized_clears_session_and_notifies() {
        let transport = ScriptedTransport::replying(401, "");
        let (augmenter, notifications, navigator) = augmenter(transport, true);

        let error = augmenter.send(ApiRequest::get("/cursos")).await.unwrap_err();

        assert_eq!(error.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(augmenter.store().current(), None);
        assert_eq!(navigator.visited(), vec!["/auth/login".to_string()]);
        assert_eq!(notifications.titles(), vec![messages::SESSION_EXPIRED_TITLE]);
    }

    #[tokio::test]
    async fn unauthorized_from_login_keeps_existing_session() {
        let transport = ScriptedTransport::replying(401, "");
        let (augmenter, notifications, navigator) = augmenter(transport, true);

        let error = augmenter
            .send(ApiRequest::post("/auth/login", serde_json::json!({})))
            .await
            .unwrap_err();

        assert_eq!(error.class(), FailureClass::Unauthorized);
        assert!(augmenter.store().is_authenticated());
        assert!(navigator.visited().is_empty());
        assert!(notifications.titles().is_empty());
    }

    #[tokio::test]
    async fn forbidden_only_notifies() {
        let transport = ScriptedTransport::replying(403, "");
        let (augmenter, notifications, _) = augmenter(transport, true);

        let error = augmenter.send(ApiRequest::get("/admin")).await.unwrap_err();

        assert_eq!(error.class(), FailureClass::Forbidden);
        assert!(augmenter.store().is_authenticated());
        assert_eq!(notifications.titles(), vec![messages::ACCESS_DENIED_TITLE]);
    }

    #[tokio::test]
    async fn server_error_is_reported_and_passed_through() {
        let transport = ScriptedTransport::replying(502, "bad gateway");
        let (augmenter, notifications, _) = augmenter(transport, false);

        let error = augmenter.send(ApiRequest::get("/cursos")).await.unwrap_err();

        assert_eq!(
            error,
            ApiError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: "bad gateway".to_string()
            }
        );
        assert_eq!(notifications.titles(), vec![messages::SERVER_ERROR_TITLE]);
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let (augmenter, notifications, _) = augmenter(ScriptedTransport::unreachable(), true);

        let error = augmenter.send(ApiRequest::get("/cursos")).await.unwrap_err();

        assert_eq!(error.class(), FailureClass::NetworkError);
        assert!(augmenter.store().is_authenticated());
        assert_eq!(notifications.titles(), vec![messages::CONNECTION_ERROR_TITLE]);
    }

    #[tokio::test]
    async fn other_failures_pass_through_silently() {
        let transport = ScriptedTransport::replying(404, "missing");
        let (augmenter, notifications, _) = augmenter(transport, true);

        let error = augmenter.send(ApiRequest::get("/cursos/9")).await.unwrap_err();

        assert_eq!(error.class(), FailureClass::Other);
        assert!(notifications.titles().is_empty());
    }

    #[tokio::test]
    async fn success_passes_through_unchanged() {
        let transport = ScriptedTransport::replying(201, r#"{"id":1}"#);
        let (augmenter, notifications, _) = augmenter(transport, true);

        let response = augmenter
            .send(ApiRequest::post("/cursos", serde_json::json!({"titulo": "Rust"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.body(), r#"{"id":1}"#);
        assert!(notifications.titles().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_clears_whatever_the_prior_state() {
        for signed_in in [true, false] {
            let transport = ScriptedTransport::replying(401, "");
            let (augmenter, _, _) = augmenter(transport, signed_in);

            let _ = augmenter.send(ApiRequest::get("/auth/profile")).await;

            assert_eq!(augmenter.store().current(), None);
        }
    }
}

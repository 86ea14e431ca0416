use academia_core::{ApiRequest, ApiResponse, HttpTransport, TransportError};
use reqwest::{Client, Url};

/// [`HttpTransport`] over a shared reqwest client.
///
/// Request paths are resolved relative to the base URL, so a base of `http://host/api` sends
/// `/auth/login` to `http://host/api/auth/login`.
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, http_client: Client) -> Result<Self, TransportError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    #[tracing::instrument(
        name = "Calling backend",
        skip_all,
        fields(method = %request.method(), path = %request.path())
    )]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(request.path())?;

        let mut builder = self
            .http_client
            .request(request.method().clone(), url)
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::InvalidRequest(e.to_string())
            } else {
                TransportError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        tracing::debug!(status = status.as_u16(), "Backend answered");
        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use http::{HeaderValue, StatusCode, header::AUTHORIZATION};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    use super::*;

    fn transport(base_url: &str) -> ReqwestTransport {
        let client = Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        ReqwestTransport::new(base_url, client).unwrap()
    }

    #[tokio::test]
    async fn posts_json_under_the_base_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "username": "ana@example.com", "password": "pw" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc" })))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport(&format!("{}/api", server.uri()))
            .send(ApiRequest::post(
                "/auth/login",
                json!({ "username": "ana@example.com", "password": "pw" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.json::<serde_json::Value>().unwrap()["token"], "abc");
    }

    #[tokio::test]
    async fn forwards_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/profile"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let request = ApiRequest::get("/auth/profile")
            .with_header(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        let response = transport(&server.uri()).send(request).await.unwrap();

        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn error_statuses_are_responses_not_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "nope" })))
            .mount(&server)
            .await;

        let response = transport(&server.uri())
            .send(ApiRequest::post("/auth/login", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.body().contains("nope"));
    }

    #[tokio::test]
    async fn slow_backend_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(1)))
            .mount(&server)
            .await;

        let error = transport(&server.uri())
            .send(ApiRequest::get("/auth/profile"))
            .await
            .unwrap_err();

        assert!(matches!(error, TransportError::Unreachable(_)));
    }

    #[test]
    fn rejects_malformed_base_url() {
        let result = ReqwestTransport::new("not a url", Client::new());
        assert!(matches!(result, Err(TransportError::InvalidRequest(_))));
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let transport = transport("http://localhost:8080/api");
        assert_eq!(transport.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            transport.url_for("/auth/login").unwrap().as_str(),
            "http://localhost:8080/api/auth/login"
        );
    }
}

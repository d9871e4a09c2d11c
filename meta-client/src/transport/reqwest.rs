//! reqwest-backed transport.

use super::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use std::time::Duration;

/// Default per-request deadline.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport over a pooled `reqwest::Client` (rustls).
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// A transport with the default request timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// A transport whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("storemeta/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn map_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::ConnectionFailed(err.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::ReceiveFailed(e.to_string()))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn execute_passes_status_and_body_through() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/apps"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(418).set_body_string("teapot"))
            .mount(&mock)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let response = transport
            .execute(
                HttpRequest::get(format!("{}/v1/apps", mock.uri()))
                    .with_header("Accept", "application/json"),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 418);
        assert_eq!(response.body, b"teapot");
    }

    #[tokio::test]
    async fn execute_sends_body() {
        let mock = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/things/1"))
            .and(body_json(serde_json::json!({"a": 1})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let request = HttpRequest::new(HttpMethod::Patch, format!("{}/v1/things/1", mock.uri()))
            .with_header("Content-Type", "application/json")
            .with_body(br#"{"a":1}"#.to_vec());
        let response = transport.execute(request).await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn unreachable_host_is_connection_failure() {
        let transport = ReqwestTransport::with_timeout(Duration::from_secs(2)).unwrap();
        // Port 9 (discard) on localhost is closed in test environments.
        let result = transport.execute(HttpRequest::get("http://127.0.0.1:9/")).await;
        assert!(matches!(
            result,
            Err(TransportError::ConnectionFailed(_)) | Err(TransportError::Timeout)
        ));
    }
}

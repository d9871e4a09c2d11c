//! Authenticated JSON requests.
//!
//! [`HttpClient`] resolves endpoints against the API base, attaches the
//! bearer token and decodes JSON. A `401` on the first attempt re-mints the
//! token and retries exactly once.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::TokenProvider;
use crate::transport::{HttpMethod, HttpRequest, Transport};
use crate::ClientError;

/// Production API base.
pub const DEFAULT_BASE_URL: &str = "https://api.appstoreconnect.apple.com/v1";

/// JSON client over a [`Transport`].
pub struct HttpClient<T: Transport> {
    transport: T,
    auth: Arc<dyn TokenProvider>,
    base_url: String,
}

impl<T: Transport> HttpClient<T> {
    /// A client against the production API.
    pub fn new(transport: T, auth: Arc<dyn TokenProvider>) -> Self {
        Self::with_base_url(transport, auth, DEFAULT_BASE_URL)
    }

    /// A client against a custom base (tests, proxies).
    pub fn with_base_url(
        transport: T,
        auth: Arc<dyn TokenProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            auth,
            base_url,
        }
    }

    /// The configured base.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute endpoints pass through; relative ones are appended to the base.
    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// GET and decode.
    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ClientError> {
        self.send::<R, ()>(endpoint, HttpMethod::Get, None).await
    }

    /// Send a request and decode the JSON response.
    ///
    /// An empty 2xx body decodes as JSON `null`, so `R = ()` or `Option<_>`
    /// work for bodiless responses.
    pub async fn send<R, B>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&B>,
    ) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.resolve(endpoint);
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ClientError::Serialization(e.to_string()))?;

        let mut is_retry = false;
        loop {
            let mut request = HttpRequest::new(method, url.clone())
                .with_header("Accept", "application/json");
            if let Some(body) = &body {
                request = request
                    .with_header("Content-Type", "application/json")
                    .with_body(body.clone());
            }
            if let Some(token) = self.auth.bearer_token().await {
                request = request.with_header("Authorization", format!("Bearer {token}"));
            }

            debug!(%method, %url, is_retry, "sending request");
            let response = self.transport.execute(request).await?;

            match response.status {
                401 if !is_retry => {
                    warn!(%method, %url, "401 from server; regenerating token and retrying once");
                    if let Err(e) = self.auth.regenerate().await {
                        warn!(error = %e, "token regeneration failed");
                        return Err(ClientError::Unauthorized);
                    }
                    is_retry = true;
                }
                401 => return Err(ClientError::Unauthorized),
                _ if response.is_success() => {
                    let bytes: &[u8] = if response.body.is_empty() {
                        b"null"
                    } else {
                        &response.body
                    };
                    return serde_json::from_slice(bytes)
                        .map_err(|e| ClientError::Decoding(format!("{method} {url}: {e}")));
                }
                status => {
                    debug!(%method, %url, status, "request failed");
                    return Err(ClientError::ServerError(status));
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::auth::AuthError;
    use crate::transport::{MockTransport, TransportError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts regenerations; optionally refuses them.
    #[derive(Debug, Default)]
    pub(crate) struct CountingTokens {
        pub(crate) regenerations: AtomicUsize,
        pub(crate) refuse: bool,
        pub(crate) unauthenticated: bool,
    }

    #[async_trait]
    impl TokenProvider for CountingTokens {
        async fn bearer_token(&self) -> Option<String> {
            if self.unauthenticated {
                return None;
            }
            Some(format!("token-{}", self.regenerations.load(Ordering::SeqCst)))
        }

        async fn regenerate(&self) -> Result<(), AuthError> {
            self.regenerations.fetch_add(1, Ordering::SeqCst);
            if self.refuse {
                Err(AuthError::NotAuthenticated)
            } else {
                Ok(())
            }
        }
    }

    fn client(tokens: Arc<CountingTokens>) -> (HttpClient<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let client = HttpClient::with_base_url(transport.clone(), tokens, "https://api.test/v1");
        (client, transport)
    }

    // ===========================================
    // URL Resolution
    // ===========================================

    #[test]
    fn resolve_relative_and_absolute() {
        let (client, _) = client(Arc::default());
        assert_eq!(client.resolve("/apps"), "https://api.test/v1/apps");
        assert_eq!(client.resolve("apps"), "https://api.test/v1/apps");
        assert_eq!(
            client.resolve("https://other.test/v1/apps?cursor=x"),
            "https://other.test/v1/apps?cursor=x"
        );
    }

    #[test]
    fn default_base_is_production() {
        let client = HttpClient::new(MockTransport::new(), Arc::new(CountingTokens::default()));
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    // ===========================================
    // Headers and Bodies
    // ===========================================

    #[tokio::test]
    async fn attaches_bearer_token() {
        let (client, transport) = client(Arc::default());
        transport.queue_json(200, &json!({"ok": true}));

        let value: Value = client.get("/apps").await.unwrap();
        assert_eq!(value["ok"], true);

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.header("authorization"), Some("Bearer token-0"));
        assert_eq!(sent.url, "https://api.test/v1/apps");
    }

    #[tokio::test]
    async fn unauthenticated_requests_have_no_authorization() {
        let tokens = Arc::new(CountingTokens {
            unauthenticated: true,
            ..Default::default()
        });
        let (client, transport) = client(tokens);
        transport.queue_json(200, &json!(null));

        let _: Option<Value> = client.get("/apps").await.unwrap();
        assert_eq!(transport.last_request().unwrap().header("authorization"), None);
    }

    #[tokio::test]
    async fn serializes_json_body() {
        let (client, transport) = client(Arc::default());
        transport.queue_status(204);

        client
            .send::<(), _>("/things/1", HttpMethod::Patch, Some(&json!({"a": 1})))
            .await
            .unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Patch);
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert_eq!(sent.body.as_deref(), Some(br#"{"a":1}"#.as_slice()));
    }

    // ===========================================
    // 401 Retry
    // ===========================================

    #[tokio::test]
    async fn retries_once_after_401() {
        let tokens = Arc::new(CountingTokens::default());
        let (client, transport) = client(tokens.clone());
        transport.queue_status(401);
        transport.queue_json(200, &json!({"ok": 1}));

        let value: Value = client.get("/apps").await.unwrap();
        assert_eq!(value["ok"], 1);
        assert_eq!(tokens.regenerations.load(Ordering::SeqCst), 1);

        let sent = transport.sent_requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].header("authorization"), Some("Bearer token-1"));
    }

    #[tokio::test]
    async fn second_401_is_unauthorized() {
        let tokens = Arc::new(CountingTokens::default());
        let (client, transport) = client(tokens.clone());
        transport.queue_status(401);
        transport.queue_status(401);

        let result: Result<Value, _> = client.get("/apps").await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
        assert_eq!(tokens.regenerations.load(Ordering::SeqCst), 1);
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn failed_regeneration_is_unauthorized() {
        let tokens = Arc::new(CountingTokens {
            refuse: true,
            ..Default::default()
        });
        let (client, transport) = client(tokens.clone());
        transport.queue_status(401);

        let result: Result<Value, _> = client.get("/apps").await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
        assert_eq!(transport.request_count(), 1);
    }

    // ===========================================
    // Error Mapping
    // ===========================================

    #[tokio::test]
    async fn non_2xx_is_server_error() {
        let (client, transport) = client(Arc::default());
        transport.queue_status(409);

        let result: Result<Value, _> = client.get("/apps").await;
        assert!(matches!(result, Err(ClientError::ServerError(409))));
    }

    #[tokio::test]
    async fn success_range_ends_at_299() {
        let (client, transport) = client(Arc::default());
        transport.queue_status(299);
        transport.queue_status(300);

        let ok: Option<Value> = client.get("/apps").await.unwrap();
        assert_eq!(ok, None);

        let result: Result<Option<Value>, _> = client.get("/apps").await;
        assert!(matches!(result, Err(ClientError::ServerError(300))));
    }

    #[tokio::test]
    async fn wrong_shape_is_decoding_error() {
        #[derive(Debug, serde::Deserialize)]
        struct Expected {
            #[allow(dead_code)]
            data: Vec<u32>,
        }

        let (client, transport) = client(Arc::default());
        transport.queue_json(200, &json!({"data": "nope"}));

        let result: Result<Expected, _> = client.get("/apps").await;
        assert!(matches!(result, Err(ClientError::Decoding(_))));
    }

    #[tokio::test]
    async fn transport_fault_is_unknown_error() {
        let (client, transport) = client(Arc::default());
        transport.fail_next("connection reset");

        let result: Result<Value, _> = client.get("/apps").await;
        assert!(matches!(
            result,
            Err(ClientError::Unknown(TransportError::ConnectionFailed(_)))
        ));
    }
}

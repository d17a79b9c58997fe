//! Main ApiClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method};
use serde_json::Value;

use crate::error::ApiError;
use crate::token::TokenStore;

/// Invoked after a 401 response has cleared the token store - the
/// redirect-to-login seam.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// The authenticated JSON API client.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Every request injects the stored bearer token
/// when one is present; a 401 response clears the store and fires the
/// configured unauthorized hook before the error is returned.
///
/// # Example
///
/// ```ignore
/// use appkit_client::{ApiClient, MemoryTokenStore};
///
/// let client = ApiClient::builder()
///     .base_url("https://example.test/api/v1")
///     .token_store(MemoryTokenStore::new())
///     .build();
///
/// let user = client.get("/auth/me").await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: String,
    http_client: Client,
    tokens: Arc<dyn TokenStore>,
    on_unauthorized: Option<UnauthorizedHook>,
    timeout: Option<Duration>,
}

/// Per-request options: method, JSON body, extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl ApiClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ApiClientBuilder<Missing, Missing> {
        ApiClientBuilder::new()
    }

    /// Performs a request against `base_url + endpoint`.
    ///
    /// Success returns the parsed JSON body (`null` when the body is not
    /// JSON). Non-2xx statuses map to [`ApiError::Http`] carrying the
    /// parsed server body; transport failures map to [`ApiError::Network`].
    pub async fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let url = format!(
            "{}{}",
            self.inner.base_url.trim_end_matches('/'),
            endpoint
        );

        let mut request = self
            .inner
            .http_client
            .request(options.method, &url)
            .header("Content-Type", "application/json");

        if let Some(token) = self.inner.tokens.get().await {
            request = request.bearer_auth(token);
        }
        for (name, value) in &options.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        let body: Option<Value> = response.json().await.ok();

        if status.is_success() {
            return Ok(body.unwrap_or(Value::Null));
        }

        if status.as_u16() == 401 {
            self.handle_unauthorized().await;
        }

        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        Err(ApiError::Http {
            status: status.as_u16(),
            message,
            body,
        })
    }

    /// Clears stored credentials and fires the unauthorized hook.
    async fn handle_unauthorized(&self) {
        self.inner.tokens.clear().await;
        if let Some(hook) = &self.inner.on_unauthorized {
            hook();
        }
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::new(Method::GET)).await
    }

    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::new(Method::POST).body(body))
            .await
    }

    /// POST with no body (logout-style endpoints).
    pub async fn post_empty(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::new(Method::POST)).await
    }

    pub async fn put(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::new(Method::PUT).body(body))
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::new(Method::DELETE))
            .await
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the token store.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.inner.tokens
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.inner.http_client
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ApiClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile
/// time.
///
/// # Required Fields
///
/// - `base_url` - the API root every endpoint is joined onto
/// - `token_store` - a [`TokenStore`] implementation
pub struct ApiClientBuilder<Url, Store> {
    base_url: Url,
    token_store: Store,
    on_unauthorized: Option<UnauthorizedHook>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ApiClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            token_store: Missing,
            on_unauthorized: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for ApiClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ApiClientBuilder<Missing, S> {
    /// Sets the API base URL (e.g. `https://example.test/api/v1`).
    pub fn base_url(self, url: impl Into<String>) -> ApiClientBuilder<Set<String>, S> {
        ApiClientBuilder {
            base_url: Set(url.into()),
            token_store: self.token_store,
            on_unauthorized: self.on_unauthorized,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> ApiClientBuilder<U, Missing> {
    /// Sets the token store for authentication.
    pub fn token_store<T: TokenStore + 'static>(
        self,
        store: T,
    ) -> ApiClientBuilder<U, Set<Arc<dyn TokenStore>>> {
        ApiClientBuilder {
            base_url: self.base_url,
            token_store: Set(Arc::new(store) as Arc<dyn TokenStore>),
            on_unauthorized: self.on_unauthorized,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, S> ApiClientBuilder<U, S> {
    /// Sets the hook invoked after a 401 has cleared the token store.
    pub fn on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ApiClientBuilder<Set<String>, Set<Arc<dyn TokenStore>>> {
    /// Builds the [`ApiClient`].
    ///
    /// This method is only available when both `base_url` and
    /// `token_store` have been set.
    pub fn build(self) -> ApiClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        ApiClient {
            inner: Arc::new(ApiClientInner {
                base_url: self.base_url.0,
                http_client,
                tokens: self.token_store.0,
                on_unauthorized: self.on_unauthorized,
                timeout: self.timeout,
            }),
        }
    }
}

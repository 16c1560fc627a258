//! Gateway HTTP client
//!
//! Wraps a `reqwest::Client` so every outbound call runs through the
//! request interceptor and every failed response through the response
//! interceptor. Successful responses are handed back unmodified.

use crate::config::GatewayConfig;
use crate::events::SessionEvent;
use crate::request::RequestInterceptor;
use crate::response::{ResponseInterceptor, ResponseSummary};
use crate::{GatewayError, GatewayResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::Serialize;
use servigo_core::{ErrorContext, ServigoError};
use servigo_session::SessionHandle;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Authenticated HTTP client for the Servigo API
pub struct GatewayClient {
    http: reqwest::Client,
    config: GatewayConfig,
    session: SessionHandle,
    request_interceptor: RequestInterceptor,
    response_interceptor: ResponseInterceptor,
    events: broadcast::Sender<SessionEvent>,
}

impl GatewayClient {
    /// Create a new gateway client
    pub fn new(config: GatewayConfig, session: SessionHandle) -> GatewayResult<Self> {
        url::Url::parse(&config.base_url).map_err(|e| {
            GatewayError::Core(ServigoError::Config {
                message: format!("Invalid base URL '{}': {}", config.base_url, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("gateway_client")
                    .with_operation("new")
                    .with_suggestion("Set the base URL to the backend origin"),
            })
        })?;

        let http = build_http_client(&config)?;
        let (events, _) = broadcast::channel(64);

        let request_interceptor =
            RequestInterceptor::new(session.clone(), config.signup_marker.clone());
        let response_interceptor = ResponseInterceptor::new(session.clone(), events.clone());

        info!("Created gateway client for {}", config.base_url);

        Ok(Self {
            http,
            config,
            session,
            request_interceptor,
            response_interceptor,
            events,
        })
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe_to_session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub(crate) fn events(&self) -> &broadcast::Sender<SessionEvent> {
        &self.events
    }

    /// Resolve an API path against the configured origin
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get(&self, path: &str) -> GatewayResult<reqwest::Response> {
        self.execute(Method::GET, path, None::<&()>).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<reqwest::Response> {
        self.execute(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<reqwest::Response> {
        self.execute(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> GatewayResult<reqwest::Response> {
        self.execute(Method::DELETE, path, None::<&()>).await
    }

    /// Dispatch a request through the interception pipeline
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> GatewayResult<reqwest::Response> {
        let url = self.endpoint(path);

        let mut headers = HeaderMap::new();
        self.request_interceptor.intercept(&url, &mut headers)?;

        debug!(%method, url, "Dispatching API request");

        let mut request = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                // No response received: report the failure, touch nothing.
                return Err(GatewayError::Transport {
                    message: e.to_string(),
                    source: Some(Box::new(e)),
                });
            }
        };

        if response.status().is_success() {
            return Ok(response);
        }

        let summary = ResponseSummary::from_response(response).await;
        Err(self.response_interceptor.on_failure(summary.classify()))
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

/// Build the underlying HTTP client with the configured defaults
///
/// Every request carries `Content-Type: application/json` and the
/// configured user agent, plus any extra configured headers.
fn build_http_client(config: &GatewayConfig) -> GatewayResult<reqwest::Client> {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent).map_err(|e| {
            GatewayError::Core(ServigoError::Config {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("gateway_client").with_operation("build_http_client"),
            })
        })?,
    );

    for (key, value) in &config.headers {
        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            GatewayError::Core(ServigoError::Config {
                message: format!("Invalid header name '{}': {}", key, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("gateway_client").with_operation("build_http_client"),
            })
        })?;

        let header_value = HeaderValue::from_str(value).map_err(|e| {
            GatewayError::Core(ServigoError::Config {
                message: format!("Invalid header value for '{}': {}", key, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("gateway_client").with_operation("build_http_client"),
            })
        })?;

        headers.insert(header_name, header_value);
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| {
            GatewayError::Core(ServigoError::Config {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("gateway_client").with_operation("build_http_client"),
            })
        })?;

    Ok(client)
}

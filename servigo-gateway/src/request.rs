//! Request interceptor
//!
//! Attaches the bearer credential to outgoing requests. The signup endpoint
//! is exempt: no session exists yet when it is called, so it must stay
//! credential-free. Everything else in the request is left untouched.

use crate::{GatewayError, GatewayResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use servigo_core::{ErrorContext, ServigoError};
use servigo_session::SessionHandle;
use tracing::debug;

/// Mutates outgoing request headers to attach the session credential
#[derive(Debug, Clone)]
pub struct RequestInterceptor {
    session: SessionHandle,
    signup_marker: String,
}

impl RequestInterceptor {
    pub fn new(session: SessionHandle, signup_marker: impl Into<String>) -> Self {
        Self {
            session,
            signup_marker: signup_marker.into(),
        }
    }

    /// Intercept an outgoing request
    ///
    /// Inserts `Authorization: Bearer <token>` when a token is present and
    /// the target is not the signup endpoint. Existing headers are
    /// preserved. A malformed token surfaces as an error to the caller.
    pub fn intercept(&self, url: &str, headers: &mut HeaderMap) -> GatewayResult<()> {
        if url.contains(&self.signup_marker) {
            debug!(url, "Skipping credential for signup request");
            return Ok(());
        }

        let Some(token) = self.session.token().map_err(GatewayError::Core)? else {
            return Ok(());
        };

        let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            GatewayError::Core(ServigoError::Validation {
                message: format!("Stored token is not a valid header value: {}", e),
                field: Some("token".to_string()),
                context: ErrorContext::new("request_interceptor")
                    .with_operation("intercept")
                    .with_suggestion("Clear the session and log in again"),
            })
        })?;

        headers.insert(AUTHORIZATION, value);
        debug!(url, "Attached bearer credential to request");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SIGNUP_MARKER;
    use reqwest::header::HeaderName;
    use servigo_session::MemorySessionStore;
    use std::sync::Arc;

    fn interceptor() -> RequestInterceptor {
        let session = SessionHandle::new(Arc::new(MemorySessionStore::new()));
        RequestInterceptor::new(session, SIGNUP_MARKER)
    }

    #[test]
    fn test_signup_request_never_carries_credential() {
        let interceptor = interceptor();
        interceptor.session.set_token("xyz").unwrap();

        let mut headers = HeaderMap::new();
        interceptor
            .intercept("http://127.0.0.1:5000/api/signup", &mut headers)
            .unwrap();

        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_bearer_header_attached_when_token_present() {
        let interceptor = interceptor();
        interceptor.session.set_token("abc").unwrap();

        let mut headers = HeaderMap::new();
        interceptor
            .intercept("http://127.0.0.1:5000/api/services", &mut headers)
            .unwrap();

        assert_eq!(
            headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn test_existing_headers_preserved() {
        let interceptor = interceptor();
        interceptor.session.set_token("abc").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("42"),
        );

        interceptor
            .intercept("http://127.0.0.1:5000/api/services", &mut headers)
            .unwrap();

        assert_eq!(headers.get("x-request-id").unwrap(), "42");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_request_untouched_without_token() {
        let interceptor = interceptor();

        let mut headers = HeaderMap::new();
        interceptor
            .intercept("http://127.0.0.1:5000/api/services", &mut headers)
            .unwrap();

        assert!(headers.is_empty());
    }

    #[test]
    fn test_malformed_token_surfaces_error() {
        let interceptor = interceptor();
        interceptor.session.set_token("bad\ntoken").unwrap();

        let mut headers = HeaderMap::new();
        let result = interceptor.intercept("http://127.0.0.1:5000/api/services", &mut headers);

        assert!(matches!(result, Err(GatewayError::Core(_))));
        assert!(!headers.contains_key(AUTHORIZATION));
    }
}

//! Auth API surface
//!
//! Thin wrappers over the login and signup endpoints. Token issuance is
//! entirely server-side; on a successful login the issued credential and
//! role are written into the session store so subsequent requests pick
//! them up through the request interceptor.

use crate::client::GatewayClient;
use crate::events::SessionEvent;
use crate::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use servigo_core::{Role, ServigoError};
use tracing::info;

/// Credentials submitted to the login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// The role the user claims; the backend rejects a mismatch
    pub role: Role,
}

/// Successful login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub username: String,
    #[serde(default)]
    pub registered_on: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub professional_id: Option<i64>,
}

/// Registration details submitted to the signup endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: String,
    pub address: String,
    pub zip_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
}

/// Signup acknowledgement; accounts await admin approval before activation
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

impl GatewayClient {
    /// Log in and persist the issued credential and role
    pub async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginResponse> {
        let response = self.post("/api/login", request).await?;
        let login: LoginResponse = decode_json(response).await?;

        self.session().set_token(&login.token)?;
        self.session().set_role(login.role)?;

        info!(username = %login.username, role = %login.role, "Login succeeded");

        Ok(login)
    }

    /// Register a new account; the signup endpoint stays credential-free
    pub async fn signup(&self, request: &SignupRequest) -> GatewayResult<SignupResponse> {
        let response = self.post("/api/signup", request).await?;
        decode_json(response).await
    }

    /// Clear the session and announce the logout
    pub fn logout(&self) -> GatewayResult<()> {
        self.session().clear()?;
        let _ = self.events().send(SessionEvent::LoggedOut);
        info!("Logged out, session cleared");
        Ok(())
    }
}

async fn decode_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> GatewayResult<T> {
    let body = response.text().await.map_err(|e| GatewayError::Transport {
        message: format!("Failed to read response body: {}", e),
        source: Some(Box::new(e)),
    })?;

    serde_json::from_str(&body)
        .map_err(|e| GatewayError::Core(ServigoError::Serialization(e)))
}

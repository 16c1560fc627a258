//! Core data type definitions

use serde::{Deserialize, Serialize};

/// Persistent storage key for the bearer credential
pub const TOKEN_KEY: &str = "token";
/// Persistent storage key for the user role
pub const ROLE_KEY: &str = "role";
/// Persistent storage key for the UI theme preference
pub const THEME_KEY: &str = "selectedTheme";

/// The login route, target of every session-terminating redirect
pub const LOGIN_ROUTE: &str = "/login";

/// User role classification
///
/// Determines which routes are reachable. The wire representation is the
/// uppercase string the backend issues at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "CUSTOMER")]
    Customer,
    #[serde(rename = "PROFESSIONAL")]
    Professional,
}

impl Role {
    /// Dashboard route for this role
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Customer => "/customer/dashboard",
            Role::Professional => "/professional/dashboard",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Customer => write!(f, "CUSTOMER"),
            Role::Professional => write!(f, "PROFESSIONAL"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "CUSTOMER" => Ok(Role::Customer),
            "PROFESSIONAL" => Ok(Role::Professional),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// UI theme preference
///
/// Stored alongside the auth keys and cleared with them. Not part of the
/// auth decision logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Snapshot of the authenticated identity state held client-side
///
/// Invariant: `role` is meaningful only while `token` is present. A stored
/// role without a token is treated as unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    /// Create a session for an authenticated user
    pub fn authenticated(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: Some(token.into()),
            role: Some(role),
        }
    }

    /// Create an empty, unauthenticated session
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Role of the session, gated by the token invariant
    pub fn effective_role(&self) -> Option<Role> {
        if self.token.is_some() {
            self.role
        } else {
            None
        }
    }
}

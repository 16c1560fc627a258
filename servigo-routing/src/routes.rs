//! Declarative route table
//!
//! Routes are data: each descriptor declares its access requirement and
//! the guard consumes them without any route-specific branching. The table
//! is built once at startup and immutable afterwards.

use servigo_core::{validation_error, ErrorContext, Role, ServigoError, ServigoResult};
use std::collections::HashMap;

/// Access metadata for a single route
///
/// The component a path renders is presentation plumbing and not carried
/// here; `name` is the stable identifier the UI layer keys on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: String,
    pub requires_auth: bool,
    pub role: Option<Role>,
}

impl RouteDescriptor {
    /// A public route
    pub fn public(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            requires_auth: false,
            role: None,
        }
    }

    /// A route requiring any authenticated session
    pub fn protected(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            requires_auth: true,
            role: None,
        }
    }

    /// A route requiring an authenticated session with a specific role
    pub fn role_restricted(
        path: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            requires_auth: true,
            role: Some(role),
        }
    }
}

/// Immutable path-to-descriptor mapping
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, RouteDescriptor>,
}

impl RouteTable {
    /// Build a table, validating every descriptor
    ///
    /// A declared role implies `requires_auth`; a descriptor violating that
    /// is rejected rather than silently widened.
    pub fn new(descriptors: Vec<RouteDescriptor>) -> ServigoResult<Self> {
        let mut routes = HashMap::new();

        for descriptor in descriptors {
            if descriptor.role.is_some() && !descriptor.requires_auth {
                return Err(validation_error!(
                    format!(
                        "Route '{}' declares a role but does not require auth",
                        descriptor.path
                    ),
                    "requires_auth",
                    "route_table"
                ));
            }

            routes.insert(descriptor.path.clone(), descriptor);
        }

        Ok(Self { routes })
    }

    /// Look up a route by exact path
    pub fn find(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes.get(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// The application's route surface
pub fn servigo_routes() -> RouteTable {
    use Role::*;

    let descriptors = vec![
        RouteDescriptor::public("/login", "login"),
        RouteDescriptor::public("/signup", "signup"),
        RouteDescriptor::protected("/profile", "profile"),
        RouteDescriptor::protected("/subscription", "subscription"),
        RouteDescriptor::public("/payment", "payment"),
        RouteDescriptor::role_restricted("/admin/dashboard", "adminDashboard", Admin),
        RouteDescriptor::role_restricted("/customer/dashboard", "customerDashboard", Customer),
        RouteDescriptor::role_restricted(
            "/professional/dashboard",
            "professionalDashboard",
            Professional,
        ),
        RouteDescriptor::role_restricted("/admin/summary", "adminSummary", Admin),
        RouteDescriptor::role_restricted("/customer/summary", "customerSummary", Customer),
        RouteDescriptor::role_restricted(
            "/professional/summary",
            "professionalSummary",
            Professional,
        ),
        RouteDescriptor::role_restricted("/admin/search", "adminSearch", Admin),
        RouteDescriptor::role_restricted("/customer/search", "customerSearch", Customer),
        RouteDescriptor::role_restricted(
            "/professional/search",
            "professionalSearch",
            Professional,
        ),
    ];

    // The application table is statically valid.
    RouteTable::new(descriptors).expect("static route table is valid")
}

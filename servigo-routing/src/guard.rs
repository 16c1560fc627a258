//! Navigation guard
//!
//! A pure decision function evaluated once per route transition. It never
//! errors and never suspends: the outcome is either the requested route or
//! a concrete redirect destination.

use crate::routes::RouteDescriptor;
use servigo_core::{Session, LOGIN_ROUTE};
use tracing::warn;

/// Terminal outcome of a pending transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// The transition proceeds to the requested route
    Allowed,
    /// The transition is resolved to a different destination
    Redirected(String),
}

impl NavigationDecision {
    /// Destination of the transition given the requested path
    pub fn resolve<'a>(&'a self, requested: &'a str) -> &'a str {
        match self {
            NavigationDecision::Allowed => requested,
            NavigationDecision::Redirected(target) => target,
        }
    }
}

/// Role-based access gate consulted before every route transition
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationGuard;

impl NavigationGuard {
    /// Decide a transition to `route` under `session`
    ///
    /// Unauthenticated access to a protected route always redirects to
    /// login; this is checked before any role comparison so an absent role
    /// never drives a role-based redirect. Cross-role access is resolved
    /// back into the user's own dashboard rather than rejected outright.
    /// Routes missing from the table are treated as public.
    pub fn decide(route: Option<&RouteDescriptor>, session: &Session) -> NavigationDecision {
        let Some(route) = route else {
            return NavigationDecision::Allowed;
        };

        if !route.requires_auth {
            return NavigationDecision::Allowed;
        }

        if !session.is_authenticated() {
            warn!(path = %route.path, "Unauthenticated access to protected route");
            return NavigationDecision::Redirected(LOGIN_ROUTE.to_string());
        }

        if let Some(required) = route.role {
            match session.effective_role() {
                Some(role) if role == required => {}
                Some(role) => {
                    warn!(
                        path = %route.path,
                        %role,
                        "Cross-role access, redirecting to own dashboard"
                    );
                    return NavigationDecision::Redirected(role.dashboard_path().to_string());
                }
                None => {
                    warn!(path = %route.path, "Role-restricted route without a session role");
                    return NavigationDecision::Redirected(LOGIN_ROUTE.to_string());
                }
            }
        }

        NavigationDecision::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::servigo_routes;
    use servigo_core::{Role, Session};

    fn decide(path: &str, session: &Session) -> NavigationDecision {
        let table = servigo_routes();
        NavigationGuard::decide(table.find(path), session)
    }

    #[test]
    fn test_protected_route_without_token_redirects_to_login() {
        let session = Session::anonymous();

        // every role flavor of protected route behaves the same
        for path in [
            "/profile",
            "/admin/dashboard",
            "/customer/dashboard",
            "/professional/dashboard",
        ] {
            assert_eq!(
                decide(path, &session),
                NavigationDecision::Redirected("/login".to_string()),
                "path {}",
                path
            );
        }
    }

    #[test]
    fn test_cross_role_access_redirects_to_own_dashboard() {
        let session = Session::authenticated("abc", Role::Customer);
        assert_eq!(
            decide("/admin/dashboard", &session),
            NavigationDecision::Redirected("/customer/dashboard".to_string())
        );

        let session = Session::authenticated("abc", Role::Professional);
        assert_eq!(
            decide("/customer/summary", &session),
            NavigationDecision::Redirected("/professional/dashboard".to_string())
        );
    }

    #[test]
    fn test_matching_role_is_allowed() {
        let session = Session::authenticated("abc", Role::Admin);
        assert_eq!(decide("/admin/dashboard", &session), NavigationDecision::Allowed);
        assert_eq!(decide("/admin/search", &session), NavigationDecision::Allowed);
    }

    #[test]
    fn test_protected_route_without_role_requirement_allows_any_session() {
        for role in [Role::Admin, Role::Customer, Role::Professional] {
            let session = Session::authenticated("abc", role);
            assert_eq!(decide("/profile", &session), NavigationDecision::Allowed);
        }
    }

    #[test]
    fn test_missing_session_role_on_restricted_route_redirects_to_login() {
        // token present but no stored role: rule 1 passes, role rule falls
        // back to login instead of guessing a dashboard
        let session = Session {
            token: Some("abc".to_string()),
            role: None,
        };
        assert_eq!(
            decide("/admin/dashboard", &session),
            NavigationDecision::Redirected("/login".to_string())
        );
    }

    #[test]
    fn test_stored_role_without_token_redirects_to_login() {
        // rule order: the token check wins before any role comparison
        let session = Session {
            token: None,
            role: Some(Role::Admin),
        };
        assert_eq!(
            decide("/admin/dashboard", &session),
            NavigationDecision::Redirected("/login".to_string())
        );
    }

    #[test]
    fn test_public_routes_allowed_for_any_session_state() {
        for session in [
            Session::anonymous(),
            Session::authenticated("abc", Role::Customer),
        ] {
            assert_eq!(decide("/login", &session), NavigationDecision::Allowed);
            assert_eq!(decide("/signup", &session), NavigationDecision::Allowed);
            assert_eq!(decide("/payment", &session), NavigationDecision::Allowed);
        }
    }

    #[test]
    fn test_unknown_route_is_allowed() {
        let session = Session::anonymous();
        assert_eq!(decide("/no-such-route", &session), NavigationDecision::Allowed);
    }

    #[test]
    fn test_decision_resolves_destination() {
        assert_eq!(NavigationDecision::Allowed.resolve("/profile"), "/profile");
        assert_eq!(
            NavigationDecision::Redirected("/login".to_string()).resolve("/profile"),
            "/login"
        );
    }
}

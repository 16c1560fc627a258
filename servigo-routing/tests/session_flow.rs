//! End-to-end scenarios for the client security pipeline
//!
//! Drives the request interceptor, response interceptor, redirect
//! subscriber and navigation guard together over a shared session store,
//! without a network.

use reqwest::header::{HeaderMap, AUTHORIZATION};
use servigo_core::{Role, LOGIN_ROUTE};
use servigo_gateway::{
    GatewayError, RequestInterceptor, ResponseInterceptor, ResponseSummary, SessionEvent,
};
use servigo_routing::{
    handle_session_event, servigo_routes, MemoryNavigator, NavigationDecision, Navigator, Router,
};
use servigo_session::{MemorySessionStore, SessionHandle};
use std::sync::Arc;
use tokio::sync::broadcast;

fn session() -> SessionHandle {
    SessionHandle::new(Arc::new(MemorySessionStore::new()))
}

#[test]
fn anonymous_user_is_sent_to_login_from_protected_dashboard() {
    let session = session();
    let navigator = Arc::new(MemoryNavigator::starting_at("/"));
    let router = Router::new(servigo_routes(), navigator.clone(), session);

    let decision = router.navigate("/customer/dashboard").unwrap();

    assert_eq!(
        decision,
        NavigationDecision::Redirected("/login".to_string())
    );
    assert_eq!(navigator.current_path(), "/login");
}

#[test]
fn customer_visiting_admin_dashboard_lands_on_their_own() {
    let session = session();
    session.set_token("abc").unwrap();
    session.set_role(Role::Customer).unwrap();

    let navigator = Arc::new(MemoryNavigator::starting_at("/customer/dashboard"));
    let router = Router::new(servigo_routes(), navigator.clone(), session);

    let decision = router.navigate("/admin/dashboard").unwrap();

    assert_eq!(
        decision,
        NavigationDecision::Redirected("/customer/dashboard".to_string())
    );
    assert_eq!(navigator.current_path(), "/customer/dashboard");
}

#[test]
fn blocked_account_clears_session_redirects_and_resurfaces_failure() {
    let session = session();
    session.set_token("abc").unwrap();
    session.set_role(Role::Customer).unwrap();

    let (events_tx, mut events_rx) = broadcast::channel::<SessionEvent>(16);
    let interceptor = ResponseInterceptor::new(session.clone(), events_tx);
    let navigator = MemoryNavigator::starting_at("/customer/dashboard");

    let failure = ResponseSummary::new(403, Some("User is blocked by admin")).classify();
    let failure = interceptor.on_failure(failure);

    // the caller still observes the original failure
    assert!(matches!(failure, GatewayError::BlockedAccount { .. }));
    assert_eq!(failure.status(), Some(403));

    // store is fully cleared before the event is handled
    assert_eq!(session.token().unwrap(), None);
    assert_eq!(session.role().unwrap(), None);

    // the subscriber performs the redirect and sees the notice
    let event = events_rx.try_recv().unwrap();
    assert_eq!(event.notice(), Some("User is blocked by admin"));
    let target = handle_session_event(&event, &navigator, LOGIN_ROUTE);
    assert_eq!(target, Some("/login".to_string()));
    assert_eq!(navigator.current_path(), "/login");
}

#[test]
fn unauthorized_at_login_clears_session_without_redirect() {
    let session = session();
    session.set_token("stale").unwrap();

    let (events_tx, mut events_rx) = broadcast::channel::<SessionEvent>(16);
    let interceptor = ResponseInterceptor::new(session.clone(), events_tx);
    let navigator = MemoryNavigator::starting_at("/login");

    let failure = interceptor.on_failure(ResponseSummary::new(401, None::<String>).classify());
    assert!(matches!(failure, GatewayError::Unauthorized { .. }));

    assert_eq!(session.token().unwrap(), None);

    let event = events_rx.try_recv().unwrap();
    let target = handle_session_event(&event, &navigator, LOGIN_ROUTE);

    // already at login: no navigation happened
    assert_eq!(target, None);
    assert_eq!(navigator.history(), vec!["/login"]);
}

#[test]
fn signup_request_stays_credential_free_while_logged_in() {
    let session = session();
    session.set_token("xyz").unwrap();

    let interceptor = RequestInterceptor::new(session, "/api/signup");

    let mut headers = HeaderMap::new();
    interceptor
        .intercept("http://127.0.0.1:5000/api/signup", &mut headers)
        .unwrap();
    assert!(!headers.contains_key(AUTHORIZATION));

    // while every other call carries the credential
    let session = SessionHandle::new(Arc::new(MemorySessionStore::new()));
    session.set_token("xyz").unwrap();
    let interceptor = RequestInterceptor::new(session, "/api/signup");

    let mut headers = HeaderMap::new();
    interceptor
        .intercept("http://127.0.0.1:5000/api/requests", &mut headers)
        .unwrap();
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer xyz");
}

#[test]
fn terminated_session_fails_the_next_navigation() {
    // after a termination, the cleared store must gate the guard too
    let session = session();
    session.set_token("abc").unwrap();
    session.set_role(Role::Professional).unwrap();

    let (events_tx, _events_rx) = broadcast::channel::<SessionEvent>(16);
    let interceptor = ResponseInterceptor::new(session.clone(), events_tx);
    interceptor.on_failure(ResponseSummary::new(401, None::<String>).classify());

    let navigator = Arc::new(MemoryNavigator::starting_at("/professional/dashboard"));
    let router = Router::new(servigo_routes(), navigator, session);

    let decision = router.navigate("/professional/summary").unwrap();
    assert_eq!(
        decision,
        NavigationDecision::Redirected("/login".to_string())
    );
}

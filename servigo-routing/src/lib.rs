//! Servigo Routing - Role-based navigation control
//!
//! The route table declares which paths require authentication and which
//! role may enter them; the navigation guard is a pure decision function
//! over that table and the current session. Denials are resolved with a
//! redirect, never an error: the caller of a navigation always receives a
//! concrete destination.
//!
//! This crate also hosts the subscriber that reacts to the gateway's
//! session-termination events by redirecting to the login route, keeping
//! the HTTP layer free of any navigation knowledge.

pub mod guard;
pub mod navigator;
pub mod redirect;
pub mod router;
pub mod routes;

pub use guard::{NavigationDecision, NavigationGuard};
pub use navigator::{MemoryNavigator, Navigator};
pub use redirect::{handle_session_event, spawn_redirect_subscriber};
pub use router::Router;
pub use routes::{servigo_routes, RouteDescriptor, RouteTable};

//! Servigo Core - Core data structures and trait definitions
//!
//! This module defines the shared abstractions for the Servigo client
//! security gateway: the session contract, role model, error handling
//! and logging infrastructure used by the other crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use traits::*;
pub use types::*;

// Re-export commonly used external types
pub use tokio;
pub use tracing;

//! MockDB Server Library
//!
//! REST façade over the in-memory user store, meant as a throwaway backend
//! for prototyping and testing client applications.
//!
//! This library exposes the router and its pieces for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;

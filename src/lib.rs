// Library crate for the Chirpy social-posting service
// This file exposes the public API for integration tests

pub mod admin;
pub mod auth;
pub mod chirp;
pub mod config;
pub mod routes;
pub mod session;
pub mod shared;
pub mod user;
pub mod webhook;

// Re-export commonly used types for easier access in tests
pub use auth::TokenConfig;
pub use config::Platform;
pub use routes::build_router;
pub use shared::{AppError, AppState};

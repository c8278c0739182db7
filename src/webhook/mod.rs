// Public API - what other modules can use
pub use handlers::polka_webhook;

// Internal modules
mod handlers;
pub mod types;

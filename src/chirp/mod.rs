// Public API - what other modules can use
pub use handlers::{create_chirp, delete_chirp, get_chirp, list_chirps};
pub use service::ChirpService;

// Internal modules
mod handlers;
pub mod models;
mod profanity;
pub mod repository;
pub mod service;
pub mod types;

// Public API - what other modules can use
pub use handlers::{metrics_page, reset};
pub use metrics::{count_hits, HitCounter};

// Internal modules
mod handlers;
mod metrics;

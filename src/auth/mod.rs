// Public API - what other modules can use
pub use extractor::AuthUser;
pub use headers::{api_key, bearer_token};
pub use password::{hash_password, verify_password};
pub use token::TokenConfig;

// Internal modules
mod extractor;
mod headers;
mod password;
mod token;

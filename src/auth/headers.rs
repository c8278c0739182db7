use axum::http::{header, HeaderMap};

use crate::shared::AppError;

/// Extracts a bearer token from the Authorization header.
///
/// Missing header -> MissingCredential; wrong scheme -> MalformedCredential.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    scheme_token(headers, "Bearer ")
}

/// Extracts the webhook API key from the Authorization header.
///
/// The billing provider sends its key with an "ApiKey" scheme rather than
/// "Bearer", on the same header.
pub fn api_key(headers: &HeaderMap) -> Result<&str, AppError> {
    scheme_token(headers, "ApiKey ")
}

fn scheme_token<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::MissingCredential)?
        .to_str()
        .map_err(|_| AppError::MalformedCredential)?;

    value
        .strip_prefix(scheme)
        .map(str::trim)
        .ok_or(AppError::MalformedCredential)
}

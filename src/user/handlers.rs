use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::UserService,
    types::{CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, UserResponse},
};
use crate::auth::AuthUser;
use crate::session::SessionService;
use crate::shared::{AppError, AppState};

/// HTTP handler for registering a new user
///
/// POST /api/users
#[instrument(name = "create_user", skip(state, request))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let service = UserService::new(Arc::clone(&state.user_repository));
    let user = service.register(&request.email, &request.password).await?;

    info!(user_id = %user.id, "User created successfully");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// HTTP handler for logging in
///
/// POST /api/login
/// Returns the user along with a short-lived access token and a long-lived
/// refresh token.
#[instrument(name = "login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let users = UserService::new(Arc::clone(&state.user_repository));
    let user = users.authenticate(&request.email, &request.password).await?;

    let token = state.token_config.issue(user.id)?;

    let sessions = SessionService::new(
        Arc::clone(&state.refresh_token_repository),
        state.token_config.clone(),
    );
    let refresh_token = sessions.issue_refresh_token(user.id).await?;

    info!(user_id = %user.id, "Login successful");

    Ok(Json(LoginResponse {
        user: user.into(),
        token,
        refresh_token: refresh_token.token,
    }))
}

/// HTTP handler for replacing the caller's email and password
///
/// PUT /api/users (requires a valid access token)
#[instrument(name = "update_user", skip(state, request))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let service = UserService::new(Arc::clone(&state.user_repository));
    let user = service
        .update_credentials(user_id, &request.email, &request.password)
        .await?;

    info!(user_id = %user.id, "User updated successfully");

    Ok(Json(user.into()))
}

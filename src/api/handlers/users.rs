/*
 * Responsibility
 * - /users 系 handler
 * - GET は認証済みユーザー自身を返す / POST は公開の登録エンドポイント
 */
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::dto::users::{CreateUserRequest, UserResponse},
    api::extractors::CurrentUserExtractor,
    error::AppError,
    repos::user_repo::NewUser,
    services::password,
    state::AppState,
};

/// GET /api/users. Returns the authenticated user's own record.
pub async fn get_current_user(
    CurrentUserExtractor(user): CurrentUserExtractor,
) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.id,
        name: format!("{} {}", user.first_name, user.last_name),
        email_address: user.email_address,
    })
}

/// POST /api/users. Public registration: 201 with `Location: /`, no body.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(AppError::Validation)?;

    // The plaintext password only exists between here and the hasher.
    let password_hash = password::hash(&req.password).map_err(|err| {
        tracing::error!(error = ?err, "password hashing failed");
        AppError::Internal
    })?;

    state
        .users
        .create(NewUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email_address: req.email_address,
            password_hash,
        })
        .await?;

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}

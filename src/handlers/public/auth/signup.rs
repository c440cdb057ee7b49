// handlers/public/auth/signup.rs - POST /auth/signup/ handler

use axum::extract::State;

use crate::api::validate::validate_signup;
use crate::api::UserView;
use crate::auth::hash_password;
use crate::database::models::NewUser;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

/// POST /auth/signup/ - Register a new user account
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Responds `201 {"username": "..."}`. A taken username is a 400 with a
/// `username` field error and no second account is created.
pub async fn signup_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<UserView> {
    let input = validate_signup(&body)?;

    if state.store.users.find_by_username(&input.username).await?.is_some() {
        tracing::info!("Signup rejected: username '{}' already taken", input.username);
        return Err(username_taken());
    }

    let password_hash = hash_password(&input.password)?;
    let user = state
        .store
        .users
        .create(NewUser {
            username: input.username,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent signup for the same name
            DatabaseError::Duplicate(_) => username_taken(),
            other => other.into(),
        })?;

    tracing::info!("Created user '{}' ({})", user.username, user.id);
    Ok(ApiResponse::created(UserView::from(&user)))
}

fn username_taken() -> ApiError {
    ApiError::field("username", "A user with that username already exists.")
}

// handlers/public/auth/login.rs - POST /auth/login/ handler

use axum::extract::State;

use crate::api::validate::validate_credentials;
use crate::auth::{verify_password, TokenPair};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

const BAD_CREDENTIALS: &str = "No active account found with the given credentials";

/// POST /auth/login/ - Exchange a username/password for a token pair
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "refresh": "eyJhbGciOiJIUzI1NiI...", "access": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Unknown users and wrong passwords both answer 401 with the same message.
pub async fn login_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<TokenPair> {
    let credentials = validate_credentials(&body)?;

    let user = match state.store.users.find_by_username(&credentials.username).await? {
        Some(user) if verify_password(&credentials.password, &user.password_hash) => user,
        _ => {
            tracing::info!("Failed login for '{}'", credentials.username);
            return Err(ApiError::unauthorized(BAD_CREDENTIALS));
        }
    };

    let pair = state.tokens.issue_pair(&user)?;
    tracing::info!("Issued token pair for '{}'", user.username);
    Ok(ApiResponse::success(pair))
}

// handlers/public/auth/refresh.rs - POST /auth/token/refresh/ handler

use axum::extract::State;
use serde::Serialize;

use crate::api::validate::validate_refresh;
use crate::auth::TokenKind;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// POST /auth/token/refresh/ - Trade a refresh token for a new access token
///
/// Expected Input:
/// ```json
/// { "refresh": "string" }
/// ```
///
/// The refresh token itself is not rotated. Access tokens, expired tokens and
/// tokens of deleted users are refused with 401.
pub async fn refresh_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<RefreshResponse> {
    let refresh = validate_refresh(&body)?;
    let claims = state.tokens.verify(&refresh, TokenKind::Refresh)?;

    if state.store.users.find_by_id(claims.sub).await?.is_none() {
        return Err(ApiError::unauthorized("Token is invalid or expired"));
    }

    let access = state.tokens.issue_access(claims.sub, &claims.username)?;
    Ok(ApiResponse::success(RefreshResponse { access }))
}

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::TokenKind;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Bearer authentication for routes declared `Access::RequiresAuth`.
///
/// Runs before the handler and its extractors, so an unauthenticated request
/// never reaches body parsing or storage.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = state.tokens.verify(token, TokenKind::Access).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::unauthorized("Given token not valid for any token type")
    })?;

    // The account must still exist for its tokens to be honoured
    let user = state
        .store
        .users
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for unknown user {} rejected", claims.sub);
            ApiError::unauthorized("User not found")
        })?;

    request.extensions_mut().insert(AuthUser {
        user_id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or("Authentication credentials were not provided.")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() || token.contains(' ') {
                return Err("Invalid Authorization header. Expected 'Bearer <token>'");
            }
            Ok(token)
        }
        _ => Err("Authorization header must use Bearer token format"),
    }
}

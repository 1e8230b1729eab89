use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Extension type to store the resolved caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Middleware that validates bearer tokens and attaches the active user to the request
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let user = state
        .user_service
        .resolve_identity(token)
        .await
        .map_err(|e| {
            match &e {
                UserError::InvalidToken(reason) => {
                    tracing::warn!(reason = %reason, "Token validation failed")
                }
                UserError::UnknownOrDisabledIdentity => {
                    tracing::warn!("Token presented for unknown or disabled user")
                }
                other => tracing::error!(error = %other, "Identity resolution failed"),
            }
            ApiError::from(e).into_response()
        })?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

/// Middleware that admits only administrators. Must run after [`authenticate`].
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let AuthenticatedUser(user) = req
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| unauthorized("Missing authenticated user"))?;

    state.user_service.authorize_admin(user).map_err(|e| {
        tracing::warn!(user_id = %user.id, role = %user.role, "Admin route denied");
        ApiError::from(e).into_response()
    })?;

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
        })
}

//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Require a valid token on mutating API requests
///
/// Applied once at router level. Skipped for:
///
/// - `GET`, `HEAD`, `OPTIONS` (reads and CORS preflight)
/// - paths outside `/api/` (health, unknown routes keep their 404)
///
/// The token is read from `Authorization: Bearer <token>`, falling back to
/// a `token` cookie. On success [`CurrentUser`] is inserted into the
/// request extensions.
///
/// | Failure | Response |
/// |---------|----------|
/// | no token | 401 NotAuthenticated |
/// | expired | 401 TokenExpired |
/// | anything else | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let is_read = matches!(
        *req.method(),
        http::Method::GET | http::Method::HEAD | http::Method::OPTIONS
    );
    if is_read || !req.uri().path().starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, req.headers(), req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Validate the request's token and build the caller
pub(crate) fn authenticate(
    state: &ServerState,
    headers: &HeaderMap,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let token = match token_from_headers(headers)? {
        Some(token) => token,
        None => {
            security_log!("WARN", "auth_missing", uri = uri.to_string());
            return Err(AppError::unauthorized());
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => Ok(CurrentUser::from(claims)),
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = uri.to_string()
            );
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

fn token_from_headers(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    if let Some(header) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        return JwtService::extract_from_header(header)
            .map(Some)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"));
    }

    Ok(headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(JwtService::extract_from_cookie))
}

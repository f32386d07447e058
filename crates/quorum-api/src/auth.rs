//! Request-scoped credential extraction and the auth middleware.
//!
//! Clients present their session token either as the `quorum_session`
//! cookie (the browser path) or as a bearer token (the CLI path); the
//! cookie wins when both are present. The resolved fixture user is
//! attached to the request as a [`Requester`] extension.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use quorum_core::auth::{Requester, SESSION_COOKIE};

use crate::error::AppError;
use crate::routes::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_session_token(request.headers())?;
    let user = state
        .store
        .user_by_session_token(&token)
        .await
        .ok_or_else(|| AppError::unauthorized("Session is not valid"))?;
    request.extensions_mut().insert(Requester::from(&user));
    Ok(next.run(request).await)
}

pub fn extract_session_token(headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(token) = cookie_value(headers, SESSION_COOKIE)? {
        return Ok(token);
    }
    if let Some(token) = bearer_token(headers)? {
        return Ok(token);
    }
    Err(AppError::unauthorized("Missing session credentials"))
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Result<Option<String>, AppError> {
    let Some(header) = headers.get(header::COOKIE) else {
        return Ok(None);
    };
    let header = header
        .to_str()
        .map_err(|_| AppError::unauthorized("Cookie header is not valid UTF-8"))?;

    let token = header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty());
    Ok(token)
}

fn bearer_token(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    let Some(header) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let header = header
        .to_str()
        .map_err(|_| AppError::unauthorized("Authorization header is not valid UTF-8"))?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or_else(|| AppError::unauthorized("Authorization header must be `Bearer <token>`"))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::unauthorized(
            "Authorization scheme must be `Bearer`",
        ));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::unauthorized("Bearer token must not be empty"));
    }
    Ok(Some(token.to_string()))
}

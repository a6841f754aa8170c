use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::COOKIE, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::{claims::Identity, jwt::JwtKeys};
use crate::users::errors::UserError;

/// Cookie holding the signed access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Value of the first non-empty cookie called `name` across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, v)| *k == name && !v.is_empty())
        .map(|(_, v)| v.trim_matches('"'))
}

/// Gate for protected routes: verifies the access token cookie and attaches
/// the caller's [`Identity`]. Every failure is the same bare 403.
pub async fn authorize(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, UserError> {
    let token = cookie_value(req.headers(), ACCESS_TOKEN_COOKIE).ok_or(UserError::Forbidden)?;

    let claims = keys.verify(token).map_err(|e| {
        warn!(error = %e, "access token rejected");
        UserError::Forbidden
    })?;

    req.extensions_mut().insert(Identity::from(claims));
    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = UserError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(UserError::Forbidden)
    }
}

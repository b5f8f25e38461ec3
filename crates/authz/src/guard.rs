//! The `CurrentUser` extractor: session cookie or bearer token → identity.

use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use uuid::Uuid;

use folio_http::AppError;

use crate::AuthContext;

/// The authenticated caller, resolved before a handler runs.
///
/// Extraction fails with 401 when no credential is attached or the session
/// has expired, so handlers only ever see a valid identity.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow!("auth context not configured")))?;

        let token = credential_token(&parts.headers, &ctx.cookie_name)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let user = ctx
            .resolve_token(&token)
            .ok_or_else(|| AppError::unauthorized("Session expired or invalid"))?;

        Ok(Self {
            id: user.id,
            username: user.username,
            email: user.email,
        })
    }
}

/// Extract the session token from either an `Authorization: Bearer` header
/// or the session cookie, preferring the header.
pub fn credential_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(headers, cookie_name))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

fn cookie_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, token)) = pair.trim().split_once('=') {
                if name == cookie_name {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            name.parse::<header::HeaderName>().unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers_with("authorization", "Bearer abc-123");
        assert_eq!(bearer_token(&headers), Some("abc-123".to_string()));
    }

    #[test]
    fn non_bearer_authorization_is_ignored() {
        let headers = headers_with("authorization", "Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        let headers = headers_with("cookie", "theme=dark; folio_session=tok-42; lang=en");
        assert_eq!(
            cookie_token(&headers, "folio_session"),
            Some("tok-42".to_string())
        );
    }

    #[test]
    fn missing_cookie_yields_none() {
        let headers = headers_with("cookie", "theme=dark");
        assert_eq!(cookie_token(&headers, "folio_session"), None);
    }
}

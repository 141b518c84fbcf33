//! Credential resolution from request headers.
//!
//! A request may carry its token in the `Authorization: Bearer` header or in
//! the session cookie set at login. Sources are tried in order and the first
//! one that yields a token wins.

use cookie::Cookie;
use http::HeaderMap;
use http::header::{AUTHORIZATION, COOKIE};

use gatekeeper_core::error::{AppError, ErrorCode};

/// Somewhere a bearer token can be found on a request.
pub trait CredentialSource: Send + Sync + std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The raw token, if this source has one.
    fn extract(&self, headers: &HeaderMap) -> Option<String>;
}

/// `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationHeader;

impl CredentialSource for AuthorizationHeader {
    fn name(&self) -> &'static str {
        "authorization"
    }

    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
        let (scheme, token) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}

/// The session cookie set by login.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
}

impl SessionCookie {
    /// Reads the cookie with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl CredentialSource for SessionCookie {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| Cookie::split_parse(value))
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == self.name && !cookie.value().is_empty())
            .map(|cookie| cookie.value().to_string())
    }
}

/// Ordered list of credential sources.
#[derive(Debug)]
pub struct CredentialChain {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialChain {
    /// A chain over the given sources, tried in order.
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    /// Bearer header first, then the named session cookie.
    pub fn standard(cookie_name: &str) -> Self {
        Self::new(vec![
            Box::new(AuthorizationHeader),
            Box::new(SessionCookie::new(cookie_name)),
        ])
    }

    /// The first token any source yields, or `MissingCredentials`.
    pub fn resolve(&self, headers: &HeaderMap) -> Result<String, AppError> {
        for source in &self.sources {
            if let Some(token) = source.extract(headers) {
                tracing::trace!(source = source.name(), "Resolved credential");
                return Ok(token);
            }
        }
        Err(AppError::coded(
            ErrorCode::MissingCredentials,
            "Missing authentication token",
        ))
    }
}

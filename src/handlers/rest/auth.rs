//! Caller identity.
//!
//! The token is taken from the `accessToken` cookie, falling back to an
//! `Authorization: Bearer` header, and resolved to a user id through an
//! [`IdentityResolver`].

use std::collections::HashMap;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use tracing::debug;

use super::error::ApiError;
use super::AppState;
use crate::config::AuthConfig;

const TOKEN_COOKIE: &str = "accessToken";
const BEARER_PREFIX: &str = "Bearer ";

/// Maps a presented access token to a user id.
pub trait IdentityResolver: Send + Sync + 'static {
    /// Returns `None` for unknown or invalid tokens.
    fn resolve(&self, token: &str) -> Option<String>;
}

/// Resolver over a fixed token table.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, String>,
}

impl StaticTokenResolver {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        let tokens = config
            .tokens
            .iter()
            .map(|entry| (entry.token.clone(), entry.user_id.clone()))
            .collect();
        Self { tokens }
    }
}

impl IdentityResolver for StaticTokenResolver {
    fn resolve(&self, token: &str) -> Option<String> {
        self.tokens.get(token).cloned()
    }
}

/// Id of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts).ok_or(ApiError::Unauthorized("Unauthorized request"))?;

        match state.resolver.resolve(&token) {
            Some(user_id) => Ok(AuthenticatedUser(user_id)),
            None => {
                debug!("rejected unknown access token");
                Err(ApiError::Unauthorized("Invalid access token"))
            }
        }
    }
}

fn extract_token(parts: &Parts) -> Option<String> {
    cookie_token(parts).or_else(|| bearer_token(parts))
}

fn cookie_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

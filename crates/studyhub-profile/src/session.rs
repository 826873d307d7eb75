//! Session lookup.
//!
//! The access token is read from the request (bearer header or the
//! supabase-js auth cookie) and handed to an [`AuthProvider`], which decides
//! whether it belongs to a live session.

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum_extra::extract::cookie::CookieJar;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::BackendError;

/// An authenticated session. Only its presence matters to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    /// Auth user ID.
    #[serde(rename = "id")]
    pub user_id: Uuid,
    /// Email on the auth account, if any.
    #[serde(default)]
    pub email: Option<String>,
}

/// Source of truth for "is this visitor signed in".
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Return the session for `access_token`, or `None` if the token is not
    /// (or no longer) valid.
    async fn current_session(
        &self,
        access_token: &str,
    ) -> Result<Option<Session>, BackendError>;
}

/// Extract the visitor's access token from request headers.
///
/// Checks `Authorization: Bearer <token>` first, then the auth cookie named
/// `cookie_name` (including chunked `<name>.0`, `<name>.1`, ... cookies).
pub fn access_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    let jar = CookieJar::from_headers(headers);
    let raw = cookie_value(&jar, cookie_name)?;
    let token = decode_cookie_value(&raw);
    if token.is_none() {
        tracing::debug!(cookie = %cookie_name, "auth cookie present but undecodable");
    }
    token
}

/// Read a cookie by name, reassembling chunked cookies if needed.
fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    if let Some(cookie) = jar.get(name) {
        return Some(cookie.value().trim_matches('"').to_string());
    }

    let mut joined = String::new();
    for index in 0.. {
        match jar.get(&format!("{name}.{index}")) {
            Some(chunk) => joined.push_str(chunk.value().trim_matches('"')),
            None => break,
        }
    }

    (!joined.is_empty()).then_some(joined)
}

/// Stored session shapes written by supabase-js.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSession {
    Object { access_token: String },
    Legacy(Vec<serde_json::Value>),
}

/// Decode an auth cookie value into its access token.
fn decode_cookie_value(raw: &str) -> Option<String> {
    let json = if let Some(encoded) = raw.strip_prefix("base64-") {
        let encoded = encoded.trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .or_else(|_| STANDARD_NO_PAD.decode(encoded))
            .ok()?;
        String::from_utf8(bytes).ok()?
    } else if raw.starts_with('%') {
        urlencoding::decode(raw).ok()?.into_owned()
    } else {
        raw.to_string()
    };

    let token = match serde_json::from_str::<StoredSession>(&json).ok()? {
        StoredSession::Object { access_token } => access_token,
        StoredSession::Legacy(parts) => parts.first()?.as_str()?.to_string(),
    };

    (!token.is_empty()).then_some(token)
}

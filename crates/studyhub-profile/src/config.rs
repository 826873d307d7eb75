//! Application configuration loaded from environment variables.

use std::time::Duration;

use anyhow::Context;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8082").
    pub bind_addr: String,

    /// Supabase project URL, without a trailing slash.
    pub supabase_url: String,

    /// Public anon key, sent as the `apikey` header on every backend call.
    pub supabase_anon_key: String,

    /// Base URL for this service (used in canonical URLs and OG tags).
    pub base_url: String,

    /// Site name shown in page titles and OG tags.
    pub site_name: String,

    /// Path the "sign in" prompt links to.
    pub sign_in_path: String,

    /// Name of the cookie holding the Supabase session.
    pub auth_cookie: String,

    /// Timeout applied to every backend HTTP request.
    pub backend_timeout: Duration,

    /// Surface query failures as errors instead of treating them as empty results.
    pub strict_queries: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_ANON_KEY`: public anon key for the project
    ///
    /// Optional:
    /// - `PROFILE_BIND_ADDR`: Server bind address (default: "0.0.0.0:8082")
    /// - `SUPABASE_URL`: Project URL (default: "http://localhost:54321")
    /// - `PROFILE_BASE_URL`: Base URL for links/OG tags (default: "http://localhost:8082")
    /// - `PROFILE_SITE_NAME`: Site name (default: "StudyHub")
    /// - `PROFILE_SIGN_IN_PATH`: Sign-in link target (default: "/login")
    /// - `SUPABASE_AUTH_COOKIE`: Session cookie name (default: `sb-<project-ref>-auth-token`)
    /// - `SUPABASE_TIMEOUT_SECS`: Backend request timeout (default: 10)
    /// - `PROFILE_STRICT_QUERIES`: Fail requests on query errors (default: false)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("PROFILE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8082".to_string());

        let supabase_url = std::env::var("SUPABASE_URL")
            .unwrap_or_else(|_| "http://localhost:54321".to_string())
            .trim_end_matches('/')
            .to_string();

        let supabase_anon_key = std::env::var("SUPABASE_ANON_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow::anyhow!("SUPABASE_ANON_KEY environment variable is required"))?;

        let base_url = std::env::var("PROFILE_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8082".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name =
            std::env::var("PROFILE_SITE_NAME").unwrap_or_else(|_| "StudyHub".to_string());

        let sign_in_path =
            std::env::var("PROFILE_SIGN_IN_PATH").unwrap_or_else(|_| "/login".to_string());

        let auth_cookie = match std::env::var("SUPABASE_AUTH_COOKIE") {
            Ok(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => default_auth_cookie(&supabase_url)?,
        };

        let timeout_secs = match std::env::var("SUPABASE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SUPABASE_TIMEOUT_SECS is not a number: {raw:?}"))?,
            Err(_) => 10,
        };

        let strict_queries = match std::env::var("PROFILE_STRICT_QUERIES") {
            Ok(raw) => parse_bool(&raw)
                .with_context(|| format!("PROFILE_STRICT_QUERIES is not a boolean: {raw:?}"))?,
            Err(_) => false,
        };

        tracing::info!(
            bind_addr = %bind_addr,
            supabase_url = %supabase_url,
            base_url = %base_url,
            site_name = %site_name,
            auth_cookie = %auth_cookie,
            timeout_secs,
            strict_queries,
            "profile configuration loaded"
        );

        Ok(Self {
            bind_addr,
            supabase_url,
            supabase_anon_key,
            base_url,
            site_name,
            sign_in_path,
            auth_cookie,
            backend_timeout: Duration::from_secs(timeout_secs),
            strict_queries,
        })
    }
}

/// Derive the cookie name supabase-js uses: `sb-<first host label>-auth-token`.
fn default_auth_cookie(supabase_url: &str) -> anyhow::Result<String> {
    let parsed = url::Url::parse(supabase_url)
        .with_context(|| format!("SUPABASE_URL is not a valid URL: {supabase_url:?}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("SUPABASE_URL has no host: {supabase_url:?}"))?;
    let project_ref = host.split('.').next().unwrap_or(host);
    Ok(format!("sb-{project_ref}-auth-token"))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

//! Supabase client: GoTrue for sessions, PostgREST for rows.
//!
//! All calls are anonymous reads authorized by the project's anon key, so
//! row-level security decides what is visible.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::error::BackendError;
use crate::query::{ProfileStore, Resource, StudyGroup, UserProfile};
use crate::session::{AuthProvider, Session};

/// HTTP client for one Supabase project.
#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    client: Client,
}

impl SupabaseClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.backend_timeout)
            .user_agent(concat!("studyhub-profile/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            client,
        })
    }

    /// Attach the project key headers to a request.
    fn authorized(&self, request: RequestBuilder, bearer: &str) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    /// Run a PostgREST select against `table` and decode the rows.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, BackendError> {
        let url = format!("{}/rest/v1/{table}", self.base_url);

        debug!(table = %table, ?params, "postgrest select");

        let resp = self
            .authorized(self.client.get(&url), &self.anon_key)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn current_session(
        &self,
        access_token: &str,
    ) -> Result<Option<Session>, BackendError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let resp = self
            .authorized(self.client.get(&url), access_token)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!(status = %status, "access token rejected");
            return Ok(None);
        }

        let body = resp.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Some(serde_json::from_str(&body)?))
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn profile_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, BackendError> {
        let rows = self
            .select::<UserProfile>(PROFILES_TABLE, &profile_exact_params(username))
            .await?;

        Ok(rows.into_iter().next())
    }

    async fn profile_by_username_ci(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, BackendError> {
        let rows = self
            .select::<UserProfile>(PROFILES_TABLE, &profile_ci_params(username))
            .await?;

        Ok(rows.into_iter().next())
    }

    async fn public_resources(
        &self,
        author_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Resource>, BackendError> {
        self.select(RESOURCES_TABLE, &resources_params(author_id, limit)).await
    }

    async fn public_study_groups(
        &self,
        creator_id: Uuid,
        limit: usize,
    ) -> Result<Vec<StudyGroup>, BackendError> {
        self.select(STUDY_GROUPS_TABLE, &study_groups_params(creator_id, limit)).await
    }
}

const PROFILES_TABLE: &str = "user_profiles";
const RESOURCES_TABLE: &str = "resources";
const STUDY_GROUPS_TABLE: &str = "study_groups";

type Params = Vec<(&'static str, String)>;

fn profile_exact_params(username: &str) -> Params {
    vec![
        ("select", "*".to_string()),
        ("username", format!("eq.{username}")),
        ("limit", "1".to_string()),
    ]
}

/// Case-insensitive equality via an anchored `imatch` regex. Unlike
/// `ilike`, PostgREST passes the pattern through without rewriting `*`.
fn profile_ci_params(username: &str) -> Params {
    vec![
        ("select", "*".to_string()),
        ("username", format!("imatch.^{}$", escape_regex(username))),
        ("order", "username.asc".to_string()),
        ("limit", "1".to_string()),
    ]
}

/// Approved resources only, newest first.
fn resources_params(author_id: Uuid, limit: usize) -> Params {
    vec![
        ("select", "*".to_string()),
        ("author_id", format!("eq.{author_id}")),
        ("is_approved", "eq.true".to_string()),
        ("order", "created_at.desc".to_string()),
        ("limit", limit.to_string()),
    ]
}

/// Non-private groups only, newest first.
fn study_groups_params(creator_id: Uuid, limit: usize) -> Params {
    vec![
        ("select", "*".to_string()),
        ("created_by", format!("eq.{creator_id}")),
        ("is_private", "eq.false".to_string()),
        ("order", "created_at.desc".to_string()),
        ("limit", limit.to_string()),
    ]
}

/// Escape POSIX regex metacharacters so the pattern matches `value` literally.
fn escape_regex(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    // -- escape_regex() --

    #[test]
    fn escape_regex_plain() {
        assert_eq!(escape_regex("JaneDoe"), "JaneDoe");
        assert_eq!(escape_regex("jane_doe"), "jane_doe");
    }

    #[test]
    fn escape_regex_metacharacters() {
        assert_eq!(escape_regex("a*b"), "a\\*b");
        assert_eq!(escape_regex("j.doe"), "j\\.doe");
        assert_eq!(escape_regex("(x)|[y]"), "\\(x\\)\\|\\[y\\]");
        assert_eq!(escape_regex("^a$"), "\\^a\\$");
        assert_eq!(escape_regex("a\\b"), "a\\\\b");
    }

    #[test]
    fn escape_regex_empty() {
        assert_eq!(escape_regex(""), "");
    }

    // -- profile lookups --

    #[test]
    fn exact_lookup_uses_eq() {
        let params = profile_exact_params("Alice");
        assert_eq!(param(&params, "username"), Some("eq.Alice"));
        assert_eq!(param(&params, "limit"), Some("1"));
    }

    #[test]
    fn case_insensitive_lookup_is_anchored() {
        let params = profile_ci_params("Alice");
        assert_eq!(param(&params, "username"), Some("imatch.^Alice$"));
        assert_eq!(param(&params, "order"), Some("username.asc"));
        assert_eq!(param(&params, "limit"), Some("1"));
    }

    #[test]
    fn case_insensitive_lookup_escapes_star() {
        let params = profile_ci_params("a*b");
        assert_eq!(param(&params, "username"), Some("imatch.^a\\*b$"));
    }

    // -- list queries --

    #[test]
    fn resources_only_approved_newest_first() {
        let author = Uuid::from_u128(1);
        let params = resources_params(author, 3);
        assert_eq!(
            param(&params, "author_id"),
            Some("eq.00000000-0000-0000-0000-000000000001")
        );
        assert_eq!(param(&params, "is_approved"), Some("eq.true"));
        assert_eq!(param(&params, "order"), Some("created_at.desc"));
        assert_eq!(param(&params, "limit"), Some("3"));
    }

    #[test]
    fn study_groups_only_public_newest_first() {
        let creator = Uuid::from_u128(2);
        let params = study_groups_params(creator, 3);
        assert_eq!(
            param(&params, "created_by"),
            Some("eq.00000000-0000-0000-0000-000000000002")
        );
        assert_eq!(param(&params, "is_private"), Some("eq.false"));
        assert_eq!(param(&params, "order"), Some("created_at.desc"));
        assert_eq!(param(&params, "limit"), Some("3"));
    }

    #[test]
    fn list_limit_passed_through() {
        assert_eq!(param(&resources_params(Uuid::nil(), 7), "limit"), Some("7"));
        assert_eq!(
            param(&study_groups_params(Uuid::nil(), 0), "limit"),
            Some("0")
        );
    }
}

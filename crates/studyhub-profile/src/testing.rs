//! In-memory backend for tests.
//!
//! Implements both [`AuthProvider`] and [`ProfileStore`] over plain vectors
//! and records every call so tests can assert on query counts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::error::BackendError;
use crate::query::{ProfileStore, Resource, StudyGroup, UserProfile};
use crate::session::{AuthProvider, Session};
use crate::state::AppState;

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Session(String),
    ProfileExact(String),
    ProfileCaseInsensitive(String),
    Resources(Uuid),
    StudyGroups(Uuid),
}

impl Call {
    fn kind(&self) -> CallKind {
        match self {
            Self::Session(_) => CallKind::Session,
            Self::ProfileExact(_) => CallKind::ProfileExact,
            Self::ProfileCaseInsensitive(_) => CallKind::ProfileCaseInsensitive,
            Self::Resources(_) => CallKind::Resources,
            Self::StudyGroups(_) => CallKind::StudyGroups,
        }
    }
}

/// Call kinds that can be configured to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Session,
    ProfileExact,
    ProfileCaseInsensitive,
    Resources,
    StudyGroups,
}

#[derive(Default)]
pub struct MemoryBackend {
    pub profiles: Vec<UserProfile>,
    pub resources: Vec<Resource>,
    pub study_groups: Vec<StudyGroup>,
    /// Valid access tokens.
    pub sessions: HashMap<String, Session>,
    /// Calls of these kinds return a 500 error.
    pub failing: Vec<CallKind>,
    calls: Mutex<Vec<Call>>,
}

impl MemoryBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of row queries (everything except session lookups).
    pub fn data_queries(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.kind() != CallKind::Session)
            .count()
    }

    fn record(&self, call: Call) -> Result<(), BackendError> {
        let kind = call.kind();
        self.calls.lock().unwrap().push(call);
        if self.failing.contains(&kind) {
            return Err(BackendError::Status {
                status: 500,
                body: format!("{kind:?} unavailable"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for MemoryBackend {
    async fn current_session(
        &self,
        access_token: &str,
    ) -> Result<Option<Session>, BackendError> {
        self.record(Call::Session(access_token.to_string()))?;
        Ok(self.sessions.get(access_token).cloned())
    }
}

#[async_trait]
impl ProfileStore for MemoryBackend {
    async fn profile_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, BackendError> {
        self.record(Call::ProfileExact(username.to_string()))?;
        Ok(self
            .profiles
            .iter()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn profile_by_username_ci(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, BackendError> {
        self.record(Call::ProfileCaseInsensitive(username.to_string()))?;
        let wanted = username.to_lowercase();
        let mut matches: Vec<_> = self
            .profiles
            .iter()
            .filter(|p| p.username.to_lowercase() == wanted)
            .collect();
        matches.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(matches.first().map(|p| (*p).clone()))
    }

    async fn public_resources(
        &self,
        author_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Resource>, BackendError> {
        self.record(Call::Resources(author_id))?;
        let mut rows: Vec<_> = self
            .resources
            .iter()
            .filter(|r| r.author_id == author_id && r.is_approved)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn public_study_groups(
        &self,
        creator_id: Uuid,
        limit: usize,
    ) -> Result<Vec<StudyGroup>, BackendError> {
        self.record(Call::StudyGroups(creator_id))?;
        let mut rows: Vec<_> = self
            .study_groups
            .iter()
            .filter(|g| g.created_by == creator_id && !g.is_private)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit);
        Ok(rows)
    }
}

pub fn test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        supabase_url: "http://localhost:54321".to_string(),
        supabase_anon_key: "anon".to_string(),
        base_url: "https://studyhub.example".to_string(),
        site_name: "StudyHub".to_string(),
        sign_in_path: "/login".to_string(),
        auth_cookie: "sb-localhost-auth-token".to_string(),
        backend_timeout: Duration::from_secs(1),
        strict_queries: false,
    }
}

/// Build app state backed by `backend` for both auth and rows.
pub fn state_with(config: Config, backend: &Arc<MemoryBackend>) -> AppState {
    AppState::with_backend(config, backend.clone(), backend.clone())
}

/// Deterministic UUID from a small integer.
pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// Timestamp `day` days into 2024.
pub fn day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
}

pub fn profile(n: u128, username: &str, full_name: Option<&str>) -> UserProfile {
    UserProfile {
        id: id(n),
        username: username.to_string(),
        full_name: full_name.map(str::to_string),
        avatar_url: None,
        university: None,
        major: None,
        bio: None,
    }
}

pub fn resource(n: u128, author: u128, approved: bool, created: u32) -> Resource {
    Resource {
        id: id(n),
        author_id: id(author),
        is_approved: approved,
        created_at: day(created),
        title: Some(format!("Resource {n}")),
        description: None,
        subject: None,
        resource_type: None,
    }
}

pub fn study_group(n: u128, creator: u128, private: bool, created: u32) -> StudyGroup {
    StudyGroup {
        id: id(n),
        created_by: id(creator),
        is_private: private,
        created_at: day(created),
        name: Some(format!("Group {n}")),
        description: None,
        subject: None,
    }
}

pub fn session(n: u128) -> Session {
    Session {
        user_id: id(n),
        email: None,
    }
}

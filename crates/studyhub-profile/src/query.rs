//! Row types and the read-only query interface for profile data.
//!
//! Every query is a point lookup or a small filtered list, so implementations
//! are expected to answer from an index in one round trip.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BackendError;

/// Maximum number of resources and study groups shown on a profile.
pub const PUBLIC_LIST_LIMIT: usize = 3;

/// A row from the `user_profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
    /// Profile ID (matches the auth user ID).
    pub id: Uuid,
    /// Unique username. Stored case-sensitively.
    pub username: String,
    /// Full display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// University name.
    #[serde(default)]
    pub university: Option<String>,
    /// Field of study.
    #[serde(default)]
    pub major: Option<String>,
    /// Short biography.
    #[serde(default)]
    pub bio: Option<String>,
}

impl UserProfile {
    /// Name to show in the header: `full_name`, else `username`.
    pub fn display_name(&self) -> &str {
        non_empty(&self.full_name).unwrap_or(&self.username)
    }

    /// Two-character upper-cased avatar fallback.
    pub fn initials(&self) -> String {
        self.display_name()
            .chars()
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn university(&self) -> Option<&str> {
        non_empty(&self.university)
    }

    pub fn major(&self) -> Option<&str> {
        non_empty(&self.major)
    }

    pub fn bio(&self) -> Option<&str> {
        non_empty(&self.bio)
    }
}

/// A row from the `resources` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    /// Resource ID.
    pub id: Uuid,
    /// Profile ID of the author.
    pub author_id: Uuid,
    /// Only approved resources are public.
    pub is_approved: bool,
    /// Upload time; lists are ordered newest first.
    pub created_at: DateTime<Utc>,
    /// Resource title.
    #[serde(default)]
    pub title: Option<String>,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Course or subject the resource belongs to.
    #[serde(default)]
    pub subject: Option<String>,
    /// Kind of resource (e.g. "notes", "past paper").
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// A row from the `study_groups` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudyGroup {
    /// Group ID.
    pub id: Uuid,
    /// Profile ID of the creator.
    pub created_by: Uuid,
    /// Private groups are never shown on public profiles.
    pub is_private: bool,
    /// Creation time; lists are ordered newest first.
    pub created_at: DateTime<Utc>,
    /// Group name.
    #[serde(default)]
    pub name: Option<String>,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Subject the group studies.
    #[serde(default)]
    pub subject: Option<String>,
}

/// Read-only access to profile rows.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Find a profile whose username equals `username` exactly.
    async fn profile_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, BackendError>;

    /// Find a profile whose username equals `username` ignoring case.
    async fn profile_by_username_ci(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, BackendError>;

    /// Approved resources by `author_id`, newest first, at most `limit` rows.
    async fn public_resources(
        &self,
        author_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Resource>, BackendError>;

    /// Non-private study groups created by `creator_id`, newest first, at most `limit` rows.
    async fn public_study_groups(
        &self,
        creator_id: Uuid,
        limit: usize,
    ) -> Result<Vec<StudyGroup>, BackendError>;
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

//! Username resolution.
//!
//! Turns the raw `/{username}` path parameter into one of three outcomes:
//! a redirect for signed-in visitors, a not-found page, or a profile with its
//! public resources and study groups.

use crate::error::{BackendError, ProfileError};
use crate::query::{PUBLIC_LIST_LIMIT, Resource, StudyGroup, UserProfile};
use crate::state::AppState;

/// Dashboard route that signed-in visitors are sent to.
const DASHBOARD_PROFILE_PATH: &str = "/dashboard/public-profile";

/// Outcome of resolving a profile request.
#[derive(Debug)]
pub enum Resolution {
    /// Visitor is signed in; send them to the dashboard view.
    Redirect {
        /// Target path, already percent-encoded.
        location: String,
    },

    /// No profile matches the username.
    NotFound {
        /// The normalized lookup key.
        username: String,
    },

    /// A public profile to render.
    Profile(Box<ProfilePage>),
}

/// Everything the profile page shows.
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub profile: UserProfile,
    /// Approved resources, newest first.
    pub resources: Vec<Resource>,
    /// Public study groups, newest first.
    pub study_groups: Vec<StudyGroup>,
}

/// Strip a single leading `@`, then trim whitespace.
pub fn normalize_username(raw: &str) -> &str {
    raw.strip_prefix('@').unwrap_or(raw).trim()
}

/// Dashboard path for a raw username parameter, encoded as one path segment.
pub fn dashboard_location(raw: &str) -> String {
    format!("{DASHBOARD_PROFILE_PATH}/{}", urlencoding::encode(raw))
}

/// Resolve a raw username parameter for a visitor holding `access_token`.
///
/// Issues at most five backend calls: one session check, two profile
/// lookups, and the resource and study group queries (run concurrently).
pub async fn resolve(
    state: &AppState,
    raw: &str,
    access_token: Option<&str>,
) -> Result<Resolution, ProfileError> {
    let username = normalize_username(raw);

    if has_session(state, access_token).await {
        let location = dashboard_location(raw);
        tracing::debug!(location = %location, "signed-in visitor, redirecting");
        return Ok(Resolution::Redirect { location });
    }

    let Some(profile) = find_profile(state, username).await? else {
        tracing::debug!(username = %username, "profile not found");
        return Ok(Resolution::NotFound {
            username: username.to_string(),
        });
    };

    let strict = state.config.strict_queries;
    let (resources, study_groups) = tokio::join!(
        state.store.public_resources(profile.id, PUBLIC_LIST_LIMIT),
        state.store.public_study_groups(profile.id, PUBLIC_LIST_LIMIT),
    );
    let mut resources = settle(resources, "resources", strict)?;
    let mut study_groups = settle(study_groups, "study_groups", strict)?;
    resources.truncate(PUBLIC_LIST_LIMIT);
    study_groups.truncate(PUBLIC_LIST_LIMIT);

    Ok(Resolution::Profile(Box::new(ProfilePage {
        profile,
        resources,
        study_groups,
    })))
}

/// Whether the visitor has a live session. Auth failures count as "no".
async fn has_session(state: &AppState, access_token: Option<&str>) -> bool {
    let Some(token) = access_token else {
        return false;
    };

    match state.auth.current_session(token).await {
        Ok(Some(session)) => {
            tracing::debug!(user_id = %session.user_id, "session found");
            true
        }
        Ok(None) => false,
        Err(err) => {
            tracing::warn!(error = %err, "session lookup failed, treating visitor as signed out");
            false
        }
    }
}

/// Exact username match first, case-insensitive match only on a miss.
async fn find_profile(
    state: &AppState,
    username: &str,
) -> Result<Option<UserProfile>, ProfileError> {
    let strict = state.config.strict_queries;

    let exact = settle(
        state.store.profile_by_username(username).await,
        "profile",
        strict,
    )?;
    if exact.is_some() {
        return Ok(exact);
    }

    settle(
        state.store.profile_by_username_ci(username).await,
        "profile_fallback",
        strict,
    )
}

/// Apply the query failure policy: fail in strict mode, otherwise log and
/// continue as if the query returned nothing.
fn settle<T: Default>(
    result: Result<T, BackendError>,
    query: &'static str,
    strict: bool,
) -> Result<T, ProfileError> {
    match result {
        Ok(value) => Ok(value),
        Err(source) if strict => Err(ProfileError::Query { query, source }),
        Err(err) => {
            tracing::warn!(query, error = %err, "query failed, treating as empty");
            Ok(T::default())
        }
    }
}

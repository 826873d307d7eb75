//! StudyHub Profile - server-rendered public profile pages.
//!
//! This crate serves `GET /{username}`: a read-only summary of a user's
//! profile, their latest approved resources, and their public study groups.
//! Data lives in a hosted Supabase project; this service only reads it.
//!
//! # Architecture
//!
//! - **Session**: Extracts the visitor's access token and asks GoTrue whether it is live
//! - **Resolve**: Normalizes the username, redirects signed-in visitors, looks up the profile
//! - **Query**: Row types and the read-only [`query::ProfileStore`] interface
//! - **Supabase**: PostgREST/GoTrue implementation of the backend traits
//! - **Render**: Generates HTML with maud (compile-time templates)
//!
//! # Request flow
//!
//! ```text
//! GET /@Alice
//!   -> session?          yes -> 307 /dashboard/public-profile/%40Alice
//!   -> exact "Alice"     miss
//!   -> imatch "Alice"    hit "alice"
//!   -> resources + study groups (concurrently, 3 each)
//!   -> 200 profile page
//! ```
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - Image URLs are validated (HTTPS/HTTP only) before use in attributes
//! - Strict Content-Security-Policy: no external scripts
//! - X-Frame-Options: DENY prevents clickjacking

pub mod config;
pub mod error;
pub mod query;
pub mod render;
pub mod resolve;
pub mod routes;
pub mod session;
pub mod state;
pub mod supabase;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use routes::router;
pub use state::AppState;

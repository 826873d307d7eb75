//! HTML rendering for profile pages.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).

pub mod cards;
pub mod components;
pub mod profile;

use maud::Markup;

use crate::config::Config;
use crate::resolve::ProfilePage;

/// Render a resolved profile into a complete HTML page.
pub fn render_profile(page: &ProfilePage, config: &Config) -> Markup {
    profile::render(page, config)
}

/// Render the not-found page for a normalized username.
pub fn render_not_found(username: &str, config: &Config) -> Markup {
    profile::not_found(username, config)
}

//! Public profile page and its not-found counterpart.
//!
//! The profile page shows a header (avatar, name, university, major, bio)
//! and two tabs with the user's latest public resources and study groups.

use maud::{Markup, html};

use super::cards::{resource_card, study_group_card};
use super::components::{OpenGraphData, Tab, avatar, empty_state, page_shell, tabs, truncate};
use crate::config::Config;
use crate::resolve::ProfilePage;

/// Render a public profile page.
pub fn render(page: &ProfilePage, config: &Config) -> Markup {
    let profile = &page.profile;
    let name = profile.display_name();
    let title = format!("{name} (@{}) | {}", profile.username, config.site_name);
    let description = match profile.bio() {
        Some(bio) => truncate(bio, 200),
        None => format!("{name}'s public resources and study groups."),
    };
    let canonical = format!(
        "{}/{}",
        config.base_url,
        urlencoding::encode(&profile.username)
    );

    let og = OpenGraphData {
        title: &title,
        description: &description,
        og_type: "profile",
        image: profile
            .avatar_url
            .as_deref()
            .filter(|url| url.starts_with("https://")),
    };

    let resources = html! {
        @if page.resources.is_empty() {
            (empty_state("No public resources yet."))
        } @else {
            div class="card-list" {
                @for resource in &page.resources {
                    (resource_card(resource))
                }
            }
        }
    };

    let study_groups = html! {
        @if page.study_groups.is_empty() {
            (empty_state("No public study groups yet."))
        } @else {
            div class="card-list" {
                @for group in &page.study_groups {
                    (study_group_card(group))
                }
            }
        }
    };

    let sections = tabs(
        "profile-tab",
        vec![
            Tab {
                id: "resources",
                label: "Resources",
                content: resources,
            },
            Tab {
                id: "study-groups",
                label: "Study Groups",
                content: study_groups,
            },
        ],
    );

    let body = html! {
        div class="profile-header" {
            (avatar(profile.avatar_url.as_deref(), name, &profile.initials()))
            div class="profile-info" {
                h1 class="profile-name" { (name) }
                div class="profile-username" { "@" (profile.username) }
                @if let Some(university) = profile.university() {
                    div class="profile-line profile-university" { (university) }
                }
                @if let Some(major) = profile.major() {
                    div class="profile-line profile-major" { (major) }
                }
            }
        }
        @if let Some(bio) = profile.bio() {
            p class="profile-bio" { (bio) }
        }

        (sections)

        div class="signin-prompt" {
            a href=(config.sign_in_path) { "Sign in" }
            " to see everything " (name) " shares and join their study groups."
        }
    };

    page_shell(&title, &description, &canonical, og, body, &config.site_name)
}

/// Render the static page shown when no profile matches.
pub fn not_found(username: &str, config: &Config) -> Markup {
    let title = format!("Profile not found | {}", config.site_name);
    let description = "This profile does not exist or is no longer available.";
    let canonical = format!("{}/{}", config.base_url, urlencoding::encode(username));

    let og = OpenGraphData {
        title: &title,
        description,
        og_type: "website",
        image: None,
    };

    let body = html! {
        div class="not-found" {
            h1 { "Profile not found" }
            p { (description) }
            a href="/" { "Back to " (config.site_name) }
        }
    };

    page_shell(&title, description, &canonical, og, body, &config.site_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{profile, resource, study_group, test_config};

    fn page() -> ProfilePage {
        ProfilePage {
            profile: profile(1, "alice", Some("Alice A")),
            resources: Vec::new(),
            study_groups: Vec::new(),
        }
    }

    #[test]
    fn header_uses_full_name_and_initials() {
        let html = render(&page(), &test_config()).into_string();
        assert!(html.contains(r#"<h1 class="profile-name">Alice A</h1>"#));
        assert!(html.contains(">AL<"));
        assert!(html.contains("@alice"));
    }

    #[test]
    fn header_falls_back_to_username() {
        let mut p = page();
        p.profile.full_name = None;
        let html = render(&p, &test_config()).into_string();
        assert!(html.contains(r#"<h1 class="profile-name">alice</h1>"#));
        assert!(html.contains(">AL<"));
    }

    #[test]
    fn optional_lines_omitted_when_empty() {
        let mut p = page();
        p.profile.university = Some(String::new());
        let html = render(&p, &test_config()).into_string();
        assert!(!html.contains("profile-university\""));
        assert!(!html.contains("profile-major\""));
        assert!(!html.contains("<p class=\"profile-bio\""));
    }

    #[test]
    fn optional_lines_shown_when_present() {
        let mut p = page();
        p.profile.university = Some("MIT".to_string());
        p.profile.major = Some("Physics".to_string());
        p.profile.bio = Some("Loves <b>quarks</b>".to_string());
        let html = render(&p, &test_config()).into_string();
        assert!(html.contains(">MIT<"));
        assert!(html.contains(">Physics<"));
        assert!(html.contains("Loves &lt;b&gt;quarks&lt;/b&gt;"));
    }

    #[test]
    fn empty_lists_show_empty_states() {
        let html = render(&page(), &test_config()).into_string();
        assert!(html.contains("No public resources yet."));
        assert!(html.contains("No public study groups yet."));
    }

    #[test]
    fn lists_render_cards() {
        let mut p = page();
        p.resources = vec![resource(10, 1, true, 3), resource(11, 1, true, 2)];
        p.study_groups = vec![study_group(20, 1, false, 4)];
        let html = render(&p, &test_config()).into_string();
        assert!(html.contains("Resource 10"));
        assert!(html.contains("Resource 11"));
        assert!(html.contains("Group 20"));
        assert!(!html.contains("No public resources yet."));
        assert!(!html.contains("No public study groups yet."));
    }

    #[test]
    fn tabs_and_sign_in_prompt_present() {
        let html = render(&page(), &test_config()).into_string();
        assert!(html.contains(">Resources<"));
        assert!(html.contains(">Study Groups<"));
        assert!(html.contains(r#"href="/login""#));
    }

    #[test]
    fn canonical_url_uses_stored_username() {
        let html = render(&page(), &test_config()).into_string();
        assert!(html.contains(r#"href="https://studyhub.example/alice""#));
    }

    #[test]
    fn not_found_page() {
        let html = not_found("ghost", &test_config()).into_string();
        assert!(html.contains("Profile not found"));
        assert!(!html.contains("tab-panel\""));
    }
}

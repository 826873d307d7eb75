//! Card renderers for resources and study groups.

use maud::{Markup, html};

use super::components::{card, format_date};
use crate::query::{Resource, StudyGroup};

pub fn resource_card(resource: &Resource) -> Markup {
    let title = non_empty(resource.title.as_deref()).unwrap_or("Untitled resource");
    let (date, iso) = format_date(&resource.created_at);

    card(
        title,
        non_empty(resource.description.as_deref()),
        html! {
            @if let Some(kind) = non_empty(resource.resource_type.as_deref()) {
                span class="badge" { (kind) }
            }
            @if let Some(subject) = non_empty(resource.subject.as_deref()) {
                span { (subject) }
            }
            time datetime=(iso) { (date) }
        },
    )
}

pub fn study_group_card(group: &StudyGroup) -> Markup {
    let name = non_empty(group.name.as_deref()).unwrap_or("Untitled group");
    let (date, iso) = format_date(&group.created_at);

    card(
        name,
        non_empty(group.description.as_deref()),
        html! {
            @if let Some(subject) = non_empty(group.subject.as_deref()) {
                span class="badge" { (subject) }
            }
            span { "Created " time datetime=(iso) { (date) } }
        },
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

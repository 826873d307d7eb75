//! Shared HTML components used across profile pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use chrono::{DateTime, Utc};
use maud::{Markup, PreEscaped, html};

/// Inline CSS for all pages.
///
/// Flat design; hierarchy comes from spacing and a single accent color.
/// Tabs are pure CSS (radio inputs) so the page ships no script beyond the
/// avatar `onerror` fallback.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#fafafa;--fg:#111;--fg2:#555;--fg3:#999;--accent:#2563eb;--accent-hover:#1d4ed8;--surface:#fff;--border:rgba(37,99,235,.15)}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:720px;width:100%;flex:1}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}

.card{padding:1.25rem;border:1px solid var(--border);border-radius:10px;background:var(--surface)}
.card-title{font-weight:600;font-size:1.05rem;color:var(--fg)}
.card-desc{margin-top:.35rem;color:var(--fg2);font-size:.95rem;word-break:break-word}
.card-meta{display:flex;gap:.75rem;flex-wrap:wrap;margin-top:.6rem;font-size:.8rem;color:var(--fg3)}
.card-list{display:flex;flex-direction:column;gap:.75rem}
.badge{display:inline-block;padding:.05rem .5rem;border-radius:999px;background:var(--border);color:var(--accent);font-weight:600}

.avatar{width:96px;height:96px;border-radius:50%;background:var(--accent);flex-shrink:0;display:flex;align-items:center;justify-content:center;color:#fff;font-weight:700;font-size:2rem;overflow:hidden;position:relative}
.avatar img{position:absolute;inset:0;width:100%;height:100%;object-fit:cover}

.profile-header{display:flex;align-items:center;gap:1.25rem;margin-bottom:1.5rem}
.profile-info{min-width:0;flex:1}
.profile-name{font-size:1.75rem;font-weight:700;letter-spacing:-.02em}
.profile-username{color:var(--fg3);font-size:.95rem}
.profile-line{color:var(--fg2);font-size:.95rem}
.profile-bio{margin-top:.75rem;white-space:pre-wrap;word-break:break-word;color:var(--fg2);line-height:1.65}

.tabs{display:flex;flex-wrap:wrap;margin-top:.5rem}
.tabs>input{position:absolute;opacity:0;pointer-events:none}
.tabs>label{padding:.5rem 1rem;cursor:pointer;font-weight:600;color:var(--fg3);border-bottom:2px solid transparent}
.tabs>label:hover{color:var(--fg)}
.tab-panel{display:none;width:100%;padding-top:1rem;order:1}
.tabs>input:nth-of-type(1):checked+label,.tabs>input:nth-of-type(2):checked+label,.tabs>input:nth-of-type(3):checked+label,.tabs>input:nth-of-type(4):checked+label{color:var(--accent);border-bottom-color:var(--accent)}
.tabs>input:nth-of-type(1):checked~.tab-panel:nth-of-type(1),.tabs>input:nth-of-type(2):checked~.tab-panel:nth-of-type(2),.tabs>input:nth-of-type(3):checked~.tab-panel:nth-of-type(3),.tabs>input:nth-of-type(4):checked~.tab-panel:nth-of-type(4){display:block}

.empty{padding:1.5rem;text-align:center;color:var(--fg3);border:1px dashed var(--border);border-radius:10px}
.signin-prompt{margin-top:1.5rem;padding:1rem 1.25rem;border-radius:10px;background:var(--border);color:var(--fg2);text-align:center}
.signin-prompt a{font-weight:600}

.not-found{text-align:center;padding:4rem 1rem}
.not-found h1{font-size:1.75rem;margin-bottom:.5rem}
.not-found p{color:var(--fg2);margin-bottom:1rem}

.footer{margin-top:2rem;font-size:.8rem;color:var(--fg3)}

@media(prefers-color-scheme:dark){
:root{--bg:#0b0d12;--fg:#e5e5e5;--fg2:#a0a0a0;--fg3:#666;--accent:#60a5fa;--accent-hover:#93c5fd;--surface:#11141b;--border:rgba(96,165,250,.2)}
}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#fafafa;color:#1a1a2e;padding:1rem}
.error-page{max-width:480px;text-align:center}
.error-page h1{font-size:1.5rem;margin-bottom:.5rem}
.error-page p{color:#555;margin-bottom:1rem}
.error-page a{color:#2563eb;text-decoration:none}
@media(prefers-color-scheme:dark){
body{background:#0f0f17;color:#e0e0e8}
}
"#;

/// Content-Security-Policy header value.
///
/// Inline styles plus the inline `onerror` handler on avatars. No external
/// scripts, no iframes, only HTTP(S) and data images.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; img-src https: http: data:; form-action 'none'; frame-ancestors 'none'";

/// Open Graph metadata for a page.
pub struct OpenGraphData<'a> {
    /// OG title.
    pub title: &'a str,
    /// OG description.
    pub description: &'a str,
    /// OG type (e.g., "profile", "website").
    pub og_type: &'a str,
    /// OG image URL.
    pub image: Option<&'a str>,
}

/// Render the full HTML page shell with `<head>`, OG tags, and body content.
pub fn page_shell(
    title: &str,
    description: &str,
    canonical_url: &str,
    og: OpenGraphData<'_>,
    body_content: Markup,
    site_name: &str,
) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                link rel="canonical" href=(canonical_url);

                meta property="og:title" content=(og.title);
                meta property="og:description" content=(og.description);
                meta property="og:url" content=(canonical_url);
                meta property="og:site_name" content=(site_name);
                meta property="og:type" content=(og.og_type);
                @if let Some(image) = og.image {
                    meta property="og:image" content=(image);
                }

                meta name="twitter:card" content="summary";
                meta name="twitter:title" content=(og.title);
                meta name="twitter:description" content=(og.description);

                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main { (body_content) }
                footer class="footer" {
                    (site_name)
                }
            }
        }
    }
}

/// Round avatar: the `fallback` text underneath, the image on top when it loads.
pub fn avatar(image_url: Option<&str>, alt: &str, fallback: &str) -> Markup {
    html! {
        div class="avatar" {
            (fallback)
            @if let Some(url) = image_url {
                @if is_safe_url(url) {
                    img src=(url) alt=(alt) loading="lazy" onerror="this.style.display='none'";
                }
            }
        }
    }
}

/// Bordered card with a title, optional description, and a footer of meta items.
pub fn card(title: &str, description: Option<&str>, meta: Markup) -> Markup {
    html! {
        article class="card" {
            div class="card-title" { (title) }
            @if let Some(text) = description {
                p class="card-desc" { (truncate(text, 200)) }
            }
            div class="card-meta" { (meta) }
        }
    }
}

/// One tab in a [`tabs`] group.
pub struct Tab<'a> {
    /// Unique id suffix for the radio input.
    pub id: &'a str,
    /// Visible label.
    pub label: &'a str,
    /// Panel content.
    pub content: Markup,
}

/// CSS-only tab group. The first tab starts selected. Supports up to four tabs.
pub fn tabs(group: &str, items: Vec<Tab<'_>>) -> Markup {
    html! {
        div class="tabs" {
            @for (index, tab) in items.iter().enumerate() {
                @let input_id = format!("{group}-{}", tab.id);
                input type="radio" name=(group) id=(input_id) checked[index == 0];
                label for=(input_id) { (tab.label) }
            }
            @for tab in &items {
                section class="tab-panel" aria-label=(tab.label) { (tab.content) }
            }
        }
    }
}

/// Dashed placeholder shown when a list has no entries.
pub fn empty_state(message: &str) -> Markup {
    html! {
        p class="empty" { (message) }
    }
}

/// Check if a URL is safe to use in `src` or `href` attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Format a timestamp as "Mon DD, YYYY" plus an ISO date for `datetime`.
pub fn format_date(ts: &DateTime<Utc>) -> (String, String) {
    (
        ts.format("%b %d, %Y").to_string(),
        ts.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    )
}

/// Truncate a string to a maximum length, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

//! Public profile route handler.
//!
//! Handles `GET /{username}` where `username` may carry a leading `@`.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Redirect, Response};

use crate::error::ProfileError;
use crate::render;
use crate::resolve::{self, Resolution};
use crate::session;
use crate::state::AppState;

/// Responses depend on the visitor's session, so shared caches must not store them.
const CACHE_CONTROL: &str = "private, no-cache";
const VARY: &str = "Cookie, Authorization";

/// Handle a profile request.
///
/// 1. Extracts the visitor's access token (bearer header or auth cookie)
/// 2. Resolves the username, redirecting signed-in visitors to the dashboard
/// 3. Renders the profile page, or the not-found page with a 404
///
/// A segment that is not valid UTF-8 once decoded is resolved lossily, so it
/// ends up on the not-found page rather than a plain-text rejection.
pub async fn profile_handler(
    State(state): State<AppState>,
    username: Result<Path<String>, PathRejection>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, ProfileError> {
    let username = match username {
        Ok(Path(username)) => username,
        Err(rejection) => {
            tracing::debug!(error = %rejection, path = %uri.path(), "undecodable username segment");
            decode_segment_lossy(uri.path())
        }
    };

    let access_token = session::access_token(&headers, &state.config.auth_cookie);

    let resolution = resolve::resolve(&state, &username, access_token.as_deref()).await?;

    let response = match resolution {
        Resolution::Redirect { location } => {
            (session_headers(), Redirect::temporary(&location)).into_response()
        }
        Resolution::NotFound { username } => {
            let markup = render::render_not_found(&username, &state.config);
            build_response(StatusCode::NOT_FOUND, &markup.into_string())
        }
        Resolution::Profile(page) => {
            let markup = render::render_profile(&page, &state.config);
            build_response(StatusCode::OK, &markup.into_string())
        }
    };

    Ok(response)
}

/// Build an HTTP response with HTML content and security/cache headers.
fn build_response(status: StatusCode, html: &str) -> Response {
    let mut headers = session_headers();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(render::components::CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    (status, headers, html.to_string()).into_response()
}

/// Percent-decode the single path segment, replacing invalid UTF-8.
fn decode_segment_lossy(path: &str) -> String {
    let segment = path.trim_start_matches('/');
    let bytes = urlencoding::decode_binary(segment.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Cache headers shared by every response from this route.
fn session_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    headers.insert(header::VARY, HeaderValue::from_static(VARY));
    headers
}

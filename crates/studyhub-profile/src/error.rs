//! Error types for the profile service.
//!
//! Backend failures are normally swallowed by the resolver. They only reach
//! the HTTP layer in strict mode, where they render as an HTML error page.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};

/// Failure talking to the hosted backend (auth or row queries).
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport failure, timeout, or TLS error.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the backend.
        body: String,
    },

    /// The response body did not match the expected row shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Profile service error type.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// A data query failed while strict mode was enabled.
    #[error("{query} query failed: {source}")]
    Query {
        /// Which query failed (e.g. "resources").
        query: &'static str,
        /// Underlying backend failure.
        #[source]
        source: BackendError,
    },
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::Query { query, source } => {
                tracing::error!(query, error = %source, "backend query failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Temporarily Unavailable",
                    "This profile could not be loaded right now. Please try again later.",
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Back to home" }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}

//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::query::ProfileStore;
use crate::session::AuthProvider;
use crate::supabase::SupabaseClient;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Session lookup.
    pub auth: Arc<dyn AuthProvider>,

    /// Profile, resource, and study group queries.
    pub store: Arc<dyn ProfileStore>,
}

impl AppState {
    /// Create application state backed by the configured Supabase project.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Arc::new(SupabaseClient::new(&config)?);

        tracing::info!(
            supabase_url = %config.supabase_url,
            timeout_secs = config.backend_timeout.as_secs(),
            "application state initialized"
        );

        Ok(Self::with_backend(config, client.clone(), client))
    }

    /// Create application state from explicit backend implementations.
    pub fn with_backend(
        config: Config,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            store,
        }
    }
}

//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool and the parsed configuration. Documents live in
//! Postgres only; nothing is cached between requests, so saves are last
//! writer wins.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;

// =============================================================================
// APP STATE
// =============================================================================

/// Clone is required by Axum. The pool is internally reference counted and
/// the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self { pool, config: Arc::new(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::claims::AccessClaims;
pub use auth::jwt::{mint_access_token, verify_access_token};
pub use domain::account::{AccessTier, Account, AccountDraft};
pub use error::AppError;
pub use errors::domain::DomainError;
pub use extractors::request_identity::RequestIdentity;
pub use middleware::access_guard::AccessGuard;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use store::{DocId, DocumentStore, MemoryStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

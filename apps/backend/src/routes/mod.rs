use actix_web::web;

use crate::middleware::access_guard::AccessGuard;

pub mod accounts;
pub mod auth;

/// Configure application routes. The accounts scope carries the access
/// guard here so tests and `main` exercise the same gating.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(crate::health::configure_routes));

    // Auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Account routes: /api/accounts/** (token required)
    cfg.service(
        web::scope("/api/accounts")
            .wrap(AccessGuard)
            .configure(accounts::configure_routes),
    );
}

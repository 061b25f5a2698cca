use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::routes;
use backend::services::accounts;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use backend::store::{DocumentStore, MemoryStore};
use backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    println!("🚀 Starting Rollcall Backend on http://{}:{}", host, port);

    let security_config = match SecurityConfig::from_env("BACKEND_JWT_SECRET") {
        Ok(config) => config,
        Err(_) => {
            eprintln!("❌ BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

    let seed_username =
        std::env::var("BACKEND_SEED_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let seed_credential =
        std::env::var("BACKEND_SEED_CREDENTIAL").unwrap_or_else(|_| "admin123".to_string());
    if let Err(e) = accounts::seed_initial_admin(store.as_ref(), &seed_username, &seed_credential).await
    {
        eprintln!("❌ Failed to seed initial admin account: {e}");
        std::process::exit(1);
    }

    println!("✅ Store ready");

    let app_state = AppState::new(store, security_config);

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::accounts;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub credential: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Verify a username/credential pair and return a signed access token.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.username.trim().is_empty() {
        return Err(AppError::bad_request(
            "INVALID_USERNAME",
            "Username cannot be empty".to_string(),
        ));
    }
    if req.credential.is_empty() {
        return Err(AppError::bad_request(
            "INVALID_CREDENTIAL",
            "Credential cannot be empty".to_string(),
        ));
    }

    let token = accounts::login(
        app_state.store.as_ref(),
        &app_state.security,
        &req.username,
        &req.credential,
    )
    .await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}

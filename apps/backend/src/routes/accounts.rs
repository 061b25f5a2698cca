//! Account CRUD handlers. The whole scope sits behind the access guard;
//! handlers receive the authenticated subject through `RequestIdentity`.

use actix_web::{web, HttpResponse, Result};
use serde::Serialize;
use tracing::debug;

use crate::domain::account::{AccessTier, Account, AccountDraft};
use crate::error::AppError;
use crate::extractors::request_identity::RequestIdentity;
use crate::repos::accounts as accounts_repo;
use crate::services::accounts as accounts_service;
use crate::state::app_state::AppState;

/// Response shape. The stored credential never leaves the service.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub access: AccessTier,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.unwrap_or_default(),
            username: account.username,
            email: account.email,
            access: account.access,
        }
    }
}

async fn create(
    identity: RequestIdentity,
    payload: web::Json<AccountDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    debug!(subject = %identity.subject, "create account");
    let created =
        accounts_service::create_account(app_state.store.as_ref(), payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(AccountResponse::from(created)))
}

async fn list(
    identity: RequestIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    debug!(subject = %identity.subject, "list accounts");
    let accounts = accounts_service::list_accounts(app_state.store.as_ref()).await?;
    let body: Vec<AccountResponse> = accounts.into_iter().map(AccountResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_one(
    identity: RequestIdentity,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    debug!(subject = %identity.subject, id = %id, "get account");
    let account = accounts_repo::get(app_state.store.as_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}

async fn update(
    identity: RequestIdentity,
    path: web::Path<String>,
    payload: web::Json<AccountDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    debug!(subject = %identity.subject, id = %id, "update account");
    let updated =
        accounts_service::update_account(app_state.store.as_ref(), &id, payload.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(AccountResponse::from(updated)))
}

async fn delete_one(
    identity: RequestIdentity,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    debug!(subject = %identity.subject, id = %id, "delete account");
    accounts_repo::delete(app_state.store.as_ref(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create))
            .route(web::get().to(list)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_one))
            .route(web::put().to(update))
            .route(web::delete().to(delete_one)),
    );
}

//! Access-guard middleware.
//!
//! Wraps protected scopes. The raw `Authorization` header value is the
//! token (no "Bearer " prefix handling; the wire contract presents the
//! signed token verbatim). Two rejection classifications:
//! - no header at all → forbidden (the caller never attempted auth)
//! - header present but verification fails → unauthorized (invalid vs
//!   expired preserved)
//!
//! On success the verified claims are inserted into request extensions and
//! control passes on. No tier/role enforcement happens here; this
//! middleware only establishes identity.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct AccessGuard;

impl<S, B> Transform<S, ServiceRequest> for AccessGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGuardMiddleware { service }))
    }
}

pub struct AccessGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AccessGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Extract the header and AppState before moving req.
        let auth_header = req.headers().get(header::AUTHORIZATION).cloned();
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        // Raw header value is the token; an absent or unreadable header
        // means authentication was never attempted.
        let token = match auth_header.as_ref().and_then(|value| value.to_str().ok()) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => {
                return Box::pin(async { Err(AppError::auth_missing_token().into()) });
            }
        };

        let app_state = match app_state {
            Some(state) => state,
            None => {
                return Box::pin(async {
                    Err(AppError::internal("AppState not available".to_string()).into())
                });
            }
        };

        match verify_access_token(&token, &app_state.security) {
            Ok(claims) => {
                // Store claims in request extensions BEFORE calling the service
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(e) => Box::pin(async move { Err(e.into()) }),
        }
    }
}

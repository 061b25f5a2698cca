//! Authenticated identity extractor.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::AccessClaims;
use crate::error::AppError;

/// The authenticated subject attached to a request by the access guard.
///
/// Read-only view for downstream handlers; requesting it on a route the
/// guard never ran on rejects with the missing-token classification. Any
/// tier enforcement is an explicit check the handler performs itself.
#[derive(Debug, Clone)]
pub struct RequestIdentity {
    pub subject: String,
}

impl FromRequest for RequestIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<AccessClaims>()
            .map(|claims| RequestIdentity {
                subject: claims.sub.clone(),
            })
            .ok_or_else(AppError::auth_missing_token);
        ready(identity)
    }
}

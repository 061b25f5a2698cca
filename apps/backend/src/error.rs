use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::trace_ctx;

/// RFC 7807 response body emitted for every error.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: &'static str, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    /// No token was presented at all. Classified as forbidden, not
    /// unauthorized: the caller never attempted authentication.
    #[error("AuthMissingToken")]
    AuthMissingToken,
    #[error("AuthInvalidToken")]
    AuthInvalidToken,
    #[error("AuthExpiredToken")]
    AuthExpiredToken,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Store timeout: {detail}")]
    Timeout { detail: String },
    #[error("Store unavailable: {detail}")]
    StoreUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Helper method to extract error code from any error variant
    fn code(&self) -> String {
        match self {
            AppError::Validation { code, .. } => code.to_string(),
            AppError::BadRequest { code, .. } => code.to_string(),
            AppError::NotFound { code, .. } => code.to_string(),
            AppError::AuthMissingToken => "AUTH_MISSING_TOKEN".to_string(),
            AppError::AuthInvalidToken => "AUTH_INVALID_TOKEN".to_string(),
            AppError::AuthExpiredToken => "AUTH_EXPIRED_TOKEN".to_string(),
            AppError::Unauthorized => "UNAUTHORIZED".to_string(),
            AppError::Timeout { .. } => "STORE_TIMEOUT".to_string(),
            AppError::StoreUnavailable { .. } => "STORE_UNAVAILABLE".to_string(),
            AppError::Internal { .. } => "INTERNAL".to_string(),
        }
    }

    /// Helper method to extract error detail from any error variant
    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::AuthMissingToken => "Missing auth token".to_string(),
            AppError::AuthInvalidToken => "Invalid auth token".to_string(),
            AppError::AuthExpiredToken => "Auth token expired".to_string(),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::Timeout { detail, .. } => detail.clone(),
            AppError::StoreUnavailable { detail, .. } => detail.clone(),
            AppError::Internal { detail, .. } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AuthMissingToken => StatusCode::FORBIDDEN,
            AppError::AuthInvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AuthExpiredToken => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: &'static str, detail: String) -> Self {
        Self::Validation { code, detail }
    }

    pub fn bad_request(code: &'static str, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn not_found(code: &'static str, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn auth_missing_token() -> Self {
        Self::AuthMissingToken
    }

    pub fn auth_invalid_token() -> Self {
        Self::AuthInvalidToken
    }

    pub fn auth_expired_token() -> Self {
        Self::AuthExpiredToken
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<crate::domain::validate::ValidationError> for AppError {
    fn from(e: crate::domain::validate::ValidationError) -> Self {
        AppError::Validation {
            code: e.code(),
            detail: e.to_string(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(v) => AppError::Validation {
                code: v.code(),
                detail: v.to_string(),
            },
            // Both not-found kinds collapse to one response so the
            // identifier format cannot be probed from the outside.
            DomainError::NotFound(..) => {
                AppError::not_found("ACCOUNT_NOT_FOUND", "Account not found".to_string())
            }
            DomainError::Infra(InfraErrorKind::Timeout, detail) => AppError::Timeout { detail },
            DomainError::Infra(InfraErrorKind::Unavailable, detail) => {
                AppError::StoreUnavailable { detail }
            }
            DomainError::Infra(_, detail) => AppError::Internal { detail },
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://rollcall.app/errors/{}", code.to_uppercase()),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail,
            code,
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}

#![allow(dead_code)]

use std::time::SystemTime;

use actix_web::body::{to_bytes, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::web::Bytes;
use actix_web::{test, HttpResponse};
use backend::{mint_access_token, AppState, SecurityConfig};
use serde_json::Value;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.as_bytes())
}

/// Fresh in-memory application state with the shared test signing key.
pub fn test_state() -> AppState {
    AppState::in_memory(security())
}

/// Mint a valid token for `subject` with the shared test signing key.
pub fn token_for(subject: &str) -> String {
    mint_access_token(subject, SystemTime::now(), &security()).expect("mint token")
}

/// Drive a request through the app and return `(status, json_body)`.
///
/// Middleware rejections surface as service-level errors rather than
/// responses; this helper materializes those through the same
/// `ResponseError` path the HTTP dispatcher would use, so tests can assert
/// on the problem-details body either way. Non-JSON bodies come back as
/// `Value::Null`.
pub async fn call_json<S, R, B>(app: &S, req: R) -> (u16, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    match app.call(req).await {
        Ok(resp) => {
            let status = resp.status().as_u16();
            let body = test::read_body(resp).await;
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
        Err(err) => {
            let resp = HttpResponse::from_error(err);
            let status = resp.status().as_u16();
            let body = to_bytes(resp.into_body())
                .await
                .unwrap_or_else(|_| Bytes::new());
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
    }
}

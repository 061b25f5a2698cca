use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::AccessClaims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Fixed validity window for issued tokens.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Mint a signed access token for `subject` with a 1-hour TTL.
///
/// The signing key comes from the injected `SecurityConfig`; nothing here
/// regenerates or caches key material per call.
pub fn mint_access_token(
    subject: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;
    let exp = iat + TOKEN_TTL_SECS;

    let claims = AccessClaims {
        sub: subject.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
}

/// Verify a token and return its claims.
///
/// Failures are classified, never panics:
/// - past expiry → `AppError::AuthExpiredToken`
/// - bad signature or malformed input → `AppError::AuthInvalidToken`
///
/// Verification is self-contained and idempotent; the same token yields the
/// same result until the clock crosses its expiry.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<AccessClaims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    // Expiry is a hard boundary; no clock-skew grace.
    validation.leeway = 0;

    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::auth_expired_token(),
        _ => AppError::auth_invalid_token(),
    })
}

//! Claims carried by backend-issued access tokens.

use serde::{Deserialize, Serialize};

/// Signed token payload. Created at issuance, immutable, never persisted;
/// it lives only for the duration of a request's authentication check.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Authenticated subject (account username)
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

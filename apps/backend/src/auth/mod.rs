//! Token issuance and verification.

pub mod claims;
pub mod jwt;

pub use claims::AccessClaims;
pub use jwt::{mint_access_token, verify_access_token};

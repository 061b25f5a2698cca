use jsonwebtoken::Algorithm;

/// Configuration for token security settings.
///
/// Constructed once at startup and injected wherever tokens are minted or
/// verified, so tests can run with distinct keys and rotation does not
/// require a rebuild.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Key material read from the environment at startup.
    pub fn from_env(var: &str) -> Result<Self, std::env::VarError> {
        std::env::var(var).map(|secret| Self::new(secret.into_bytes()))
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}

//! Native document identifiers.
//!
//! The store keys documents by a 12-byte identifier; its human-facing form
//! is the fixed-length lowercase hex encoding (24 characters). New ids are
//! a 4-byte unix-seconds prefix plus 8 random bytes, so scans in key order
//! are roughly insertion-ordered.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use thiserror::Error;

/// Length of the external hex representation.
pub const ENCODED_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId([u8; 12]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocIdError {
    #[error("identifier must be {ENCODED_LEN} hex characters, got {0}")]
    WrongLength(usize),
    #[error("identifier is not valid hex")]
    InvalidHex,
}

impl DocId {
    pub fn generate() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        rand::rng().fill(&mut bytes[4..]);
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self, DocIdError> {
        if s.len() != ENCODED_LEN {
            return Err(DocIdError::WrongLength(s.len()));
        }
        let raw = hex::decode(s).map_err(|_| DocIdError::InvalidHex)?;
        let mut bytes = [0u8; 12];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }

    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for DocId {
    type Err = DocIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

//! Account domain model.

use serde::{Deserialize, Serialize};

/// Ordinal permission level. The enum is closed: no value outside the three
/// named tiers deserializes successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AccessTier {
    Viewer = 0,
    Moderator = 1,
    Admin = 2,
}

impl From<AccessTier> for u8 {
    fn from(tier: AccessTier) -> Self {
        tier as u8
    }
}

impl TryFrom<u8> for AccessTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AccessTier::Viewer),
            1 => Ok(AccessTier::Moderator),
            2 => Ok(AccessTier::Admin),
            other => Err(format!("access tier out of range: {other}")),
        }
    }
}

/// Account domain model.
///
/// `id` is the external identifier (fixed-length hex); it stays `None` until
/// the store assigns a native identifier on insert. `credential` holds the
/// bcrypt hash once the record has passed through the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    pub credential: String,
    pub access: AccessTier,
}

/// Incoming wire shape for create/update requests.
///
/// `access` is carried as its raw ordinal so the validator owns the range
/// check; `credential` defaults to empty, which is only acceptable on
/// update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDraft {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub credential: String,
    #[serde(default)]
    pub access: u8,
}

//! Account business flows: the validate → hash → persist pipeline, login,
//! and first-run seeding.

use std::time::SystemTime;

use bcrypt::{hash, verify, DEFAULT_COST};
use futures_util::StreamExt;
use tracing::{info, warn};

use crate::auth::jwt::mint_access_token;
use crate::domain::account::{AccessTier, Account, AccountDraft};
use crate::domain::validate::{sanitize, validate};
use crate::error::AppError;
use crate::repos::accounts;
use crate::state::security_config::SecurityConfig;
use crate::store::DocumentStore;

fn hash_credential(credential: &str) -> Result<String, AppError> {
    hash(credential, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash credential: {e}")))
}

fn tier(access: u8) -> Result<AccessTier, AppError> {
    AccessTier::try_from(access)
        .map_err(|_| crate::domain::validate::ValidationError::InvalidAccessTier(access).into())
}

/// Validate a draft and persist it as a new account. The credential is
/// hashed before it ever reaches the store.
pub async fn create_account(
    store: &dyn DocumentStore,
    mut draft: AccountDraft,
) -> Result<Account, AppError> {
    validate(&mut draft, false)?;

    let account = Account {
        id: None,
        username: draft.username,
        email: draft.email,
        credential: hash_credential(&draft.credential)?,
        access: tier(draft.access)?,
    };

    let created = accounts::create(store, account).await?;
    info!(username = %created.username, "account created");
    Ok(created)
}

/// Validate a draft and replace the account stored under `external_id`.
/// An empty credential on update keeps the stored hash; a supplied one is
/// re-hashed.
pub async fn update_account(
    store: &dyn DocumentStore,
    external_id: &str,
    mut draft: AccountDraft,
) -> Result<Account, AppError> {
    validate(&mut draft, true)?;

    let existing = accounts::get(store, external_id).await?;
    let credential = if draft.credential.is_empty() {
        existing.credential
    } else {
        hash_credential(&draft.credential)?
    };

    let account = Account {
        id: None,
        username: draft.username,
        email: draft.email,
        credential,
        access: tier(draft.access)?,
    };

    let updated = accounts::update(store, external_id, account).await?;
    info!(username = %updated.username, "account updated");
    Ok(updated)
}

/// Collect the full account listing, propagating the first cursor error.
pub async fn list_accounts(store: &dyn DocumentStore) -> Result<Vec<Account>, AppError> {
    let mut cursor = accounts::list_all(store);
    let mut out = Vec::new();
    while let Some(item) = cursor.next().await {
        out.push(item?);
    }
    Ok(out)
}

/// Verify a username/credential pair and mint an access token for the
/// subject. Unknown usernames and bad credentials are indistinguishable.
pub async fn login(
    store: &dyn DocumentStore,
    security: &SecurityConfig,
    username: &str,
    credential: &str,
) -> Result<String, AppError> {
    // Both fields are stored in sanitized form; sanitize the probes the
    // same way or a matching pair would never verify.
    let username = sanitize(username);
    let credential = sanitize(credential);

    let account = accounts::find_by_username(store, &username)
        .await?
        .ok_or_else(AppError::unauthorized)?;

    let ok = verify(&credential, &account.credential)
        .map_err(|e| AppError::internal(format!("Failed to verify credential: {e}")))?;
    if !ok {
        return Err(AppError::unauthorized());
    }

    mint_access_token(&account.username, SystemTime::now(), security)
}

/// Create an initial admin account when none exists, so a fresh process is
/// reachable through the guarded routes. Returns the seeded account, or
/// `None` when one was already present.
pub async fn seed_initial_admin(
    store: &dyn DocumentStore,
    username: &str,
    credential: &str,
) -> Result<Option<Account>, AppError> {
    if accounts::find_by_username(store, username).await?.is_some() {
        return Ok(None);
    }

    let draft = AccountDraft {
        username: username.to_string(),
        email: format!("{username}@localhost"),
        credential: credential.to_string(),
        access: AccessTier::Admin.into(),
    };
    let created = create_account(store, draft).await?;
    warn!(username = %created.username, "seeded initial admin account; change its credential");
    Ok(Some(created))
}

//! Account repository functions for the domain layer.
//!
//! Reconciles the external identifier (fixed-length hex) with the store's
//! native `DocId`. Every id-taking operation decodes the external id, so
//! lookups, updates and deletes all address the same key space. A
//! malformed external id is reported as `NotFound(MalformedId)` — distinct
//! in logs, indistinguishable from an absent record to clients.

use futures_util::stream::BoxStream;
use futures_util::StreamExt;

use crate::adapters::accounts_store as accounts_adapter;
use crate::domain::account::Account;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::store::{DocId, DocumentStore};

fn decode_external_id(external_id: &str) -> Result<DocId, DomainError> {
    DocId::from_hex(external_id).map_err(|e| {
        DomainError::not_found(NotFoundKind::MalformedId, format!("{external_id:?}: {e}"))
    })
}

/// Insert a new account. The store assigns the native identifier; the
/// returned account carries its external hex form.
pub async fn create(store: &dyn DocumentStore, mut account: Account) -> Result<Account, DomainError> {
    let id = accounts_adapter::insert_account(store, &account).await?;
    account.id = Some(id.to_hex());
    Ok(account)
}

pub async fn get(store: &dyn DocumentStore, external_id: &str) -> Result<Account, DomainError> {
    let id = decode_external_id(external_id)?;
    accounts_adapter::find_account(store, id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Account, format!("no account {external_id}"))
        })
}

/// Replace the stored fields for the given identifier.
pub async fn update(
    store: &dyn DocumentStore,
    external_id: &str,
    mut account: Account,
) -> Result<Account, DomainError> {
    let id = decode_external_id(external_id)?;
    account.id = Some(id.to_hex());
    let existed = accounts_adapter::replace_account(store, id, &account).await?;
    if !existed {
        return Err(DomainError::not_found(
            NotFoundKind::Account,
            format!("no account {external_id}"),
        ));
    }
    Ok(account)
}

pub async fn delete(store: &dyn DocumentStore, external_id: &str) -> Result<(), DomainError> {
    let id = decode_external_id(external_id)?;
    let existed = accounts_adapter::delete_account(store, id).await?;
    if !existed {
        return Err(DomainError::not_found(
            NotFoundKind::Account,
            format!("no account {external_id}"),
        ));
    }
    Ok(())
}

/// Lazy, finite, non-restartable cursor over all accounts. Mid-stream
/// failures surface as items; nothing is truncated silently.
pub fn list_all(store: &dyn DocumentStore) -> BoxStream<'static, Result<Account, DomainError>> {
    accounts_adapter::scan_accounts(store)
}

/// Linear probe by username (usernames are stored in sanitized form).
pub async fn find_by_username(
    store: &dyn DocumentStore,
    username: &str,
) -> Result<Option<Account>, DomainError> {
    let mut cursor = list_all(store);
    while let Some(item) = cursor.next().await {
        let account = item?;
        if account.username == username {
            return Ok(Some(account));
        }
    }
    Ok(None)
}

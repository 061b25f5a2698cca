//! Document-store adapter for accounts.
//!
//! Converts between the domain model and the stored document shape, maps
//! driver failures into the domain taxonomy, and bounds every store call
//! with a fixed deadline so a stalled connection cannot hang a request.
//! Nothing here retries; retry is caller policy.

use std::time::Duration;

use futures_util::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::domain::account::{AccessTier, Account};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::store::{DocId, Document, DocumentStore, StoreError};

/// Deadline for single-record operations.
pub const SINGLE_OP_TIMEOUT: Duration = Duration::from_secs(5);
/// Deadline for a full-collection scan.
pub const SCAN_TIMEOUT: Duration = Duration::from_secs(10);

/// Stored document shape. `access` is persisted as its ordinal.
#[derive(Debug, Serialize, Deserialize)]
struct AccountDoc {
    username: String,
    email: String,
    credential: String,
    access: u8,
}

impl From<&Account> for AccountDoc {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            email: account.email.clone(),
            credential: account.credential.clone(),
            access: account.access.into(),
        }
    }
}

fn encode_account(account: &Account) -> Result<Document, DomainError> {
    serde_json::to_value(AccountDoc::from(account)).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Encoding".to_string()),
            format!("Failed to encode account document: {e}"),
        )
    })
}

fn decode_account(id: DocId, doc: Document) -> Result<Account, DomainError> {
    let doc: AccountDoc = serde_json::from_value(doc).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Failed to decode document {id}: {e}"),
        )
    })?;
    let access = AccessTier::try_from(doc.access).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Document {id}: {e}"),
        )
    })?;
    Ok(Account {
        id: Some(id.to_hex()),
        username: doc.username,
        email: doc.email,
        credential: doc.credential,
        access,
    })
}

fn map_store_error(e: StoreError) -> DomainError {
    match e {
        StoreError::Transport(detail) => DomainError::infra(InfraErrorKind::Unavailable, detail),
    }
}

async fn bounded<T, F>(op: &'static str, fut: F) -> Result<T, DomainError>
where
    F: std::future::Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(SINGLE_OP_TIMEOUT, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(map_store_error(e)),
        Err(_) => Err(DomainError::infra(
            InfraErrorKind::Timeout,
            format!("{op} timed out after {}s", SINGLE_OP_TIMEOUT.as_secs()),
        )),
    }
}

pub async fn insert_account(
    store: &dyn DocumentStore,
    account: &Account,
) -> Result<DocId, DomainError> {
    let doc = encode_account(account)?;
    bounded("insert", store.insert(doc)).await
}

pub async fn find_account(
    store: &dyn DocumentStore,
    id: DocId,
) -> Result<Option<Account>, DomainError> {
    let doc = bounded("find", store.find_by_id(id)).await?;
    doc.map(|d| decode_account(id, d)).transpose()
}

pub async fn replace_account(
    store: &dyn DocumentStore,
    id: DocId,
    account: &Account,
) -> Result<bool, DomainError> {
    let doc = encode_account(account)?;
    bounded("replace", store.replace_by_id(id, doc)).await
}

pub async fn delete_account(store: &dyn DocumentStore, id: DocId) -> Result<bool, DomainError> {
    bounded("delete", store.delete_by_id(id)).await
}

/// Lazy cursor over every stored account.
///
/// Finite and non-restartable: after the first error (deadline, transport,
/// or a document that fails to decode) the cursor yields that error and
/// fuses. Errors surface as items instead of truncating the stream.
pub fn scan_accounts(store: &dyn DocumentStore) -> BoxStream<'static, Result<Account, DomainError>> {
    let deadline = tokio::time::Instant::now() + SCAN_TIMEOUT;
    let inner = store.scan();

    stream::unfold((inner, false), move |(mut inner, done)| async move {
        if done {
            return None;
        }
        match tokio::time::timeout_at(deadline, inner.next()).await {
            Err(_) => Some((
                Err(DomainError::infra(
                    InfraErrorKind::Timeout,
                    format!("account scan timed out after {}s", SCAN_TIMEOUT.as_secs()),
                )),
                (inner, true),
            )),
            Ok(None) => None,
            Ok(Some(Err(e))) => Some((Err(map_store_error(e)), (inner, true))),
            Ok(Some(Ok((id, doc)))) => {
                let item = decode_account(id, doc);
                let fused = item.is_err();
                Some((item, (inner, fused)))
            }
        }
    })
    .boxed()
}

//! Domain models and validation rules.

pub mod account;
pub mod validate;

pub use account::{AccessTier, Account, AccountDraft};
pub use validate::{sanitize, validate, ValidationError};

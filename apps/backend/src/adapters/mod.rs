//! Store adapters: domain model ↔ stored document conversions.

pub mod accounts_store;

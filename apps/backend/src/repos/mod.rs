//! Domain-facing repositories.

pub mod accounts;

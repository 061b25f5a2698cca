//! Error handling for the backend.

pub mod domain;

pub use domain::{DomainError, InfraErrorKind, NotFoundKind};

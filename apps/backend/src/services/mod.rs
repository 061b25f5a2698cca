//! Business-flow services sitting between routes and repos.

pub mod accounts;

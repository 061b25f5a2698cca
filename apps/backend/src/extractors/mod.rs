pub mod request_identity;

pub use request_identity::RequestIdentity;

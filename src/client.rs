//! Client-side pieces of the admin frontend: the persisted session, the
//! route guards that read it and an HTTP client for the API.

#[cfg(feature = "client")]
pub mod api;
pub mod errors;
pub mod guards;
pub mod session;

#[cfg(feature = "client")]
pub use api::ApiClient;
pub use errors::ClientError;
pub use guards::{GuardDecision, admin_guard, signed_guard};
pub use session::{Session, SessionStore};

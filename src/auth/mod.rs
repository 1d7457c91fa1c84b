//! # Admin Authentication
//!
//! The authentication collaborator for the content API: a single admin
//! identity, Argon2id-hashed credentials in a JSON file, and opaque session
//! tokens held in memory with a fixed expiry.
//!
//! The content routes themselves perform no authorization; deployments
//! front mutating calls with the `/auth` surface.

pub mod credentials;
pub mod crypto;
pub mod errors;
pub mod session;

pub use credentials::CredentialsFile;
pub use errors::{AuthError, AuthResult};
pub use session::{Session, SessionRegistry};

//! # Admin Credentials
//!
//! A single admin identity stored in a JSON file next to the content
//! document. The file is seeded on `init` with a default login and is the
//! only place the (hashed) password lives.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::crypto::{hash_password, validate_new_password, verify_password};
use super::errors::{AuthError, AuthResult};

/// Default admin login seeded on first init
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// On-disk credential record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub email: String,
    pub password_hash: String,
}

/// File-backed admin credentials
#[derive(Debug, Clone)]
pub struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    /// Open a credentials file at the given path (it need not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the credentials file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Seed the file with the default admin login
    ///
    /// Never overwrites existing credentials.
    pub fn bootstrap(&self) -> AuthResult<()> {
        if self.exists() {
            return Ok(());
        }

        let credentials = AdminCredentials {
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password_hash: hash_password(DEFAULT_ADMIN_PASSWORD)?,
        };
        self.write(&credentials)
    }

    fn read(&self) -> AuthResult<AdminCredentials> {
        let bytes = fs::read(&self.path).map_err(|e| AuthError::Storage(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| AuthError::Storage(e.to_string()))
    }

    fn write(&self, credentials: &AdminCredentials) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AuthError::Storage(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(credentials)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| AuthError::Storage(e.to_string()))
    }

    /// Check an identity/secret pair
    ///
    /// Returns `InvalidCredentials` on any mismatch without revealing
    /// whether the email or the password was wrong.
    pub fn verify(&self, email: &str, password: &str) -> AuthResult<()> {
        let credentials = self.read().map_err(|_| AuthError::InvalidCredentials)?;

        if credentials.email != email {
            return Err(AuthError::InvalidCredentials);
        }
        if !verify_password(password, &credentials.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(())
    }

    /// Change the admin password after verifying the current one
    pub fn change_password(&self, old_password: &str, new_password: &str) -> AuthResult<()> {
        let mut credentials = self.read()?;

        if !verify_password(old_password, &credentials.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        validate_new_password(new_password)?;

        credentials.password_hash = hash_password(new_password)?;
        self.write(&credentials)
    }
}

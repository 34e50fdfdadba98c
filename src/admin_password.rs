//! The admin password: a bcrypt hash stored on the server, with endpoints to
//! verify it and change it.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    document::JsonDocument,
    extract::JsonBody,
    password::PasswordHash,
};

/// The stored admin credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredential {
    /// The bcrypt hash of the admin password.
    pub password_hash: PasswordHash,
}

/// Reads and replaces the admin password hash.
#[derive(Debug)]
pub struct AdminCredentialStore {
    document: JsonDocument<AdminCredential>,
    write_lock: Mutex<()>,
}

impl AdminCredentialStore {
    /// Create a store for the credential document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the stored password hash, or `None` if no password has been set.
    ///
    /// # Errors
    ///
    /// Returns an [Error::StorageError] if the document cannot be read.
    pub fn get(&self) -> Result<Option<PasswordHash>, Error> {
        Ok(self
            .document
            .load()?
            .map(|credential| credential.password_hash))
    }

    /// Replace the stored password hash.
    ///
    /// # Errors
    ///
    /// Returns an [Error::StorageError] if the document cannot be written.
    pub fn set(&self, password_hash: PasswordHash) -> Result<(), Error> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::LockError("admin credential"))?;

        self.document.save(&AdminCredential { password_hash })
    }

    /// Replace the password with `new_password` if `current_password`
    /// matches the stored one.
    ///
    /// The new password is only validated and hashed once the current one has
    /// been verified. The check and the replacement happen under the write
    /// lock, so two concurrent changes cannot both succeed against the same
    /// old password.
    ///
    /// # Errors
    ///
    /// Returns an [Error::AdminPasswordNotSet] if there is no stored password,
    /// an [Error::InvalidCredentials] if `current_password` does not match, or
    /// an [Error::TooWeak] if `new_password` is easy to guess.
    pub fn change(
        &self,
        current_password: &str,
        new_password: &str,
        cost: u32,
    ) -> Result<(), Error> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::LockError("admin credential"))?;

        let stored_hash = self.get()?.ok_or(Error::AdminPasswordNotSet)?;
        if !verify_password(&stored_hash, current_password)? {
            return Err(Error::InvalidCredentials);
        }

        let password_hash = PasswordHash::from_raw_password(new_password, cost)?;
        self.document.save(&AdminCredential { password_hash })
    }
}

fn verify_password(hash: &PasswordHash, raw_password: &str) -> Result<bool, Error> {
    hash.verify(raw_password).map_err(|error| {
        tracing::error!("Error verifying password: {error}");
        Error::HashingError(error.to_string())
    })
}

/// The state needed for the admin password endpoint.
#[derive(Debug, Clone)]
pub struct AdminPasswordState {
    /// The credential store.
    pub credentials: Arc<AdminCredentialStore>,
    /// The bcrypt cost for new password hashes.
    pub password_hash_cost: u32,
}

impl FromRef<AppState> for AdminPasswordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            credentials: state.admin_credentials.clone(),
            password_hash_cost: state.password_hash_cost,
        }
    }
}

/// A request to the admin password endpoint.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AdminPasswordRequest {
    /// Check whether `password` is the admin password.
    Verify {
        /// The password to check.
        password: String,
    },
    /// Replace the admin password.
    Change {
        /// The current password.
        password: String,
        /// The replacement password.
        #[serde(rename = "newPassword")]
        new_password: String,
    },
}

/// Verify or change the admin password.
///
/// `verify` responds with `{"isValid": bool}`, `change` with
/// `{"success": true}`.
pub async fn admin_password_endpoint(
    State(state): State<AdminPasswordState>,
    JsonBody(request): JsonBody<AdminPasswordRequest>,
) -> Result<Json<Value>, Error> {
    match request {
        AdminPasswordRequest::Verify { password } => {
            let stored_hash = state
                .credentials
                .get()?
                .ok_or(Error::AdminPasswordNotSet)?;
            let is_valid = verify_password(&stored_hash, &password)?;

            Ok(Json(json!({ "isValid": is_valid })))
        }
        AdminPasswordRequest::Change {
            password,
            new_password,
        } => {
            state
                .credentials
                .change(&password, &new_password, state.password_hash_cost)?;
            tracing::info!("Admin password changed");

            Ok(Json(json!({ "success": true })))
        }
    }
}

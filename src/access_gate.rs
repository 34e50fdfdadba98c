//! Shared-secret check for the admin endpoints.
//!
//! There are no sessions or users: every mutating request must carry the one
//! configured credential in its `Authorization` header.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};

use crate::Error;

/// Checks requests against the admin credential.
///
/// Only a SHA-256 digest of the credential is kept, and supplied values are
/// compared by digest so the comparison does not stop at the first differing
/// byte of the secret.
#[derive(Clone)]
pub struct AccessGate {
    credential_digest: [u8; 32],
}

impl AccessGate {
    /// Create a gate that accepts requests whose `Authorization` header equals
    /// `credential` exactly, e.g. `"Basic YWRtaW46MTIzNDU2"`.
    pub fn new(credential: &str) -> Self {
        Self {
            credential_digest: Sha256::digest(credential.as_bytes()).into(),
        }
    }

    /// Check a supplied credential.
    ///
    /// # Errors
    ///
    /// Returns [Error::Unauthorized] if `supplied_credential` is missing or
    /// does not match.
    pub fn authorize(&self, supplied_credential: Option<&str>) -> Result<(), Error> {
        let supplied_credential = supplied_credential.ok_or(Error::Unauthorized)?;
        let supplied_digest: [u8; 32] = Sha256::digest(supplied_credential.as_bytes()).into();

        if supplied_digest == self.credential_digest {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate").finish_non_exhaustive()
    }
}

/// Middleware that rejects requests without the admin credential with a 401
/// before they reach the route handler.
pub async fn access_gate(State(gate): State<AccessGate>, request: Request, next: Next) -> Response {
    let supplied_credential = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match gate.authorize(supplied_credential) {
        Ok(()) => next.run(request).await,
        Err(error) => {
            tracing::warn!(
                "Rejected {} {}: missing or invalid credential",
                request.method(),
                request.uri().path()
            );
            error.into_response()
        }
    }
}

//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A product is missing a translated name, has a blank name, or has a
    /// negative or non-finite price.
    #[error("invalid product: {0}")]
    InvalidProduct(String),

    /// A product was submitted without a category, or the category was blank.
    #[error("Category is required")]
    MissingCategory,

    /// A quote request is missing the contact name or phone number.
    #[error("invalid quote request: {0}")]
    InvalidQuote(String),

    /// The request body could not be parsed as the expected JSON document.
    ///
    /// Missing locale or currency keys end up here, since they are rejected
    /// while deserializing.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// The query string could not be parsed, e.g. a parameter was repeated.
    #[error("invalid query string: {0}")]
    InvalidQueryString(String),

    /// The request did not carry the admin credential.
    #[error("Unauthorized")]
    Unauthorized,

    /// The password given for the admin account did not match.
    #[error("Current password is incorrect")]
    InvalidCredentials,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// No admin password has been set yet.
    #[error("No password hash found")]
    AdminPasswordNotSet,

    /// Tried to update a product that is not in the given category.
    #[error("Product not found")]
    UpdateMissingProduct,

    /// Tried to delete a product that is not in the given category.
    #[error("Product not found")]
    DeleteMissingProduct,

    /// A JSON document could not be read from or written to disk.
    ///
    /// Callers should pass in the path of the document and the original error
    /// as a string.
    #[error("could not access the document at {0}: {1}")]
    StorageError(String, String),

    /// A store's write lock was poisoned by a panicking writer.
    #[error("could not acquire the write lock for {0}")]
    LockError(&'static str),
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequestBody(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQueryString(rejection.body_text())
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidProduct(_)
            | Error::MissingCategory
            | Error::InvalidQuote(_)
            | Error::InvalidRequestBody(_)
            | Error::InvalidQueryString(_)
            | Error::TooWeak(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::AdminPasswordNotSet
            | Error::UpdateMissingProduct
            | Error::DeleteMissingProduct => StatusCode::NOT_FOUND,
            Error::HashingError(_) | Error::StorageError(_, _) | Error::LockError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal details are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

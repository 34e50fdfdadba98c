//! Request extractors that report rejections with the app's [Error] type.

use axum::extract::{FromRequest, FromRequestParts};

use crate::Error;

/// A JSON request body.
///
/// Works like [axum::Json], except that a body that cannot be parsed is
/// rejected with [Error::InvalidRequestBody] (400) instead of axum's default
/// plain text rejection, so clients always get a JSON error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// The query string of a request.
///
/// Works like [axum::extract::Query], except that a query string that cannot
/// be parsed is rejected with [Error::InvalidQueryString] (400) as JSON.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct QueryParams<T>(pub T);

//! Endpoint for reading quote requests.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    Error,
    quote::{Quote, QuoteStore},
};

/// Get every quote request, oldest first.
pub async fn get_quotes_endpoint(
    State(quotes): State<Arc<QuoteStore>>,
) -> Result<Json<Vec<Quote>>, Error> {
    quotes.list().map(Json)
}

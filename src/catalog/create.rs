//! Product creation endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    Error,
    catalog::{CatalogStore, CategoryQuery, Product, ProductDraft},
    extract::{JsonBody, QueryParams},
};

/// Create a product in the category named by the `category` query parameter.
///
/// Responds with the new product, including its assigned id.
pub async fn create_product_endpoint(
    State(catalog): State<Arc<CatalogStore>>,
    QueryParams(query): QueryParams<CategoryQuery>,
    JsonBody(draft): JsonBody<ProductDraft>,
) -> Result<Json<Product>, Error> {
    let category = query.category_name().ok_or(Error::MissingCategory)?;

    catalog.create(category, draft).map(Json)
}

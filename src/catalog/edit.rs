//! Product update endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    Error,
    catalog::{CatalogStore, Product},
    extract::JsonBody,
};

/// Replace a product with the one in the request body.
///
/// The product is looked up by id within the category given in the body. If
/// that category does not hold the id, the response is 404 even when the id
/// exists in another category.
pub async fn update_product_endpoint(
    State(catalog): State<Arc<CatalogStore>>,
    JsonBody(product): JsonBody<Product>,
) -> Result<Json<Product>, Error> {
    catalog.update(product).map(Json)
}

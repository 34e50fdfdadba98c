//! Product deletion endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    Error,
    catalog::{CatalogStore, CategoryName, ProductId},
    extract::JsonBody,
};

/// The body of a product deletion request.
#[derive(Debug, Deserialize)]
pub struct DeleteProductRequest {
    /// The id of the product to delete.
    pub id: ProductId,
    /// The category the product is stored under.
    pub category: CategoryName,
}

/// Delete the product with the given id from the given category.
///
/// Responds with `{"success": true}`, or 404 if the category does not hold a
/// product with that id.
pub async fn delete_product_endpoint(
    State(catalog): State<Arc<CatalogStore>>,
    JsonBody(request): JsonBody<DeleteProductRequest>,
) -> Result<Json<Value>, Error> {
    if catalog.delete(request.id, &request.category)? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(Error::DeleteMissingProduct)
    }
}

//! Endpoint for reading the catalog.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    Error,
    catalog::{CatalogStore, CategoryName},
    extract::QueryParams,
};

/// The optional `?category=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    /// The category to read or write, e.g. "berries".
    pub category: Option<String>,
}

impl CategoryQuery {
    /// The category named in the query, if it is present and not blank.
    pub fn category_name(&self) -> Option<CategoryName> {
        self.category
            .as_deref()
            .and_then(|category| CategoryName::new(category).ok())
    }
}

/// Get the products in one category, or the whole catalog if no category is
/// given.
///
/// An unknown category returns an empty list.
pub async fn get_products_endpoint(
    State(catalog): State<Arc<CatalogStore>>,
    QueryParams(query): QueryParams<CategoryQuery>,
) -> Result<Response, Error> {
    let response = match query.category_name() {
        Some(category) => Json(catalog.list_by_category(&category)?).into_response(),
        None => Json(catalog.list_all()?).into_response(),
    };

    Ok(response)
}

#[cfg(test)]
mod get_products_endpoint_tests {
    use std::sync::Arc;

    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::Value;
    use tempfile::TempDir;

    use crate::{
        catalog::{CatalogStore, Product, default_catalog, get_products_endpoint},
        endpoints,
        test_utils::assert_json_error,
    };

    fn get_test_server() -> (TempDir, TestServer) {
        let dir = TempDir::new().expect("Could not create temp dir");
        let store = CatalogStore::new(dir.path().join("products.json"), default_catalog());
        let app = Router::new()
            .route(endpoints::PRODUCTS, get(get_products_endpoint))
            .with_state(Arc::new(store));

        (dir, TestServer::new(app).expect("Could not create test server."))
    }

    #[tokio::test]
    async fn without_category_returns_whole_catalog() {
        let (_dir, server) = get_test_server();

        let response = server.get(endpoints::PRODUCTS).await;

        response.assert_status_ok();
        let body: Value = response.json();
        let categories: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        assert_eq!(categories, ["berries", "fruits", "vegetables"]);
    }

    #[tokio::test]
    async fn with_category_returns_that_category() {
        let (_dir, server) = get_test_server();

        let response = server
            .get(endpoints::PRODUCTS)
            .add_query_param("category", "fruits")
            .await;

        response.assert_status_ok();
        let products: Vec<Product> = response.json();
        assert_eq!(products.len(), 5);
        assert!(products.iter().all(|p| p.category.as_ref() == "fruits"));
    }

    #[tokio::test]
    async fn unknown_category_returns_empty_list() {
        let (_dir, server) = get_test_server();

        let response = server
            .get(endpoints::PRODUCTS)
            .add_query_param("category", "mushrooms")
            .await;

        response.assert_status_ok();
        let products: Vec<Product> = response.json();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn blank_category_returns_whole_catalog() {
        let (_dir, server) = get_test_server();

        let response = server
            .get(endpoints::PRODUCTS)
            .add_query_param("category", "")
            .await;

        response.assert_status_ok();
        assert!(response.json::<Value>().is_object());
    }

    #[tokio::test]
    async fn repeated_category_is_bad_request_with_json_error() {
        let (_dir, server) = get_test_server();

        let response = server
            .get(&format!("{}?category=berries&category=fruits", endpoints::PRODUCTS))
            .await;

        assert_json_error(&response, StatusCode::BAD_REQUEST, "category");
    }
}

//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    AppState,
    access_gate::access_gate,
    admin_password::admin_password_endpoint,
    catalog::{
        create_product_endpoint, delete_product_endpoint, get_products_endpoint,
        update_product_endpoint,
    },
    endpoints,
    quote::{create_quote_endpoint, get_quotes_endpoint},
    site_settings::{
        get_admin_site_settings_endpoint, get_site_settings_endpoint,
        update_site_settings_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every route that changes the catalog, the site settings, or reads
/// submitted quotes requires the admin credential.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::PRODUCTS, get(get_products_endpoint))
        .route(endpoints::SITE_SETTINGS, get(get_site_settings_endpoint))
        .route(endpoints::QUOTES, post(create_quote_endpoint))
        .route(endpoints::ADMIN_PASSWORD, post(admin_password_endpoint));

    let protected_routes = Router::new()
        .route(
            endpoints::PRODUCTS,
            post(create_product_endpoint)
                .put(update_product_endpoint)
                .delete(delete_product_endpoint),
        )
        .route(endpoints::SITE_SETTINGS, post(update_site_settings_endpoint))
        .route(
            endpoints::ADMIN_SITE_SETTINGS,
            get(get_admin_site_settings_endpoint),
        )
        .route(endpoints::QUOTES, get(get_quotes_endpoint))
        .route_layer(middleware::from_fn_with_state(
            state.access_gate.clone(),
            access_gate,
        ));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found" })),
    )
        .into_response()
}

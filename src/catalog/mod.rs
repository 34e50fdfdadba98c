//! The product catalog: products grouped by category and persisted as one
//! JSON document.

mod create;
mod delete;
mod domain;
mod edit;
mod list;
mod seed;
mod store;

pub use create::create_product_endpoint;
pub use delete::delete_product_endpoint;
pub use domain::{
    Catalog, CategoryName, LocalizedName, Prices, Product, ProductDraft, ProductId,
};
pub use edit::update_product_endpoint;
pub use list::{CategoryQuery, get_products_endpoint};
pub use seed::default_catalog;
pub use store::CatalogStore;

//! Frost Catalog is the storage server behind a frozen-produce shop.
//!
//! This library provides a JSON REST API for the product catalog, the site
//! settings, quote requests, and the admin password. Every document is kept
//! as a JSON file in one data directory and replaced atomically on each write.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod access_gate;
mod admin_password;
mod app_state;
mod catalog;
mod document;
mod endpoints;
mod error;
mod extract;
mod logging;
mod password;
mod quote;
mod routing;
mod site_settings;
#[cfg(test)]
mod test_utils;

pub use access_gate::AccessGate;
pub use admin_password::AdminCredentialStore;
pub use app_state::{
    ADMIN_CREDENTIAL_FILE, AppState, CATALOG_FILE, QUOTES_FILE, SITE_SETTINGS_FILE,
};
pub use catalog::{
    Catalog, CatalogStore, CategoryName, LocalizedName, Prices, Product, ProductDraft, ProductId,
    default_catalog,
};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use quote::{
    LogNotifier, NotifyError, Quote, QuoteId, QuoteNotifier, QuoteRequest, QuoteStatus, QuoteStore,
};
pub use routing::build_router;
pub use site_settings::{PublicSiteSettings, SiteSettings, SiteSettingsStore};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

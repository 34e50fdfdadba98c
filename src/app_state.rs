//! Implements a struct that holds the state of the REST server.

use std::{path::Path, sync::Arc};

use axum::extract::FromRef;

use crate::{
    AccessGate,
    admin_password::AdminCredentialStore,
    catalog::{Catalog, CatalogStore},
    password::PasswordHash,
    quote::{LogNotifier, QuoteNotifier, QuoteStore},
    site_settings::SiteSettingsStore,
};

/// The file name of the catalog document in the data directory.
pub const CATALOG_FILE: &str = "products.json";
/// The file name of the site settings document in the data directory.
pub const SITE_SETTINGS_FILE: &str = "site-settings.json";
/// The file name of the quotes document in the data directory.
pub const QUOTES_FILE: &str = "quotes.json";
/// The file name of the admin credential document in the data directory.
pub const ADMIN_CREDENTIAL_FILE: &str = "admin-credential.json";

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The product catalog.
    pub catalog: Arc<CatalogStore>,

    /// Guards the routes that change data.
    pub access_gate: AccessGate,

    /// The company contact details and notification credentials.
    pub site_settings: Arc<SiteSettingsStore>,

    /// Submitted quote requests.
    pub quotes: Arc<QuoteStore>,

    /// Told about each new quote request.
    pub quote_notifier: Arc<dyn QuoteNotifier>,

    /// The admin password hash.
    pub admin_credentials: Arc<AdminCredentialStore>,

    /// The bcrypt cost used when the admin password is changed.
    pub password_hash_cost: u32,
}

impl AppState {
    /// Create a new [AppState] that keeps its documents in `data_dir`.
    ///
    /// `admin_credential` is the exact `Authorization` header value that the
    /// admin endpoints accept. `catalog_seed` is written as the catalog the
    /// first time it is read, if `data_dir` does not contain one yet.
    ///
    /// Quote notifications go to the log; use [AppState::with_quote_notifier]
    /// to send them elsewhere.
    pub fn new(data_dir: &Path, admin_credential: &str, catalog_seed: Catalog) -> Self {
        Self {
            catalog: Arc::new(CatalogStore::new(data_dir.join(CATALOG_FILE), catalog_seed)),
            access_gate: AccessGate::new(admin_credential),
            site_settings: Arc::new(SiteSettingsStore::new(data_dir.join(SITE_SETTINGS_FILE))),
            quotes: Arc::new(QuoteStore::new(data_dir.join(QUOTES_FILE))),
            quote_notifier: Arc::new(LogNotifier),
            admin_credentials: Arc::new(AdminCredentialStore::new(
                data_dir.join(ADMIN_CREDENTIAL_FILE),
            )),
            password_hash_cost: PasswordHash::DEFAULT_COST,
        }
    }

    /// Replace the quote notifier.
    pub fn with_quote_notifier(mut self, notifier: Arc<dyn QuoteNotifier>) -> Self {
        self.quote_notifier = notifier;
        self
    }
}

impl FromRef<AppState> for Arc<CatalogStore> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for Arc<SiteSettingsStore> {
    fn from_ref(state: &AppState) -> Self {
        state.site_settings.clone()
    }
}

impl FromRef<AppState> for Arc<QuoteStore> {
    fn from_ref(state: &AppState) -> Self {
        state.quotes.clone()
    }
}

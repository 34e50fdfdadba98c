//! The API endpoint URIs.

/// The route to read and change the product catalog.
pub const PRODUCTS: &str = "/api/products";
/// The route to read the public site settings and replace the settings.
pub const SITE_SETTINGS: &str = "/api/site-settings";
/// The route to read every site setting, including notification credentials.
pub const ADMIN_SITE_SETTINGS: &str = "/api/admin/site-settings";
/// The route to submit and list quote requests.
pub const QUOTES: &str = "/api/quotes";
/// The route to verify or change the admin password.
pub const ADMIN_PASSWORD: &str = "/api/auth";

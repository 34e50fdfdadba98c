//! Company contact details and notification credentials shown on the site.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{Error, document::JsonDocument, extract::JsonBody};

/// The site settings document.
///
/// Fields missing from the stored document fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    /// The company name shown in the header and footer.
    pub company_name: String,
    /// The contact phone number.
    pub phone: String,
    /// The contact email address.
    pub email: String,
    /// The postal address.
    pub address: String,
    /// The Telegram bot token used to notify staff of new quotes.
    pub telegram_bot_token: String,
    /// The Telegram chat that receives quote notifications.
    pub telegram_chat_id: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            company_name: "ORGANIC FROST".to_owned(),
            phone: "+380 123 456 789".to_owned(),
            email: "info@organicfrost.com".to_owned(),
            address: "Kyiv, Ukraine".to_owned(),
            telegram_bot_token: String::new(),
            telegram_chat_id: String::new(),
        }
    }
}

/// The settings that anonymous visitors may see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSiteSettings {
    /// The company name.
    pub company_name: String,
    /// The contact phone number.
    pub phone: String,
    /// The contact email address.
    pub email: String,
    /// The postal address.
    pub address: String,
}

impl From<SiteSettings> for PublicSiteSettings {
    fn from(settings: SiteSettings) -> Self {
        Self {
            company_name: settings.company_name,
            phone: settings.phone,
            email: settings.email,
            address: settings.address,
        }
    }
}

/// Reads and replaces the site settings document.
#[derive(Debug)]
pub struct SiteSettingsStore {
    document: JsonDocument<SiteSettings>,
    write_lock: Mutex<()>,
}

impl SiteSettingsStore {
    /// Create a store for the settings document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the current settings, writing the defaults on first access.
    pub fn get(&self) -> Result<SiteSettings, Error> {
        self.document.load_or_seed(SiteSettings::default)
    }

    /// Replace the settings.
    pub fn save(&self, settings: &SiteSettings) -> Result<(), Error> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::LockError("site settings"))?;

        self.document.save(settings)?;
        tracing::info!("Site settings updated");

        Ok(())
    }
}

/// Get the public site settings.
pub async fn get_site_settings_endpoint(
    State(settings): State<Arc<SiteSettingsStore>>,
) -> Result<Json<PublicSiteSettings>, Error> {
    settings.get().map(|settings| Json(settings.into()))
}

/// Get every site setting, including notification credentials.
pub async fn get_admin_site_settings_endpoint(
    State(settings): State<Arc<SiteSettingsStore>>,
) -> Result<Json<SiteSettings>, Error> {
    settings.get().map(Json)
}

/// Replace the site settings with the request body.
pub async fn update_site_settings_endpoint(
    State(settings): State<Arc<SiteSettingsStore>>,
    JsonBody(new_settings): JsonBody<SiteSettings>,
) -> Result<Json<Value>, Error> {
    settings.save(&new_settings)?;

    Ok(Json(json!({ "message": "Settings updated successfully" })))
}

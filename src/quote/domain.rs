//! Core quote domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Identifier for a quote request.
pub type QuoteId = i64;

/// The contact details and order a visitor submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// The contact person's name.
    pub name: String,
    /// The contact phone number.
    pub phone: String,
    /// The buyer's company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// The contact email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The expected order volume, as the visitor typed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    /// A free-form message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The country to deliver to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// The name of the product the quote was requested from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

impl QuoteRequest {
    /// Check that the contact name and phone number are filled in.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidQuote] naming the first blank field.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidQuote("name is required".to_owned()));
        }

        if self.phone.trim().is_empty() {
            return Err(Error::InvalidQuote("phone is required".to_owned()));
        }

        Ok(())
    }
}

/// Where a quote is in the sales process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    /// Submitted and not yet handled.
    New,
}

/// A stored quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// One more than the largest id stored when the quote was created.
    pub id: QuoteId,
    /// The submitted details, stored inline next to the id.
    #[serde(flatten)]
    pub request: QuoteRequest,
    /// Where the quote is in the sales process.
    pub status: QuoteStatus,
    /// When the quote was stored, as an RFC 3339 timestamp in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

//! Storage for quote requests.

use std::{path::PathBuf, sync::Mutex};

use time::OffsetDateTime;

use crate::{
    Error,
    document::JsonDocument,
    quote::{Quote, QuoteRequest, QuoteStatus},
};

/// Stores quote requests in creation order.
#[derive(Debug)]
pub struct QuoteStore {
    document: JsonDocument<Vec<Quote>>,
    write_lock: Mutex<()>,
}

impl QuoteStore {
    /// Create a store for the quote document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
            write_lock: Mutex::new(()),
        }
    }

    /// Get every quote, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an [Error::StorageError] if the quotes cannot be read.
    pub fn list(&self) -> Result<Vec<Quote>, Error> {
        self.document.load_or_seed(Vec::new)
    }

    /// Store a new quote request with the status [QuoteStatus::New].
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidQuote] if the name or phone is blank, or an
    /// [Error::StorageError] if the quotes cannot be read or saved.
    pub fn create(&self, request: QuoteRequest) -> Result<Quote, Error> {
        request.validate()?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::LockError("quotes"))?;

        let mut quotes = self.list()?;
        let quote = Quote {
            id: quotes.iter().map(|quote| quote.id).max().unwrap_or(0) + 1,
            request,
            status: QuoteStatus::New,
            created_at: OffsetDateTime::now_utc(),
        };
        quotes.push(quote.clone());
        self.document.save(&quotes)?;

        tracing::info!("Stored quote {}", quote.id);

        Ok(quote)
    }
}

//! The hook that tells staff about new quote requests.

use crate::quote::Quote;

/// A notification about a quote could not be delivered.
#[derive(Debug, thiserror::Error)]
#[error("could not send quote notification: {0}")]
pub struct NotifyError(pub String);

/// Sends a notification about a newly stored quote.
///
/// Notifications are fire-and-forget: failures are logged by the caller and
/// never fail the request that created the quote.
pub trait QuoteNotifier: Send + Sync {
    /// Notify staff about `quote`.
    fn notify(&self, quote: &Quote) -> Result<(), NotifyError>;
}

/// A notifier that writes new quotes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl QuoteNotifier for LogNotifier {
    fn notify(&self, quote: &Quote) -> Result<(), NotifyError> {
        tracing::info!(
            "New quote {} from {} ({}) for {}",
            quote.id,
            quote.request.name,
            quote.request.phone,
            quote.request.product.as_deref().unwrap_or("unspecified product")
        );

        Ok(())
    }
}

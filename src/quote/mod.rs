//! Quote requests submitted through the site's contact forms.

mod create;
mod domain;
mod list;
mod notifier;
mod store;

pub use create::create_quote_endpoint;
pub use domain::{Quote, QuoteId, QuoteRequest, QuoteStatus};
pub use list::get_quotes_endpoint;
pub use notifier::{LogNotifier, NotifyError, QuoteNotifier};
pub use store::QuoteStore;

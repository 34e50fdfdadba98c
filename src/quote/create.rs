//! Quote submission endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    extract::JsonBody,
    quote::{Quote, QuoteNotifier, QuoteRequest, QuoteStore},
};

/// The state needed for submitting a quote.
#[derive(Clone)]
pub struct QuoteEndpointState {
    /// The quote store.
    pub quotes: Arc<QuoteStore>,
    /// Told about each stored quote.
    pub notifier: Arc<dyn QuoteNotifier>,
}

impl FromRef<AppState> for QuoteEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            quotes: state.quotes.clone(),
            notifier: state.quote_notifier.clone(),
        }
    }
}

/// Store a quote request and notify staff about it.
///
/// The notification is sent in the background once the quote is stored. A
/// failed notification is logged and does not affect the response.
pub async fn create_quote_endpoint(
    State(state): State<QuoteEndpointState>,
    JsonBody(request): JsonBody<QuoteRequest>,
) -> Result<(StatusCode, Json<Quote>), Error> {
    let quote = state.quotes.create(request)?;

    let notifier = state.notifier.clone();
    let notified_quote = quote.clone();
    tokio::task::spawn_blocking(move || {
        if let Err(error) = notifier.notify(&notified_quote) {
            tracing::warn!(
                "Quote {} was stored but staff were not notified: {error}",
                notified_quote.id
            );
        }
    });

    Ok((StatusCode::CREATED, Json(quote)))
}

#[cfg(test)]
mod create_quote_endpoint_tests {
    use std::{
        sync::{Arc, Mutex, mpsc},
        time::Duration,
    };

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use crate::{
        endpoints,
        quote::{
            NotifyError, Quote, QuoteNotifier, QuoteStore, create::QuoteEndpointState,
            create_quote_endpoint,
        },
    };

    struct ChannelNotifier(Mutex<mpsc::Sender<i64>>);

    impl QuoteNotifier for ChannelNotifier {
        fn notify(&self, quote: &Quote) -> Result<(), NotifyError> {
            self.0
                .lock()
                .unwrap()
                .send(quote.id)
                .map_err(|error| NotifyError(error.to_string()))
        }
    }

    struct FailingNotifier;

    impl QuoteNotifier for FailingNotifier {
        fn notify(&self, _quote: &Quote) -> Result<(), NotifyError> {
            Err(NotifyError("bot token rejected".to_owned()))
        }
    }

    fn get_test_server(notifier: Arc<dyn QuoteNotifier>) -> (TempDir, Arc<QuoteStore>, TestServer) {
        let dir = TempDir::new().expect("Could not create temp dir");
        let quotes = Arc::new(QuoteStore::new(dir.path().join("quotes.json")));
        let state = QuoteEndpointState {
            quotes: quotes.clone(),
            notifier,
        };
        let app = Router::new()
            .route(endpoints::QUOTES, post(create_quote_endpoint))
            .with_state(state);

        (
            dir,
            quotes,
            TestServer::new(app).expect("Could not create test server."),
        )
    }

    #[tokio::test]
    async fn create_quote_stores_and_notifies() {
        let (sender, receiver) = mpsc::channel();
        let (_dir, quotes, server) = get_test_server(Arc::new(ChannelNotifier(Mutex::new(sender))));

        let response = server
            .post(endpoints::QUOTES)
            .json(&json!({
                "name": "Oksana Melnyk",
                "phone": "+380 50 123 4567",
                "product": "Raspberry",
                "volume": "2 t"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["id"], 1);
        assert_eq!(body["status"], "new");
        assert_eq!(body["product"], "Raspberry");
        assert_eq!(quotes.list().unwrap().len(), 1);
        let notified_id = receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("notifier was not called");
        assert_eq!(notified_id, 1);
    }

    #[tokio::test]
    async fn failed_notification_does_not_fail_request() {
        let (_dir, quotes, server) = get_test_server(Arc::new(FailingNotifier));

        let response = server
            .post(endpoints::QUOTES)
            .json(&json!({ "name": "Jan Kowalski", "phone": "+48 600 000 000" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(quotes.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_phone_is_bad_request() {
        let (_dir, quotes, server) = get_test_server(Arc::new(FailingNotifier));

        let response = server
            .post(endpoints::QUOTES)
            .json(&json!({ "name": "Jan Kowalski" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(quotes.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_bad_request() {
        let (_dir, quotes, server) = get_test_server(Arc::new(FailingNotifier));

        let response = server
            .post(endpoints::QUOTES)
            .json(&json!({ "name": "", "phone": "+48 600 000 000" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(quotes.list().unwrap().is_empty());
    }
}

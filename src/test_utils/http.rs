use axum::{body::Body, http::StatusCode, response::Response};
use axum_test::TestResponse;
use serde_json::Value;

pub(crate) async fn parse_json_body(response: Response<Body>) -> Value {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");

    serde_json::from_slice(&body).expect("Response body is not valid JSON")
}

/// Assert that `response` has `status` and a JSON body of the form
/// `{"error": "..."}` whose message contains `message_fragment`.
#[track_caller]
pub(crate) fn assert_json_error(
    response: &TestResponse,
    status: StatusCode,
    message_fragment: &str,
) {
    assert_eq!(response.status_code(), status);

    let body: Value = response.json();
    let message = body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("want a JSON error body, got {body}"));
    assert!(
        message.contains(message_fragment),
        "want error containing {message_fragment:?}, got {message:?}"
    );
}

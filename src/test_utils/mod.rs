#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod state;

pub(crate) use http::{assert_json_error, parse_json_body};
pub(crate) use state::{TEST_CREDENTIAL, get_test_app_state};

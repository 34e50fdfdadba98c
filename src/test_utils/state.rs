use tempfile::TempDir;

use crate::{AppState, catalog::Catalog};

/// The `Authorization` header value accepted by [get_test_app_state].
pub(crate) const TEST_CREDENTIAL: &str = "Basic YWRtaW46ZnJvemVuLWJlcnJpZXM=";

/// Create app state backed by a fresh temp dir, with a cheap bcrypt cost.
///
/// Keep the returned [TempDir] alive for as long as the state is used.
pub(crate) fn get_test_app_state(catalog_seed: Catalog) -> (TempDir, AppState) {
    let dir = TempDir::new().expect("Could not create temp dir");
    let mut state = AppState::new(dir.path(), TEST_CREDENTIAL, catalog_seed);
    state.password_hash_cost = 4;

    (dir, state)
}

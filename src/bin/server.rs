use std::{
    env::{self},
    fs::{self, OpenOptions},
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use frost_catalog::{AppState, build_router, default_catalog, graceful_shutdown, logging_middleware};

/// The REST API server for the frozen-produce catalog.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The directory that holds the JSON documents. Created if missing.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The file to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let admin_credential = env::var("ADMIN_CREDENTIAL")
        .expect("The environment variable 'ADMIN_CREDENTIAL' must be set");
    if admin_credential.trim().is_empty() {
        panic!("The environment variable 'ADMIN_CREDENTIAL' must not be empty");
    }

    fs::create_dir_all(&args.data_dir).unwrap_or_else(|error| {
        panic!("Could not create the data directory {:?}: {error}", args.data_dir)
    });
    let app_state = AppState::new(&args.data_dir, &admin_credential, default_catalog());

    let catalog = app_state
        .catalog
        .list_all()
        .unwrap_or_else(|error| panic!("Could not read the catalog: {error}"));
    tracing::info!(
        "Loaded {} products in {} categories",
        catalog.product_count(),
        catalog.categories().count()
    );

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(app_state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    tracing::info!("Serving documents from {:?}", args.data_dir);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server stopped unexpectedly");
}

fn setup_logging(log_path: &Path) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}

//! The greeter application.
//!
//! # Examples
//!
//! The empty form.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! # let config = greeter_app::infra::config::load_config().unwrap();
//! # let url = greeter_app::app::spawn_app(config).await.unwrap();
//! let response = reqwest::get(format!("{}/", url)).await.unwrap();
//! assert_eq!(200, response.status());
//! assert!(response.text().await.unwrap().contains("<title>Greeter App</title>"));
//! # });
//! ```
//!
//! Submitting a name.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! # let config = greeter_app::infra::config::load_config().unwrap();
//! # let url = greeter_app::app::spawn_app(config).await.unwrap();
//! let client = reqwest::Client::new();
//! let response = client.post(format!("{}/", url)).form(&[("name", "Foo")]).send().await.unwrap();
//! assert_eq!(200, response.status());
//! assert!(response.text().await.unwrap().contains(r#"<p id="greeting">Hello, Foo!</p>"#));
//! # });
//! ```

use crate::infra::error::{InternalError, PanicHandler};
use crate::infra::middleware::MakeRequestIdSpan;
use crate::infra::{config::Config, state::AppState};
use axum::error_handling::HandleErrorLayer;
use axum::response::IntoResponse;
use axum::Router;
use http::StatusCode;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Constructs the full axum application.
pub fn app(state: AppState) -> Router {
    let server = state.config().server.clone();

    // Fallible middleware from tower, mapped to infallible response with [`HandleErrorLayer`].
    let tower_middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e| async move {
            InternalError::Other(format!("Tower middleware failed: {e}")).into_response()
        }))
        .concurrency_limit(server.concurrency_limit);

    Router::new()
        .merge(crate::views::views(state))
        .fallback(crate::infra::error::not_found)
        // Layers
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server.request_timeout,
        ))
        .layer(axum::middleware::from_fn(
            crate::infra::middleware::log_request_response,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(tower_middleware)
        .layer(CatchPanicLayer::custom(PanicHandler))
}

/// Starts the axum server and runs it until shutdown is requested.
pub async fn run_app(listener: TcpListener, config: Config) -> std::io::Result<()> {
    let state = AppState::new(config);
    let app = app(state);

    tracing::info!("Starting axum on {}", listener.local_addr()?);
    let exit_result = axum::serve(listener, app)
        .with_graceful_shutdown(crate::infra::shutdown::shutdown_signal())
        .await;

    match &exit_result {
        Ok(_) => tracing::info!("Successfully shut down"),
        Err(e) => tracing::error!("Shutdown failed: {}", e),
    }

    exit_result
}

/// Spawn a server on a random port, returning its base url.
pub async fn spawn_app(config: Config) -> std::io::Result<String> {
    let address = "127.0.0.1";
    let listener = TcpListener::bind(format!("{address}:0")).await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        if let Err(e) = run_app(listener, config).await {
            tracing::error!("Server on port {} failed: {}", port, e);
        }
    });
    Ok(format!("http://{address}:{port}"))
}

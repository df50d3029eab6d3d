//! REST API of the scrapper, mounted under `/api/crypto`.
//!
//! Bodies are plain text except `/health`. Lists are comma separated.

mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;
use handlers::AppState;

use crate::error::Result;
use crate::port::inbound::tracker::TrackerApi;

/// Path prefix of every tracker route.
pub const API_PREFIX: &str = "/api/crypto";

/// Build the application router.
pub fn router(tracker: Arc<dyn TrackerApi>) -> Router {
    let api = Router::new()
        .route("/price/:ticker", get(handlers::price))
        .route("/watchlist/chatIds", get(handlers::chat_ids))
        .route("/watchlist/:chat_id", get(handlers::watchlist))
        .route("/watchlist/:chat_id/add/:ticker", post(handlers::add))
        .route("/watchlist/:chat_id/remove/:ticker", delete(handlers::remove))
        .route("/pairs", get(handlers::pairs))
        .route("/pairs/count", get(handlers::pair_count));

    Router::new()
        .nest(API_PREFIX, api)
        .route("/health", get(handlers::health))
        .with_state(AppState { tracker })
        .layer(TraceLayer::new_for_http())
}

/// Serve `app` on `listener` until `shutdown` flips.
///
/// # Errors
/// Returns an I/O error if the server fails.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.changed().await;
        })
        .await?;

    info!("HTTP API stopped");
    Ok(())
}

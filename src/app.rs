use axum::{routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;
use crate::{auth, photos};

pub fn build_app(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.upload_dir);

    Router::new()
        .merge(auth::router())
        .merge(photos::router())
        .nest_service("/uploads", uploads)
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

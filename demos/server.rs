//! Demo server: mounts the full EMR catalog backed by the in-memory
//! reference service, plus common routes and the OpenAPI document.

use axum::{routing::get, Json, Router};
use emr_rest_sdk::{common_routes, entities, entity_routes, ApiDoc, AppState};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("emr_rest_sdk=info".parse()?))
        .init();

    let registry = entities::in_memory_registry()?;
    tracing::info!(entities = registry.len(), "catalog registered");
    let state = AppState::new(registry);

    let app = Router::new()
        .merge(common_routes())
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api", entity_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = TcpListener::bind(&bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

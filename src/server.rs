use crate::constants::{ACTIVITIES_ROUTE, ACTIVITY_ROUTE, HEALTH_ROUTE, SERVICE_NAME};
use crate::handlers::{
    create_activity, delete_activity, get_activity, list_activities, update_activity, AppState,
};
use activities_core::storage::Storage;
use axum::{
    http::{header::CONTENT_TYPE, Method},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create the HTTP router with all routes
pub fn create_server(storage: Arc<dyn Storage>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(HEALTH_ROUTE, get(health))
        .route(ACTIVITIES_ROUTE, get(list_activities).post(create_activity))
        .route(
            ACTIVITY_ROUTE,
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .with_state(AppState { storage })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Start the HTTP server on the given address
pub async fn start_server(storage: Arc<dyn Storage>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_server(storage);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server running on http://{}", addr);
    info!("Health check: http://{}{}", addr, HEALTH_ROUTE);
    info!("Activities:   http://{}{}", addr, ACTIVITIES_ROUTE);

    axum::serve(listener, app).await?;
    Ok(())
}

mod api_doc;
mod config;
mod error;
mod extract;
mod handlers;
mod routes;
mod state;
mod store;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::{Args, Config};
use state::AppState;
use store::StoreClient;

fn app(state: AppState) -> Router {
    let cache_routes = Router::new()
        .route(
            routes::GET_CACHE,
            get(handlers::get_cache_handler).post(handlers::get_cache_handler),
        )
        .route(
            routes::SET_CACHE,
            get(handlers::set_cache_handler).post(handlers::set_cache_handler),
        )
        .route(
            routes::ZADD_CACHE,
            get(handlers::zadd_cache_handler).post(handlers::zadd_cache_handler),
        )
        .route(
            routes::CLEAR_CACHE,
            get(handlers::clear_cache_handler).post(handlers::clear_cache_handler),
        )
        .with_state(state.clone());

    let router = if state.config.context_path.is_empty() {
        cache_routes
    } else {
        Router::new().nest(&state.config.context_path, cache_routes)
    };

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", api_doc::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    tracing::info!("redis-cache-proxy starting");

    let config = Config::from_args(Args::parse())?;
    config.log_startup();

    let state = AppState {
        store: StoreClient::new(config.target.clone()),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", state.config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

use utoipa::OpenApi;

use crate::handlers;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "redis-cache-proxy API",
        version = "1.0.0",
        description = "A plain-text HTTP front end for basic Redis cache commands"
    ),
    paths(
        handlers::get_cache::get_cache_handler,
        handlers::set_cache::set_cache_handler,
        handlers::zadd_cache::zadd_cache_handler,
        handlers::clear_cache::clear_cache_handler
    ),
    tags(
        (name = "cache", description = "Cache proxy operations")
    )
)]
pub struct ApiDoc;

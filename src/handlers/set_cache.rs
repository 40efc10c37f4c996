use crate::error::ApiError;
use crate::extract::FormParams;
use crate::routes;
use crate::state::AppState;
use axum::extract::State;

/// GET|POST /setCache handler - store a value with an expiry
///
/// Responds with the store's status string (`OK`) verbatim.
#[utoipa::path(
    get,
    path = routes::SET_CACHE,
    params(
        ("key" = String, Query, description = "Key to write"),
        ("value" = String, Query, description = "Value to store"),
        ("ttl" = String, Query, description = "Expiry as a human duration, e.g. 60s or 5m"),
        ("db" = Option<i64>, Query, description = "Logical database index, defaults to 0")
    ),
    responses(
        (status = 200, description = "Store status string", body = String),
        (status = 405, description = "Malformed ttl or store error", body = String)
    ),
    tag = "cache"
)]
pub async fn set_cache_handler(
    State(state): State<AppState>,
    params: FormParams,
) -> Result<String, ApiError> {
    let key = params.trimmed("key");
    let value = params.trimmed("value");
    let ttl = params.trimmed("ttl");
    let db = params.db();

    state.store.store_with_ttl(&key, &value, &ttl, db).await
}

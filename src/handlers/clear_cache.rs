use crate::error::ApiError;
use crate::extract::FormParams;
use crate::routes;
use crate::state::AppState;
use axum::extract::State;

/// GET|POST /clearCache handler - delete a comma-separated list of keys
///
/// Responds with the number of keys actually removed in base 10. The list is
/// split on commas verbatim: surrounding whitespace inside an entry is part
/// of that key.
#[utoipa::path(
    get,
    path = routes::CLEAR_CACHE,
    params(
        ("keys" = String, Query, description = "Comma-separated keys to delete"),
        ("db" = Option<i64>, Query, description = "Logical database index, defaults to 0")
    ),
    responses(
        (status = 200, description = "Count of removed keys", body = String),
        (status = 405, description = "Store error", body = String)
    ),
    tag = "cache"
)]
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    params: FormParams,
) -> Result<String, ApiError> {
    let keys = params.trimmed("keys");
    let db = params.db();

    tracing::info!("clear cache for keys: {}", keys);

    let keys: Vec<String> = keys.split(',').map(str::to_string).collect();

    let removed = state.store.delete_keys(&keys, db).await?;
    Ok(removed.to_string())
}

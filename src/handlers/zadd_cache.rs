use crate::error::ApiError;
use crate::extract::FormParams;
use crate::routes;
use crate::state::AppState;
use axum::extract::State;

/// GET|POST /zaddCache handler - add a member to a sorted set
///
/// Responds with the number of newly added members in base 10; an existing
/// member whose score was merely updated counts as 0.
#[utoipa::path(
    get,
    path = routes::ZADD_CACHE,
    params(
        ("key" = String, Query, description = "Sorted set key"),
        ("value" = String, Query, description = "Member to add"),
        ("score" = String, Query, description = "Score as a floating-point number"),
        ("db" = Option<i64>, Query, description = "Logical database index, defaults to 0")
    ),
    responses(
        (status = 200, description = "Count of newly added members", body = String),
        (status = 405, description = "Malformed score or store error", body = String)
    ),
    tag = "cache"
)]
pub async fn zadd_cache_handler(
    State(state): State<AppState>,
    params: FormParams,
) -> Result<String, ApiError> {
    let key = params.trimmed("key");
    let member = params.trimmed("value");
    let score = params.trimmed("score");
    let db = params.db();

    let added = state.store.sorted_set_insert(&key, &member, &score, db).await?;
    Ok(added.to_string())
}

use crate::error::ApiError;
use crate::extract::FormParams;
use crate::routes;
use crate::state::AppState;
use axum::extract::State;

/// GET|POST /getCache handler - read a single key
///
/// A missing key is not an error: the response is 200 with an empty body,
/// so callers can treat "absent" and "empty value" alike.
#[utoipa::path(
    get,
    path = routes::GET_CACHE,
    params(
        ("key" = String, Query, description = "Key to read"),
        ("db" = Option<i64>, Query, description = "Logical database index, defaults to 0")
    ),
    responses(
        (status = 200, description = "Value for the key, empty when the key is absent", body = String),
        (status = 405, description = "Store error", body = String)
    ),
    tag = "cache"
)]
pub async fn get_cache_handler(
    State(state): State<AppState>,
    params: FormParams,
) -> Result<String, ApiError> {
    let key = params.trimmed("key");
    let db = params.db();

    match state.store.fetch(&key, db).await? {
        Some(value) => Ok(value),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::{StoreClient, StoreTarget};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Router, body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(addr: &str) -> Router {
        let target = StoreTarget {
            addr: addr.to_string(),
            password: String::new(),
            default_db: 0,
        };
        let state = AppState {
            store: StoreClient::new(target.clone()),
            config: Arc::new(Config {
                context_path: String::new(),
                port: 8082,
                target,
            }),
        };

        Router::new()
            .route(
                crate::routes::GET_CACHE,
                get(get_cache_handler).post(get_cache_handler),
            )
            .with_state(state)
    }

    #[tokio::test]
    async fn test_get_endpoint_store_unreachable() {
        // Port 1 has no listener, so the store error path is deterministic.
        let app = test_app("127.0.0.1:1");

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/getCache?key=foo")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(!body.is_empty());
    }

    #[tokio::test]
    async fn test_get_endpoint_missing_key_is_empty_ok() {
        let app = test_app("127.0.0.1:6379");

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/getCache?key=get-endpoint-never-written&db=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        if response.status() == StatusCode::METHOD_NOT_ALLOWED {
            println!("missing-key test skipped (no local redis)");
            return;
        }

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}

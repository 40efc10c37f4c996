use std::collections::HashMap;
use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;

/// Form parameters merged from the query string and, when present, an
/// url-encoded request body.
///
/// Both GET and POST requests may carry parameters either way; body values
/// win over query values and the first value per name is kept. Malformed
/// input is treated as absent rather than rejected.
pub struct FormParams(HashMap<String, String>);

impl FormParams {
    /// The named field with surrounding whitespace removed, or the empty
    /// string when the field is absent.
    pub fn trimmed(&self, name: &str) -> String {
        self.0
            .get(name)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    /// The logical database index: `db` field defaulting to 0 when absent,
    /// empty or unparsable.
    pub fn db(&self) -> i64 {
        self.trimmed("db").parse().unwrap_or(0)
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

fn is_form_content_type(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

fn decode(input: &[u8]) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes(input).unwrap_or_default()
}

impl<S> FromRequest<S> for FormParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let query = req.uri().query().unwrap_or_default().to_string();

        let body = if is_form_content_type(&req) {
            axum::body::to_bytes(req.into_body(), usize::MAX)
                .await
                .unwrap_or_default()
        } else {
            Bytes::new()
        };

        let mut params = HashMap::new();
        // Body pairs are inserted first so they take precedence.
        for (name, value) in decode(&body) {
            params.entry(name).or_insert(value);
        }
        for (name, value) in decode(query.as_bytes()) {
            params.entry(name).or_insert(value);
        }

        Ok(Self(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    async fn extract(req: HttpRequest<Body>) -> FormParams {
        FormParams::from_request(req, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_query_string_only() {
        let req = HttpRequest::builder()
            .method("GET")
            .uri("/getCache?key=foo&db=2")
            .body(Body::empty())
            .unwrap();

        let params = extract(req).await;
        assert_eq!(params.trimmed("key"), "foo");
        assert_eq!(params.db(), 2);
    }

    #[tokio::test]
    async fn test_form_body_only() {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/setCache")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("key=foo&value=bar&ttl=60s"))
            .unwrap();

        let params = extract(req).await;
        assert_eq!(params.trimmed("key"), "foo");
        assert_eq!(params.trimmed("value"), "bar");
        assert_eq!(params.trimmed("ttl"), "60s");
    }

    #[tokio::test]
    async fn test_body_wins_over_query() {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/setCache?key=from-query&db=5")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("key=from-body"))
            .unwrap();

        let params = extract(req).await;
        assert_eq!(params.trimmed("key"), "from-body");
        // Query still supplies fields the body does not.
        assert_eq!(params.db(), 5);
    }

    #[tokio::test]
    async fn test_body_ignored_without_form_content_type() {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/setCache?key=from-query")
            .body(Body::from("key=from-body"))
            .unwrap();

        let params = extract(req).await;
        assert_eq!(params.trimmed("key"), "from-query");
    }

    #[tokio::test]
    async fn test_values_are_trimmed() {
        let req = HttpRequest::builder()
            .method("GET")
            .uri("/getCache?key=%20%20foo%20")
            .body(Body::empty())
            .unwrap();

        let params = extract(req).await;
        assert_eq!(params.trimmed("key"), "foo");
    }

    #[test]
    fn test_db_defaults() {
        assert_eq!(FormParams::from_pairs(&[]).db(), 0);
        assert_eq!(FormParams::from_pairs(&[("db", "")]).db(), 0);
        assert_eq!(FormParams::from_pairs(&[("db", "garbage")]).db(), 0);
        assert_eq!(FormParams::from_pairs(&[("db", " 7 ")]).db(), 7);
    }

    #[test]
    fn test_absent_field_is_empty() {
        let params = FormParams::from_pairs(&[("key", "foo")]);
        assert_eq!(params.trimmed("value"), "");
    }
}

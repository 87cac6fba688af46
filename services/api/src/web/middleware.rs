//! services/api/src/web/middleware.rs
//!
//! User identification middleware for per-user routes.

use axum::{
    extract::{Query, Request},
    http::{HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Deserialize)]
struct UserIdQuery {
    user_id: Option<String>,
}

/// Reads the user id from the `x-user-id` header, or from a `user_id` query parameter
/// for WebSocket upgrades where browsers cannot set headers.
pub fn user_id_from(headers: &HeaderMap, uri: &Uri) -> Option<Uuid> {
    let from_header = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let from_query = || {
        Query::<UserIdQuery>::try_from_uri(uri)
            .ok()
            .and_then(|Query(query)| query.user_id)
    };
    from_header
        .or_else(from_query)
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
}

/// Middleware that resolves the user id and inserts it into the request extensions.
///
/// If missing or malformed, returns 400 Bad Request.
pub async fn require_user(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let user_id = user_id_from(req.headers(), req.uri()).ok_or_else(|| {
        warn!(path = %req.uri().path(), "Request without a valid user id");
        StatusCode::BAD_REQUEST
    })?;

    req.extensions_mut().insert(user_id);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn uri(raw: &str) -> Uri {
        raw.parse().unwrap()
    }

    #[test]
    fn header_wins_over_query() {
        let header_id = Uuid::new_v4();
        let query_id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_str(&header_id.to_string()).unwrap());

        let ws = uri(&format!("/ws?user_id={}", query_id));
        assert_eq!(user_id_from(&headers, &ws), Some(header_id));
        assert_eq!(user_id_from(&HeaderMap::new(), &ws), Some(query_id));
    }

    #[test]
    fn query_value_is_percent_decoded() {
        let id = Uuid::new_v4();
        let encoded = id.to_string().replace('-', "%2D");
        let ws = uri(&format!("/ws?locale=bn&user_id={}", encoded));
        assert_eq!(user_id_from(&HeaderMap::new(), &ws), Some(id));
    }

    #[test]
    fn malformed_or_missing_ids_are_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("not-a-uuid"));
        assert_eq!(user_id_from(&headers, &uri("/chat")), None);
        assert_eq!(user_id_from(&HeaderMap::new(), &uri("/ws?locale=bn")), None);
        assert_eq!(user_id_from(&HeaderMap::new(), &uri("/ws?user_id=abc")), None);
    }
}

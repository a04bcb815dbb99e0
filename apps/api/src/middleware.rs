use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use soramayo_core::{AppError, UserIdentity};
use tower_sessions::Session;

use crate::auth::SESSION_USER_KEY;
use crate::error::ApiResult;
use crate::state::AppState;

/// Rejects requests without a session identity and attaches the identity as a
/// request extension for downstream handlers.
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// CSRF guard: state-changing requests must come from the configured frontend.
pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method())
        && !request_matches_origin(request.headers(), &state.frontend_url)
    {
        return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
    }

    Ok(next.run(request).await)
}

fn request_matches_origin(headers: &HeaderMap, allowed_origin: &str) -> bool {
    if headers.get("sec-fetch-site") == Some(&HeaderValue::from_static("cross-site")) {
        return false;
    }

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    origin == allowed_origin || referer.starts_with(allowed_origin)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::request_matches_origin;

    const FRONTEND: &str = "http://localhost:3000";

    #[test]
    fn matching_origin_passes() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static(FRONTEND));
        assert!(request_matches_origin(&headers, FRONTEND));
    }

    #[test]
    fn cross_site_fetch_metadata_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static(FRONTEND));
        headers.insert("sec-fetch-site", HeaderValue::from_static("cross-site"));
        assert!(!request_matches_origin(&headers, FRONTEND));
    }

    #[test]
    fn foreign_origin_without_referer_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("http://evil.test"));
        assert!(!request_matches_origin(&headers, FRONTEND));
    }

    #[test]
    fn referer_under_frontend_passes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::REFERER,
            HeaderValue::from_static("http://localhost:3000/combustible"),
        );
        assert!(request_matches_origin(&headers, FRONTEND));
    }
}

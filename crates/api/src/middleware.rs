use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::context::RequestContext;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone)]
pub struct ContextState {
    /// Cancelled on server shutdown; every request token derives from it.
    pub shutdown: CancellationToken,
}

/// Installs a [`RequestContext`] and wraps the request in an `http` span.
///
/// The request id is taken from `x-request-id` when it holds a UUID, otherwise
/// a fresh UUIDv7 is generated. It is echoed on the response.
pub async fn request_context(
    State(state): State<ContextState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let request_id = extract_request_id(req.headers()).unwrap_or_else(Uuid::now_v7);
    let cancel = state.shutdown.child_token();
    // Fires if the connection drops and this future is abandoned.
    let _guard = cancel.clone().drop_guard();

    req.extensions_mut()
        .insert(RequestContext::new(request_id, cancel));

    let span = tracing::info_span!(
        "http",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = %request_id,
    );

    let mut res = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

fn extract_request_id(headers: &HeaderMap) -> Option<Uuid> {
    let raw = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?;
    Uuid::parse_str(raw.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_must_be_a_uuid() {
        let id = Uuid::now_v7();
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());
        assert_eq!(extract_request_id(&headers), Some(id));

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("not-a-uuid"));
        assert_eq!(extract_request_id(&headers), None);

        assert_eq!(extract_request_id(&HeaderMap::new()), None);
    }
}

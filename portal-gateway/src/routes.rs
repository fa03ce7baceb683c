//! Axum route handlers for the packing portal.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use packing_core::{BatchesEnvelope, RedirectTarget};
use packing_source::PackingSource;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{
    error::PortalError,
    views::{AuthFlow, Views},
};

// ── Shared state ─────────────────────────────────────────────────────────────

/// Everything a request handler can reach.
pub struct AppState {
    pub source: Arc<dyn PackingSource>,
    pub views: Views,
}

impl AppState {
    #[must_use]
    pub fn new(source: Arc<dyn PackingSource>, views: Views) -> Self {
        Self { source, views }
    }
}

type Shared = Arc<AppState>;

// ── Request types ─────────────────────────────────────────────────────────────

/// Decoded query pairs of an authentication page, in request order.
///
/// Kept as pairs so a repeated `redirect_url` still renders the page.
pub type AuthQuery = Vec<(String, String)>;

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router.
pub fn create_router(state: Shared) -> Router {
    let api = Router::new()
        .route("/api/packing", get(packing_batches))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route("/", get(home))
        .route("/sign-up", get(sign_up))
        .route("/sign-in", get(sign_in))
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /api/packing` — current packing batches from the upstream sheet.
///
/// Fetches afresh on every call; responses are marked `no-store`.
///
/// # Errors
/// Returns [`PortalError::Packing`] if the source fails. The client only
/// ever sees the fixed failure message.
pub async fn packing_batches(
    State(state): State<Shared>,
) -> Result<Json<BatchesEnvelope>, PortalError> {
    let batches = state.source.fetch_batches().await?;
    Ok(Json(BatchesEnvelope::from(batches)))
}

/// `GET /` — marketing landing page.
///
/// # Errors
/// Returns [`PortalError::Render`] if the page fails to render.
pub async fn home(State(state): State<Shared>) -> Result<Html<String>, PortalError> {
    state.views.home().map(Html)
}

/// `GET /sign-up` — hosted sign-up widget.
///
/// # Errors
/// Returns a [`PortalError`] if the page fails to render.
pub async fn sign_up(
    State(state): State<Shared>,
    Query(query): Query<AuthQuery>,
) -> Result<Html<String>, PortalError> {
    auth_page(&state, AuthFlow::SignUp, &query)
}

/// `GET /sign-in` — hosted sign-in widget.
///
/// # Errors
/// Returns a [`PortalError`] if the page fails to render.
pub async fn sign_in(
    State(state): State<Shared>,
    Query(query): Query<AuthQuery>,
) -> Result<Html<String>, PortalError> {
    auth_page(&state, AuthFlow::SignIn, &query)
}

fn auth_page(state: &AppState, flow: AuthFlow, query: &AuthQuery) -> Result<Html<String>, PortalError> {
    let target = RedirectTarget::from_params(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    state.views.auth_page(flow, &target).map(Html)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::{config::AuthConfig, views::tests::extract_props};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use packing_core::PackingBatches;
    use packing_source::{SourceError, StaticPackingSource};
    use serde_json::json;
    use tower::ServiceExt;

    /// Yields a different outcome on each call.
    struct SequenceSource {
        outcomes: Mutex<VecDeque<Result<PackingBatches, SourceError>>>,
    }

    #[async_trait]
    impl PackingSource for SequenceSource {
        async fn fetch_batches(&self) -> Result<PackingBatches, SourceError> {
            let next = match self.outcomes.lock() {
                Ok(mut q) => q.pop_front(),
                Err(e) => panic!("sequence lock poisoned: {e}"),
            };
            next.unwrap_or_else(|| Err(SourceError::Unavailable("sequence exhausted".to_owned())))
        }
    }

    fn app_with(source: Arc<dyn PackingSource>) -> Router {
        let views = match Views::new(AuthConfig::new("pk_test_portal")) {
            Ok(v) => v,
            Err(e) => panic!("templates failed to compile: {e}"),
        };
        create_router(Arc::new(AppState::new(source, views)))
    }

    async fn get_response(app: Router, uri: &str) -> Response {
        let req = match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        }
    }

    async fn body_string(resp: Response) -> String {
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn health_response_format_returns_ok_with_status_field() {
        let resp = get_response(app_with(Arc::new(StaticPackingSource::empty())), "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn packing_empty_batches_returns_200_with_empty_array() {
        let resp = get_response(app_with(Arc::new(StaticPackingSource::empty())), "/api/packing").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, r#"{"batches":[]}"#);
    }

    #[tokio::test]
    async fn packing_batches_are_forwarded_verbatim() {
        let source = StaticPackingSource::batches(PackingBatches::new(json!([{"id": "b1"}])));
        let resp = get_response(app_with(Arc::new(source)), "/api/packing").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, r#"{"batches":[{"id":"b1"}]}"#);
    }

    #[tokio::test]
    async fn packing_failure_returns_fixed_500() {
        let resp = get_response(
            app_with(Arc::new(StaticPackingSource::failing("timeout"))),
            "/api/packing",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(resp).await;
        assert_eq!(body, r#"{"error":"Failed to fetch packing data"}"#);
        assert!(!body.contains("timeout"), "error detail leaked to client");
    }

    #[tokio::test]
    async fn packing_responses_are_marked_no_store() {
        for source in [StaticPackingSource::empty(), StaticPackingSource::failing("down")] {
            let resp = get_response(app_with(Arc::new(source)), "/api/packing").await;
            assert_eq!(
                resp.headers().get(CACHE_CONTROL).and_then(|v| v.to_str().ok()),
                Some("no-store"),
                "status {} must carry no-store",
                resp.status()
            );
        }
    }

    #[tokio::test]
    async fn packing_reflects_new_source_result_on_each_call() {
        let source = SequenceSource {
            outcomes: Mutex::new(VecDeque::from([
                Ok(PackingBatches::new(json!([{"id": "b1"}]))),
                Ok(PackingBatches::new(json!([{"id": "b1"}, {"id": "b2"}]))),
                Err(SourceError::Timeout { after: std::time::Duration::from_secs(10) }),
            ])),
        };
        let app = app_with(Arc::new(source));

        let first = get_response(app.clone(), "/api/packing").await;
        assert_eq!(body_string(first).await, r#"{"batches":[{"id":"b1"}]}"#);

        let second = get_response(app.clone(), "/api/packing").await;
        assert_eq!(body_string(second).await, r#"{"batches":[{"id":"b1"},{"id":"b2"}]}"#);

        let third = get_response(app, "/api/packing").await;
        assert_eq!(third.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn sign_up_without_query_redirects_to_root() {
        let resp = get_response(app_with(Arc::new(StaticPackingSource::empty())), "/sign-up").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let props = extract_props(&body_string(resp).await);
        assert_eq!(props.force_redirect_url, "/");
        assert_eq!(props.fallback_redirect_url, "/");
    }

    #[tokio::test]
    async fn sign_up_passes_redirect_url_to_both_props() {
        let resp = get_response(
            app_with(Arc::new(StaticPackingSource::empty())),
            "/sign-up?redirect_url=/dashboard",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let props = extract_props(&body_string(resp).await);
        assert_eq!(props.force_redirect_url, "/dashboard");
        assert_eq!(props.fallback_redirect_url, "/dashboard");
    }

    #[tokio::test]
    async fn sign_up_empty_redirect_url_falls_back_to_root() {
        let resp = get_response(
            app_with(Arc::new(StaticPackingSource::empty())),
            "/sign-up?redirect_url=",
        )
        .await;
        let props = extract_props(&body_string(resp).await);
        assert_eq!(props.force_redirect_url, "/");
        assert_eq!(props.fallback_redirect_url, "/");
    }

    #[tokio::test]
    async fn sign_up_decodes_percent_encoded_redirect_url() {
        let resp = get_response(
            app_with(Arc::new(StaticPackingSource::empty())),
            "/sign-up?redirect_url=%2Forders%3Fid%3D7",
        )
        .await;
        let props = extract_props(&body_string(resp).await);
        assert_eq!(props.force_redirect_url, "/orders?id=7");
        assert_eq!(props.fallback_redirect_url, "/orders?id=7");
    }

    #[tokio::test]
    async fn sign_up_ignores_unrelated_query_parameters() {
        let resp = get_response(
            app_with(Arc::new(StaticPackingSource::empty())),
            "/sign-up?utm_source=mail",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(extract_props(&body_string(resp).await).force_redirect_url, "/");
    }

    #[tokio::test]
    async fn sign_up_repeated_redirect_url_uses_first_value() {
        let resp = get_response(
            app_with(Arc::new(StaticPackingSource::empty())),
            "/sign-up?redirect_url=/a&redirect_url=/b",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let props = extract_props(&body_string(resp).await);
        assert_eq!(props.force_redirect_url, "/a");
        assert_eq!(props.fallback_redirect_url, "/a");
    }

    #[tokio::test]
    async fn sign_up_repeated_redirect_url_skips_empty_values() {
        let resp = get_response(
            app_with(Arc::new(StaticPackingSource::empty())),
            "/sign-up?redirect_url=&redirect_url=/orders",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(extract_props(&body_string(resp).await).force_redirect_url, "/orders");
    }

    #[tokio::test]
    async fn sign_in_passes_redirect_url() {
        let resp = get_response(
            app_with(Arc::new(StaticPackingSource::empty())),
            "/sign-in?redirect_url=/packing",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains("mountSignIn"), "sign-in page must mount the sign-in widget");
        assert_eq!(extract_props(&html).fallback_redirect_url, "/packing");
    }

    #[tokio::test]
    async fn home_renders_inside_marketing_layout() {
        let resp = get_response(app_with(Arc::new(StaticPackingSource::empty())), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains(r#"class="marketing-shell""#), "marketing wrapper missing");
    }

    #[tokio::test]
    async fn pages_do_not_touch_the_packing_source() {
        // A failing source must not affect page rendering.
        let app = app_with(Arc::new(StaticPackingSource::failing("down")));
        for uri in ["/", "/sign-up", "/sign-in", "/health"] {
            let resp = get_response(app.clone(), uri).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri} should render");
        }
    }
}

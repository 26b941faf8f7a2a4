use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, StatusCode, header::USER_AGENT},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, Span, field, info, info_span};
use uuid::Uuid;

use super::AppState;

/// Headers set on every response: CSP directives, frameguard `deny`,
/// `noSniff` and `xssFilter`.
const SECURITY_HEADERS: [(&str, &str); 4] = [
    (
        "content-security-policy",
        "base-uri 'self'; default-src 'none'; script-src 'self'; \
         style-src 'self' 'unsafe-inline'; img-src 'self'; connect-src 'self'; \
         font-src 'self'; form-action 'self'; frame-ancestors 'none'",
    ),
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("x-xss-protection", "1; mode=block"),
];

/// GET /metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// The per-request span opened by [`logging_middleware`], carried in the
/// request extensions so inner layers can fill in fields after other spans
/// have been entered.
#[derive(Clone)]
pub struct RequestSpan(Span);

impl RequestSpan {
    pub fn record_user(&self, user_id: i32) {
        self.0.record("user_id", user_id);
    }
}

/// Tags the request span with the authenticated user.
pub fn record_user(req: &Request, user_id: i32) {
    match req.extensions().get::<RequestSpan>() {
        Some(span) => span.record_user(user_id),
        None => {
            Span::current().record("user_id", user_id);
        }
    }
}

struct RequestLog {
    method: String,
    path: String,
    route: Option<String>,
    user_agent: String,
}

impl RequestLog {
    fn from_request(req: &Request) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            route: req
                .extensions()
                .get::<MatchedPath>()
                .map(|mp| mp.as_str().to_string()),
            user_agent: req
                .headers()
                .get(USER_AGENT)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("unknown")
                .to_string(),
        }
    }

    fn span(&self) -> Span {
        info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %self.method,
            path = %self.path,
            route = self.route.as_deref(),
            user_id = field::Empty,
        )
    }

    fn finish(&self, status: StatusCode, elapsed: Duration) {
        // Unmatched requests fall back to the raw path.
        let route = self.route.as_deref().unwrap_or(&self.path);
        let labels = [
            ("method", self.method.clone()),
            ("path", route.to_string()),
            ("status", status.as_str().to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        let outcome = if status.is_server_error() {
            "error"
        } else if status.is_client_error() {
            "client_error"
        } else {
            "success"
        };

        info!(
            event = "http_request_finished",
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status.as_u16(),
            user_agent = %self.user_agent,
            outcome,
            "Request finished"
        );
    }
}

/// Opens the request span, then records the HTTP metrics and one summary
/// event when the response is ready.
pub async fn logging_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let log = RequestLog::from_request(&req);
    let span = log.span();
    req.extensions_mut().insert(RequestSpan(span.clone()));

    async move {
        let response = next.run(req).await;
        log.finish(response.status(), start.elapsed());
        response
    }
    .instrument(span)
    .await
}

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    response
}

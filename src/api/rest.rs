//! HTTP Handlers
//!
//! Browser form endpoints plus a small JSON API over the same pipeline.

use super::views;
use crate::domain::ports::ClusterId;
use crate::error::{Error, ErrorKind};
use crate::inference::{known_clusters, Assignment, ClusterService};
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Form, Json, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{debug, error, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// A JSON field value; numbers are accepted as well as strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonFieldValue {
    Text(String),
    Number(f64),
    Null(()),
}

impl JsonFieldValue {
    fn into_text(self) -> String {
        match self {
            JsonFieldValue::Text(text) => text,
            JsonFieldValue::Number(n) => n.to_string(),
            JsonFieldValue::Null(()) => String::new(),
        }
    }
}

/// Cluster listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfoResponse {
    pub cluster: ClusterId,
    pub description: String,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// HTTP status for a pipeline error
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::UnknownCategory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Error::NonNumericField { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_failure(err: &Error) {
    match err.kind() {
        ErrorKind::Client => warn!("Rejected submission: {}", err),
        _ => error!("Prediction error: {}", err),
    }
}

// =============================================================================
// REST Router
// =============================================================================

/// Router builder
pub struct RestRouter {
    service: ClusterService,
    max_body_size: usize,
    request_timeout: Duration,
}

impl RestRouter {
    pub fn new(service: ClusterService) -> Self {
        Self {
            service,
            max_body_size: 64 * 1024,
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Override the request body limit
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Override the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the Axum router
    pub fn build(self) -> Router {
        let state = AppState {
            service: self.service,
        };

        Router::new()
            // Browser endpoints
            .route("/", get(index))
            .route("/predict", post(predict_form))
            // JSON endpoints
            .route("/v1/predict", post(predict_json))
            .route("/v1/clusters", get(list_clusters))
            // Operations
            .route("/healthz", get(health_check))
            .route("/readyz", get(readiness_check))
            .route("/metrics", get(metrics))
            .with_state(state)
            .layer(DefaultBodyLimit::max(self.max_body_size))
            .layer(TimeoutLayer::new(self.request_timeout))
            .layer(TraceLayer::new_for_http())
    }
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    service: ClusterService,
}

// =============================================================================
// Handlers
// =============================================================================

/// Input form
async fn index() -> Html<String> {
    Html(views::render_index())
}

/// Form submission → HTML result page
async fn predict_form(
    State(state): State<AppState>,
    Form(form): Form<IndexMap<String, String>>,
) -> Response {
    debug!("Form values: {:?}", form);

    match state.service.assign(form.clone()) {
        Ok(assignment) => Html(views::render_result(&form, &assignment)).into_response(),
        Err(e) => {
            log_failure(&e);
            (status_for(&e), Html(views::render_error(&form, &e.to_string()))).into_response()
        }
    }
}

/// JSON submission → JSON assignment
async fn predict_json(
    State(state): State<AppState>,
    payload: std::result::Result<Json<IndexMap<String, JsonFieldValue>>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("Rejected JSON body: {}", rejection.body_text());
            state.service.metrics().record_error(ErrorKind::Client);
            return (
                rejection.status(),
                Json(ApiErrorResponse {
                    error: "invalid_body".into(),
                    message: "Request body is not a JSON object of field values".into(),
                    details: Some(rejection.body_text()),
                }),
            )
                .into_response();
        }
    };
    debug!("Form values: {:?}", body);

    let form = body.into_iter().map(|(k, v)| (k, v.into_text()));
    match state.service.assign(form) {
        Ok(assignment) => (StatusCode::OK, Json::<Assignment>(assignment)).into_response(),
        Err(e) => {
            log_failure(&e);
            (
                status_for(&e),
                Json(ApiErrorResponse {
                    error: e.code().into(),
                    message: e.to_string(),
                    details: None,
                }),
            )
                .into_response()
        }
    }
}

/// Known cluster descriptions
async fn list_clusters() -> impl IntoResponse {
    let clusters: Vec<ClusterInfoResponse> = known_clusters()
        .map(|(cluster, description)| ClusterInfoResponse {
            cluster,
            description: description.to_string(),
        })
        .collect();

    (StatusCode::OK, Json(clusters))
}

/// Health check
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Readiness check; artifacts are loaded before the router exists
async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, "ready")
}

/// Prometheus exposition
async fn metrics(State(state): State<AppState>) -> Response {
    match state.service.metrics().encode() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            error!("Metrics encoding failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::fixtures::test_store;
    use crate::metrics::ServiceMetrics;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let service = ClusterService::new(test_store(), ServiceMetrics::new().unwrap());
        RestRouter::new(service).build()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_form() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("name=\"V28\""));
    }

    #[tokio::test]
    async fn test_predict_form() {
        let response = app()
            .oneshot(form_request(
                "/predict",
                "V6=10&V10=2&V11=5&V12=3&V7=4G&V9=Samsung+Galaxy+S10",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Predicted cluster: <strong>0</strong>"));
        assert!(html.contains("Cluster 0:"));
        assert!(html.contains("value=\"Samsung Galaxy S10\""));
    }

    #[tokio::test]
    async fn test_predict_form_unknown_category() {
        let response = app()
            .oneshot(form_request("/predict", "V7=6G"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Prediction failed"));
    }

    #[tokio::test]
    async fn test_predict_json() {
        let response = app()
            .oneshot(json_request(
                "/v1/predict",
                serde_json::json!({ "V18": 200, "V9": "Nokia 3310", "V7": "5G" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["cluster"], 2);
        assert_eq!(body["brand"], "Nokia");
        assert_eq!(body["features"]["total_recharge"], 200.0);
        assert_eq!(body["features"]["V7_encoded"], 2.0);
        assert_eq!(body["scaledFeatures"].as_array().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_predict_json_non_numeric() {
        let response = app()
            .oneshot(json_request(
                "/v1/predict",
                serde_json::json!({ "V25": "plenty" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ApiErrorResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body.error, "non_numeric_field");
        assert!(body.message.contains("V25"));
    }

    #[tokio::test]
    async fn test_predict_json_malformed_body() {
        let app = app();

        for body in [serde_json::json!({ "V6": true }), serde_json::json!([1, 2])] {
            let response = app
                .clone()
                .oneshot(json_request("/v1/predict", body))
                .await
                .unwrap();

            assert!(response.status().is_client_error());
            let body: ApiErrorResponse =
                serde_json::from_str(&body_text(response).await).unwrap();
            assert_eq!(body.error, "invalid_body");
            assert!(body.details.is_some());
        }
    }

    #[tokio::test]
    async fn test_list_clusters() {
        let response = app()
            .oneshot(Request::get("/v1/clusters").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let clusters: Vec<ClusterInfoResponse> =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(clusters.len(), 4);
        assert_eq!(clusters[3].cluster, ClusterId(3));
    }

    #[tokio::test]
    async fn test_metrics_after_prediction() {
        let app = app();

        let response = app
            .clone()
            .oneshot(form_request("/predict", "V6=200"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("usage_cluster_predictions_total{cluster=\"1\"} 1"));
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

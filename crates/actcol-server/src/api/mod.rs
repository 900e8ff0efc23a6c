mod brands;
mod debug;
mod filters;

use std::sync::Arc;

use actcol_sheets::{BrandCatalog, SheetsError};
use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<BrandCatalog>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    sheet: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "sheet_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Converts an ingestion failure into a client-safe error. The underlying
/// cause is logged, never returned.
pub(super) fn map_sheets_error(request_id: String, error: &SheetsError) -> ApiError {
    match error {
        SheetsError::MissingSourceUrl | SheetsError::InvalidSourceUrl { .. } => {
            tracing::error!(error = %error, "brand sheet source is misconfigured");
            ApiError::new(request_id, "configuration_error", "brand data source is not configured")
        }
        SheetsError::Http(_) | SheetsError::UnexpectedStatus { .. } => {
            tracing::error!(error = %error, "brand sheet fetch failed");
            ApiError::new(request_id, "sheet_unavailable", "brand data is temporarily unavailable")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/brands", get(brands::list_brands))
        .route("/api/v1/brands/{slug}", get(brands::get_brand))
        .route("/api/v1/filters", get(filters::list_filters))
        .route("/api/v1/debug/brands", get(debug::sheet_summary))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let sheet = if state.catalog.source().published_url.is_some() {
        "configured"
    } else {
        "not_configured"
    };
    Json(ApiResponse::new(
        HealthData {
            status: "ok",
            sheet,
        },
        req_id.0,
    ))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actcol_core::AssetConfig;
    use actcol_sheets::SheetSourceConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const SHEET_CSV: &str = "Brand Name,Tagline,Activity,Region,Website,Gallery\n\
Tracksmith,Amateur spirit,\"Running, Track\",US,https://tracksmith.com,\"a.jpg,b.jpg\"\n\
Vuori,,Yoga/Hiking,US,,\n\
Ciele,Caps,Running,EU,,\n";

    fn app_for(published_url: Option<String>) -> Router {
        let source = SheetSourceConfig {
            published_url,
            sheet_name: "Brands".to_string(),
            revalidate: Duration::from_secs(300),
            request_timeout_secs: 5,
            user_agent: "actcol-test/0.1".to_string(),
            assets: AssetConfig::default(),
        };
        let catalog = BrandCatalog::new(source).expect("catalog");
        build_app(AppState {
            catalog: Arc::new(catalog),
        })
    }

    async fn sheet_server(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sheet/pub"))
            .respond_with(ResponseTemplate::new(status).set_body_string(SHEET_CSV))
            .mount(&server)
            .await;
        server
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[test]
    fn api_error_codes_map_to_statuses() {
        let cases = [
            ("not_found", StatusCode::NOT_FOUND),
            ("bad_request", StatusCode::BAD_REQUEST),
            ("sheet_unavailable", StatusCode::SERVICE_UNAVAILABLE),
            ("configuration_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, expected) in cases {
            let response = ApiError::new("req-1", code, "msg").into_response();
            assert_eq!(response.status(), expected, "code {code}");
        }
    }

    #[tokio::test]
    async fn health_reports_missing_sheet_configuration() {
        let (status, json) = get_json(app_for(None), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["sheet"], "not_configured");
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let response = app_for(None)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
            Some("req-abc")
        );
    }

    #[tokio::test]
    async fn list_brands_returns_all_without_filters() {
        let server = sheet_server(200).await;
        let app = app_for(Some(format!("{}/sheet/pubhtml", server.uri())));
        let (status, json) = get_json(app, "/api/v1/brands").await;
        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["slug"], "tracksmith");
        assert_eq!(data[0]["tokens"]["activity"][1]["label"], "Track");
    }

    #[tokio::test]
    async fn list_brands_applies_and_or_filters() {
        let server = sheet_server(200).await;
        let app = app_for(Some(format!("{}/sheet/pubhtml", server.uri())));
        let (status, json) =
            get_json(app, "/api/v1/brands?activity=running,yoga&regions=us").await;
        assert_eq!(status, StatusCode::OK);
        let slugs: Vec<&str> = json["data"]
            .as_array()
            .expect("data array")
            .iter()
            .filter_map(|b| b["slug"].as_str())
            .collect();
        assert_eq!(slugs, vec!["tracksmith", "vuori"]);
    }

    #[tokio::test]
    async fn list_brands_merges_repeated_category_keys() {
        let server = sheet_server(200).await;
        let app = app_for(Some(format!("{}/sheet/pubhtml", server.uri())));
        let (status, json) = get_json(app, "/api/v1/brands?activity=track&activity=yoga").await;
        assert_eq!(status, StatusCode::OK);
        let slugs: Vec<&str> = json["data"]
            .as_array()
            .expect("data array")
            .iter()
            .filter_map(|b| b["slug"].as_str())
            .collect();
        assert_eq!(slugs, vec!["tracksmith", "vuori"]);
    }

    #[tokio::test]
    async fn list_brands_rejects_unknown_category() {
        let server = sheet_server(200).await;
        let app = app_for(Some(format!("{}/sheet/pubhtml", server.uri())));
        let (status, json) = get_json(app, "/api/v1/brands?colour=red").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn get_brand_returns_detail() {
        let server = sheet_server(200).await;
        let app = app_for(Some(format!("{}/sheet/pubhtml", server.uri())));
        let (status, json) = get_json(app, "/api/v1/brands/tracksmith").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["brand"]["name"], "Tracksmith");
        assert_eq!(json["data"]["detail"]["website"], "https://tracksmith.com");
        assert_eq!(json["data"]["page_title"], "Tracksmith | The Active Collection");
        assert_eq!(json["data"]["recommended"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["data"]["at_a_glance"][1]["value"], "Data missing:Shipping Locations");
    }

    #[tokio::test]
    async fn get_brand_unknown_slug_is_not_found() {
        let server = sheet_server(200).await;
        let app = app_for(Some(format!("{}/sheet/pubhtml", server.uri())));
        let (status, json) = get_json(app, "/api/v1/brands/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn filters_are_listed_in_category_order() {
        let server = sheet_server(200).await;
        let app = app_for(Some(format!("{}/sheet/pubhtml", server.uri())));
        let (status, json) = get_json(app, "/api/v1/filters").await;
        assert_eq!(status, StatusCode::OK);
        let categories = json["data"].as_array().expect("data array");
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0]["id"], "regions");
        assert_eq!(categories[0]["label"], "Region");
        let activity: Vec<&str> = categories[2]["options"]
            .as_array()
            .expect("options")
            .iter()
            .filter_map(|o| o["value"].as_str())
            .collect();
        assert_eq!(activity, vec!["hiking", "running", "track", "yoga"]);
    }

    #[tokio::test]
    async fn upstream_failure_is_service_unavailable() {
        let server = sheet_server(500).await;
        let app = app_for(Some(format!("{}/sheet/pubhtml", server.uri())));
        let (status, json) = get_json(app, "/api/v1/brands").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"]["code"], "sheet_unavailable");
    }

    #[tokio::test]
    async fn missing_source_url_is_configuration_error() {
        let (status, json) = get_json(app_for(None), "/api/v1/debug/brands").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "configuration_error");
    }

    #[tokio::test]
    async fn debug_summary_reports_sheet_shape() {
        let server = sheet_server(200).await;
        let app = app_for(Some(format!("{}/sheet/pubhtml", server.uri())));
        let (status, json) = get_json(app, "/api/v1/debug/brands").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["count"], 3);
        assert_eq!(json["data"]["headers"][0], "Brand Name");
        assert_eq!(json["data"]["first_row"]["Region"], "US");
    }
}

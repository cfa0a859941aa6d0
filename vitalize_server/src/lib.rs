#![forbid(unsafe_code)]

//! HTTP surface for the Vitalize record store.
//!
//! Minimal REST: `POST /bmi` accepts a submission, `GET /bmi` lists up
//! to 10 live records most-recent-first, `GET /healthz` is a liveness
//! probe. All state is volatile; a restart clears history.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use vitalize_core::{BmiRecord, Error, RecordInput, RecordStore};

/// Shared handler state
pub type AppState = Arc<RecordStore>;

/// Build the application router
pub fn build_router(store: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/bmi", post(save_record).get(list_records))
        .with_state(store)
}

/// Error surface of the HTTP handlers
///
/// Validation and computation failures are terminal for the triggering
/// request and map to 400; nothing is fatal to the process.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match err {
            Error::Validation(_) | Error::Computation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

#[derive(Debug, Clone, Serialize)]
struct SaveResponse {
    message: &'static str,
    id: Uuid,
}

async fn save_record(
    State(store): State<AppState>,
    Json(input): Json<RecordInput>,
) -> Result<(StatusCode, Json<SaveResponse>), ApiError> {
    let record = store.add(input)?;
    tracing::info!("saved record {} ({})", record.id, record.category);
    Ok((
        StatusCode::CREATED,
        Json(SaveResponse {
            message: "Record saved successfully",
            id: record.id,
        }),
    ))
}

#[derive(Debug, Clone, Deserialize)]
struct ListQuery {
    limit: Option<usize>,
}

async fn list_records(
    State(store): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<BmiRecord>> {
    Json(store.list(query.limit))
}

#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "vitalize_server",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use vitalize_core::{BmiCategory, SystemClock};

    fn app() -> Router {
        build_router(Arc::new(RecordStore::new(Arc::new(SystemClock))))
    }

    fn post_body(payload: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/bmi")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    fn get_records(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn submission(name: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "age": 25,
            "gender": "Male",
            "height": 170.0,
            "weight": 65.0,
            "bmi": 22.49,
            "category": "Normal"
        })
    }

    #[tokio::test]
    async fn post_valid_submission_returns_201_with_id() {
        let response = app().oneshot(post_body(&submission("Alex"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Record saved successfully");
        assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn post_missing_weight_returns_400_and_no_mutation() {
        let app = app();

        let payload = serde_json::json!({
            "name": "Alex",
            "age": 25,
            "gender": "Male",
            "height": 170.0
        });
        let response = app.clone().oneshot(post_body(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("weight"));

        let response = app.oneshot(get_records("/bmi")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn post_non_positive_height_returns_400() {
        let payload = serde_json::json!({
            "name": "Alex",
            "height": 0.0,
            "weight": 65.0
        });
        let response = app().oneshot(post_body(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn post_malformed_json_is_client_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/bmi")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn get_returns_ten_most_recent_first() {
        let app = app();

        for i in 1..=12 {
            let response = app
                .clone()
                .oneshot(post_body(&submission(&format!("r{i}"))))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app.oneshot(get_records("/bmi")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0]["name"], "r12");
        assert_eq!(records[9]["name"], "r3");
    }

    #[tokio::test]
    async fn get_respects_limit_query() {
        let app = app();

        for i in 1..=5 {
            app.clone()
                .oneshot(post_body(&submission(&format!("r{i}"))))
                .await
                .unwrap();
        }

        let response = app.oneshot(get_records("/bmi?limit=2")).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn stored_category_is_derived_not_trusted() {
        let app = app();

        // Client claims Obese with a wildly wrong BMI; height/weight say Normal.
        let payload = serde_json::json!({
            "name": "Alex",
            "height": 170.0,
            "weight": 65.0,
            "bmi": 99.0,
            "category": "Obese"
        });
        app.clone().oneshot(post_body(&payload)).await.unwrap();

        let response = app.oneshot(get_records("/bmi")).await.unwrap();
        let body = json_body(response).await;
        let record = &body.as_array().unwrap()[0];
        assert_eq!(record["bmi"], 22.49);
        assert_eq!(
            serde_json::from_value::<BmiCategory>(record["category"].clone()).unwrap(),
            BmiCategory::Normal
        );
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let response = app().oneshot(get_records("/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }
}

// nl2sql/src/http/handlers.rs
//
// POST /api/ai-query and GET /health.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use nl2sql_core::domain::DomainError;
use nl2sql_core::infrastructure::error::{InfrastructureError, ModelError};
use nl2sql_core::{ErrorKind, Nl2SqlError};

use super::server::AppState;

/// Shown for every server-side failure; details stay in the logs.
pub const GENERIC_FAILURE: &str = "Failed to process your question. Please try again.";

#[derive(Debug, Deserialize)]
pub struct AiQueryRequest {
    // Missing and empty are the same failure: "The field 'question' is required."
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_sql: Option<String>,
}

impl ErrorResponse {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            reason: None,
            generated_sql: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn post_ai_query(
    State(state): State<AppState>,
    payload: Result<Json<AiQueryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, "Malformed AI query request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::message(rejection.body_text())),
            )
                .into_response();
        }
    };

    match state.gateway.process_question(&request.question).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}

pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Maps a pipeline failure to a status code and body.
///
/// Input and validation failures are the caller's to fix and are explained.
/// Everything else gets the generic message.
pub fn error_response(err: &Nl2SqlError) -> (StatusCode, Json<ErrorResponse>) {
    match err.kind() {
        ErrorKind::Input => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message(err.to_string())),
        ),
        ErrorKind::Validation => {
            let mut body = ErrorResponse::message(err.to_string());
            if let Nl2SqlError::Domain(DomainError::UnsafeStatement { sql, reason }) = err {
                body.reason = Some(reason.to_string());
                body.generated_sql = Some(sql.clone());
            }
            (StatusCode::BAD_REQUEST, Json(body))
        }
        ErrorKind::Generation => {
            error!(error = %err, "Generation failed");
            let status = match err {
                Nl2SqlError::Generation(InfrastructureError::LanguageModel(
                    ModelError::Timeout(_),
                )) => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(ErrorResponse::message(GENERIC_FAILURE)))
        }
        ErrorKind::Execution | ErrorKind::Internal => {
            error!(error = %err, kind = err.kind().as_str(), "NL2SQL request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::message(GENERIC_FAILURE)),
            )
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::http::server::router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, header};
    use nl2sql_core::Nl2SqlGateway;
    use nl2sql_core::domain::{QueryOutput, Row, SqlValue};
    use nl2sql_core::infrastructure::config::GatewayConfig;
    use nl2sql_core::infrastructure::error::DatabaseError;
    use nl2sql_core::ports::{LanguageModel, Prompt, QueryExecutor, SamplingConfig};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    enum Reply {
        Sql(&'static str),
        Timeout,
    }

    struct FakeModel(Reply);

    #[async_trait]
    impl LanguageModel for FakeModel {
        async fn generate(
            &self,
            _prompt: &Prompt,
            _sampling: &SamplingConfig,
        ) -> Result<String, InfrastructureError> {
            match self.0 {
                Reply::Sql(sql) => Ok(sql.to_string()),
                Reply::Timeout => Err(ModelError::Timeout(Duration::from_secs(20)).into()),
            }
        }

        fn model_name(&self) -> &str {
            "fake"
        }
    }

    #[derive(Default)]
    struct FakeStore {
        calls: AtomicUsize,
        broken: bool,
    }

    #[async_trait]
    impl QueryExecutor for FakeStore {
        async fn execute(
            &self,
            _sql: &str,
            _row_cap: usize,
            _timeout: Duration,
        ) -> Result<QueryOutput, InfrastructureError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.broken {
                return Err(DatabaseError::Timeout(Duration::from_secs(10)).into());
            }
            let row = Row::from([
                ("Name".to_string(), SqlValue::Text("Desk Lamp".into())),
                ("Category".to_string(), SqlValue::Null),
            ]);
            Ok(QueryOutput {
                columns: vec!["Name".into(), "Category".into()],
                rows: vec![row],
            })
        }

        fn engine_name(&self) -> &str {
            "fake"
        }
    }

    fn app(reply: Reply, store: Arc<FakeStore>) -> axum::Router {
        let gateway =
            Nl2SqlGateway::new(Arc::new(FakeModel(reply)), store, &GatewayConfig::default())
                .unwrap();
        router(
            AppState {
                gateway: Arc::new(gateway),
            },
            None,
        )
    }

    async fn post(app: axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/ai-query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_successful_query_uses_camel_case_shape() {
        let store = Arc::new(FakeStore::default());
        let app = app(Reply::Sql("SELECT Name, Category FROM Products"), store);

        let (status, json) = post(app, r#"{"question": "What is on sale?"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["question"], "What is on sale?");
        assert_eq!(json["generatedSql"], "SELECT Name, Category FROM Products");
        assert_eq!(json["columns"], serde_json::json!(["Name", "Category"]));
        assert_eq!(json["rowCount"], 1);
        assert_eq!(json["rows"][0]["Name"], "Desk Lamp");
        assert!(json["rows"][0]["Category"].is_null());
        assert!(json["executionTimeMs"].is_u64());
    }

    #[tokio::test]
    async fn test_blank_question_is_bad_request() {
        let store = Arc::new(FakeStore::default());
        let (status, json) = post(app(Reply::Sql("SELECT 1"), store.clone()), r#"{"question": "  "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "The field 'question' is required.");

        let (status, json) = post(app(Reply::Sql("SELECT 1"), store.clone()), "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "The field 'question' is required.");
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let store = Arc::new(FakeStore::default());
        let (status, json) = post(app(Reply::Sql("SELECT 1"), store), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn test_rejected_sql_reports_reason_and_statement() {
        let store = Arc::new(FakeStore::default());
        let app = app(Reply::Sql("DELETE FROM Products"), store.clone());

        let (status, json) = post(app, r#"{"question": "Delete all products"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["reason"], "only read statements are allowed");
        assert_eq!(json["generatedSql"], "DELETE FROM Products");
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_model_timeout_is_gateway_timeout() {
        let store = Arc::new(FakeStore::default());
        let (status, json) = post(app(Reply::Timeout, store), r#"{"question": "Anything"}"#).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(json["message"], GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let store = Arc::new(FakeStore {
            broken: true,
            ..FakeStore::default()
        });
        let app = app(Reply::Sql("SELECT Name FROM Products"), store);

        let (status, json) = post(app, r#"{"question": "Names"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], GENERIC_FAILURE);
        assert!(json.get("generatedSql").is_none());
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(Reply::Sql("SELECT 1"), Arc::new(FakeStore::default()));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

//! HTTP interface
//!
//! - `POST /ensemble` with `{"query": "..."}` returns the aggregated response
//! - `GET /health` returns `{"status": "ok"}`
//!
//! Every query failure maps to `500 {"detail": <message>}`. When no provider
//! succeeded the message is `All LLM Providers Failed`.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use ensemble_application::{HandleQueryError, HandleQueryUseCase};
use ensemble_domain::{AggregatedResponse, Query};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

/// Request body for `POST /ensemble`
#[derive(Debug, Deserialize)]
pub struct EnsembleRequest {
    pub query: String,
}

/// Query failure rendered as a 500 with a `detail` message
struct ApiError(HandleQueryError);

impl From<HandleQueryError> for ApiError {
    fn from(error: HandleQueryError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_no_successful_provider() {
            warn!("Every provider failed");
        } else {
            error!("Query failed: {}", self.0);
        }
        let body = serde_json::json!({ "detail": self.0.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Build the router over a shared query handler
pub fn router(handler: Arc<HandleQueryUseCase>) -> Router {
    Router::new()
        .route("/ensemble", post(ensemble_handler))
        .route("/health", get(health_handler))
        .with_state(handler)
}

async fn ensemble_handler(
    State(handler): State<Arc<HandleQueryUseCase>>,
    Json(request): Json<EnsembleRequest>,
) -> Result<Json<AggregatedResponse>, ApiError> {
    let query = Query::new(request.query);
    info!("POST /ensemble ({} bytes)", query.as_str().len());

    let response = handler.handle(&query).await?;
    Ok(Json(response))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve(
    listener: TcpListener,
    handler: Arc<HandleQueryUseCase>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}", addr);
    }

    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use ensemble_application::{
        JudgeOutcomesUseCase, NoCache, ProviderAdapter, RunEnsembleUseCase,
    };
    use ensemble_domain::ProviderOutcome;
    use std::time::Duration;
    use tower::ServiceExt;

    enum Behavior {
        Answer(&'static str, Duration),
        Fail(&'static str),
        Panic,
    }

    struct StubAdapter {
        name: &'static str,
        behavior: Behavior,
    }

    #[async_trait]
    impl ProviderAdapter for StubAdapter {
        fn name(&self) -> &str {
            self.name
        }

        async fn invoke(&self, _query: &str) -> ProviderOutcome {
            match self.behavior {
                Behavior::Answer(content, elapsed) => {
                    ProviderOutcome::success(self.name, content, elapsed)
                }
                Behavior::Fail(error) => {
                    ProviderOutcome::failure(self.name, error, Duration::from_millis(10))
                }
                Behavior::Panic => panic!("adapter bug"),
            }
        }
    }

    fn app(adapters: Vec<StubAdapter>) -> Router {
        let adapters: Vec<Arc<dyn ProviderAdapter>> = adapters
            .into_iter()
            .map(|a| Arc::new(a) as Arc<dyn ProviderAdapter>)
            .collect();
        let handler = HandleQueryUseCase::new(
            Arc::new(NoCache),
            RunEnsembleUseCase::new(adapters),
            JudgeOutcomesUseCase::fastest_responder(),
        );
        router(Arc::new(handler))
    }

    fn post_query(query: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ensemble")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "query": query }).to_string(),
            ))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app(vec![])
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_ensemble_returns_aggregated_response() {
        let response = app(vec![
            StubAdapter {
                name: "A",
                behavior: Behavior::Answer("4", Duration::from_millis(800)),
            },
            StubAdapter {
                name: "B",
                behavior: Behavior::Answer("Four", Duration::from_millis(1200)),
            },
        ])
        .oneshot(post_query("What is 2+2?"))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["input_query"], "What is 2+2?");
        assert_eq!(json["final_judge_result"], "[JUDGE: Chose A in 0.80s] 4");
        assert_eq!(json["model_results"].as_array().unwrap().len(), 2);
        assert_eq!(json["model_results"][1]["model"], "B");
    }

    #[tokio::test]
    async fn test_all_providers_failed_is_500_with_detail() {
        let response = app(vec![
            StubAdapter {
                name: "A",
                behavior: Behavior::Fail("timeout"),
            },
            StubAdapter {
                name: "B",
                behavior: Behavior::Fail("rate limited"),
            },
        ])
        .oneshot(post_query("hello"))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "detail": "All LLM Providers Failed" })
        );
    }

    #[tokio::test]
    async fn test_fatal_error_is_500_with_message() {
        let response = app(vec![StubAdapter {
            name: "A",
            behavior: Behavior::Panic,
        }])
        .oneshot(post_query("hello"))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("Internal error while running providers"));
    }

    #[tokio::test]
    async fn test_missing_query_field_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/ensemble")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"prompt":"hi"}"#))
            .unwrap();

        let response = app(vec![]).oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }
}

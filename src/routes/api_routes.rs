use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chat_core::AskRequest;
use tracing::{info, warn};

use crate::errors::HostError;
use crate::models::{ChatPayload, HealthResponse, UpstreamStatus};
use crate::service::relay_service::RelayService;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/api/chat` — validates the question and relays it to the QA service
pub async fn chat_handler(
    State(svc): State<RelayService>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => return HostError::InvalidBody(rejection.body_text()).into_response(),
    };

    match svc.ask(AskRequest { question: payload.question }).await {
        Ok((status, body)) => (status, Json(body)).into_response(),
        Err(err) if err.is_upstream() => {
            warn!("QA service unreachable: {err:?}");
            err.into_response()
        }
        Err(err) => {
            info!("question rejected: {err}");
            err.into_response()
        }
    }
}

/// GET `/api/health` — the host is healthy whenever it answers; upstream state is informational
pub async fn health_handler(State(svc): State<RelayService>) -> impl IntoResponse {
    let upstream = if svc.upstream_healthy().await {
        UpstreamStatus::Up
    } else {
        UpstreamStatus::Down
    };
    Json(HealthResponse::new(upstream))
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use chat_core::{AskResponse, SourcePage};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::routes::router;

    /// Starts `app` on an ephemeral port and returns its base URL.
    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// A base URL nothing listens on.
    async fn dead_upstream() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn host(upstream: &str) -> Router {
        let svc = RelayService::new(upstream, Duration::from_secs(5)).unwrap();
        router(svc, Path::new("does-not-exist"))
    }

    async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn answer_is_relayed_verbatim() {
        let upstream = spawn_upstream(Router::new().route(
            "/api/chat",
            post(|Json(req): Json<AskRequest>| async move {
                Json(AskResponse::answered(format!("about {}", req.question), Some(SourcePage::page(42))))
            }),
        ))
        .await;

        let (status, body) = post_chat(host(&upstream), r#"{"question":"flu"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "answer": "about flu", "source_page": 42}));
    }

    #[tokio::test]
    async fn blank_question_never_reaches_upstream() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let upstream = spawn_upstream(Router::new().route(
            "/api/chat",
            post(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Json(AskResponse::answered("unexpected", None)) }
            }),
        ))
        .await;

        for body in [r#"{"question":"   "}"#, r#"{}"#] {
            let (status, json) = post_chat(host(&upstream), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json, json!({"success": false, "error": "Question is required"}));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (status, json) = post_chat(host(&dead_upstream().await), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn upstream_failure_status_is_kept() {
        let upstream = spawn_upstream(Router::new().route(
            "/api/chat",
            post(|| async {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(AskResponse::failure("index not loaded")))
            }),
        ))
        .await;

        let (status, body) = post_chat(host(&upstream), r#"{"question":"flu"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"success": false, "error": "index not loaded"}));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_bad_gateway_without_its_address() {
        let upstream = dead_upstream().await;
        let (status, body) = post_chat(host(&upstream), r#"{"question":"flu"}"#).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({"success": false, "error": "Failed to connect to the server"}));
        assert!(!body.to_string().contains(upstream.trim_start_matches("http://")));
    }

    #[tokio::test]
    async fn widget_reads_gateway_failure_as_connection_problem() {
        let (status, body) = post_chat(host(&dead_upstream().await), r#"{"question":"flu"}"#).await;

        let mut conv = chat_core::Conversation::new();
        conv.set_input("flu");
        conv.begin_submission().unwrap();
        conv.settle(chat_core::errors::read_reply(status.as_u16(), &body.to_string()));

        assert_eq!(conv.last_error(), Some("Failed to connect to the server"));
        assert!(conv.messages().last().unwrap().content.contains("check your connection"));
    }

    #[tokio::test]
    async fn non_json_upstream_is_bad_gateway() {
        let upstream = spawn_upstream(
            Router::new().route("/api/chat", post(|| async { "<html>oops</html>" })),
        )
        .await;

        let (status, body) = post_chat(host(&upstream), r#"{"question":"flu"}"#).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Failed to connect to the server");
    }

    async fn get_health(app: Router) -> Value {
        let req = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_upstream_state() {
        let upstream = spawn_upstream(Router::new().route(
            "/api/health",
            get(|| async { Json(json!({"status": "healthy"})) }),
        ))
        .await;
        assert_eq!(get_health(host(&upstream)).await, json!({"status": "healthy", "upstream": "up"}));

        let down = get_health(host(&dead_upstream().await)).await;
        assert_eq!(down, json!({"status": "healthy", "upstream": "down"}));
    }
}

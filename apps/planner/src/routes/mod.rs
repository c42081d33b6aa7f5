pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::planner::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/health", get(health::health_handler))
        .route("/api/v1/plans", post(handlers::handle_generate))
        .route("/api/v1/plans/download", post(handlers::handle_download))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::fake::FakeCompletion;
    use crate::planner::builder::PromptBuilder;
    use crate::planner::prompts::CSV_HEADER;
    use crate::planner::requester::PlanRequester;
    use crate::planner::service::PlanService;

    // -----------------------------------------------------------------------
    // HTTP helpers
    // -----------------------------------------------------------------------

    fn app(fake: Arc<FakeCompletion>) -> Router {
        let requester = PlanRequester::from_backend(fake, "gpt-4o-mini");
        build_router(AppState {
            planner: Arc::new(PlanService::new(PromptBuilder::form(), requester)),
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn form() -> Value {
        json!({"level": "初学者", "days": 2, "minutes": 30, "goal": ""})
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_index_returns_html() {
        let resp = app(Arc::new(FakeCompletion::replying("")))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.contains("text/html"), "got: {content_type}");
        let html = String::from_utf8(body_bytes(resp).await).unwrap();
        assert!(html.contains("/api/v1/plans"));
    }

    #[tokio::test]
    async fn test_health() {
        let resp = app(Arc::new(FakeCompletion::replying("")))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model"], "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_generate_returns_rows_and_filename() {
        let reply = format!("{CSV_HEADER}\n01,握拍,握拍;挥拍,30,低,放松\n02,步法,并步,30,中,重心");
        let fake = Arc::new(FakeCompletion::replying(&reply));

        let resp = post_json(app(fake.clone()), "/api/v1/plans", form()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["csv"], reply);
        assert_eq!(json["rows"].as_array().unwrap().len(), 2);
        assert_eq!(json["rows"][0]["Day"], "01");
        assert_eq!(json["rows"][1]["Intensity"], "中");
        assert_eq!(json["warnings"], json!([]));
        let filename = json["filename"].as_str().unwrap();
        assert!(filename.starts_with("plan_beginner_2d_"), "got: {filename}");
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_decode_failure_returns_raw_text() {
        let fake = Arc::new(FakeCompletion::replying("这是一个计划，但不是 CSV。"));

        let resp = post_json(app(fake), "/api/v1/plans", form()).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "DECODE_FAILURE");
        assert_eq!(json["error"]["raw_text"], "这是一个计划，但不是 CSV。");
    }

    #[tokio::test]
    async fn test_generate_request_failure_is_bad_gateway() {
        let fake = Arc::new(FakeCompletion::failing(500, "upstream down"));
        let resp = post_json(app(fake), "/api/v1/plans", form()).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "REQUEST_FAILURE");
    }

    #[tokio::test]
    async fn test_generate_rejects_zero_days_without_calling_model() {
        let fake = Arc::new(FakeCompletion::replying("unused"));
        let resp = post_json(
            app(fake.clone()),
            "/api/v1/plans",
            json!({"level": "beginner", "days": 0, "minutes": 30}),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_rejects_oversized_plan_without_calling_model() {
        let fake = Arc::new(FakeCompletion::replying("unused"));
        let resp = post_json(
            app(fake.clone()),
            "/api/v1/plans",
            json!({"level": "beginner", "days": 4_000_000_000u32, "minutes": 30}),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "INVALID_REQUEST");
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_download_is_bom_prefixed_csv() {
        let rows = json!([{
            "Day": "01", "Theme": "握拍", "Drills": "握拍;挥拍",
            "DurationMin": 30, "Intensity": "低", "Notes": "放松"
        }]);
        let resp = post_json(
            app(Arc::new(FakeCompletion::replying(""))),
            "/api/v1/plans/download",
            json!({"level": "advanced", "days": 1, "rows": rows}),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("plan_advanced_1d_"), "got: {disposition}");

        let bytes = body_bytes(resp).await;
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert_eq!(text, format!("{CSV_HEADER}\n01,握拍,握拍;挥拍,30,低,放松\n"));
    }

    #[tokio::test]
    async fn test_download_rejects_empty_rows() {
        let resp = post_json(
            app(Arc::new(FakeCompletion::replying(""))),
            "/api/v1/plans/download",
            json!({"level": "beginner", "days": 7, "rows": []}),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

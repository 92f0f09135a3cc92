//! HTTP 接口层
//!
//! 路由定义和共享状态，处理函数按功能分组：
//! - website: 分析和历史记录接口

pub mod website;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::domains::WebsiteService;

/// 应用状态，所有请求共享
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WebsiteService>,
}

impl AppState {
    pub fn new(service: WebsiteService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// 创建路由
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/analyze", post(website::analyze))
        .route("/history", get(website::history));

    Router::new()
        .route("/health", get(website::health))
        .nest("/api", api)
        // 前端单独部署，需要跨域访问
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::website::tests::StaticFetcher;
    use crate::domains::RecordOptions;
    use crate::storage::SqliteRepository;
    use serde_json::{json, Value};

    /// 在随机端口启动完整服务，返回基础地址
    async fn spawn_app(html: &str, dir: &tempfile::TempDir) -> String {
        let db_path = dir.path().join("api.db");
        let repo = Arc::new(
            SqliteRepository::new(&db_path.to_string_lossy())
                .await
                .unwrap(),
        );
        let fetcher = Arc::new(StaticFetcher::html(html));
        let service = WebsiteService::new(fetcher, repo, RecordOptions::default());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(AppState::new(service)))
                .await
                .unwrap();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_analyze_then_history_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let base = spawn_app("<title>Minimal Page</title><p>Just text</p>", &dir).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/api/analyze", base))
            .json(&json!({ "url": "https://example.com" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["total"]["score"], 10.0);

        let history: Value = client
            .get(format!("{}/api/history", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let records = history.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["url"], "https://example.com");
        assert_eq!(records[0]["score"], 10.0);
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_bad_requests() {
        let dir = tempfile::tempdir().unwrap();
        let base = spawn_app("<title>x</title>", &dir).await;
        let client = reqwest::Client::new();

        let bodies = [
            ("application/json", "{}".to_string()),
            ("application/json", r#"{"url": null}"#.to_string()),
            ("application/json", r#"{"url": 42}"#.to_string()),
            ("application/json", "not json".to_string()),
            ("text/plain", r#"{"url": "https://a.com"}"#.to_string()),
        ];

        for (content_type, body) in bodies {
            let response = client
                .post(format!("{}/api/analyze", base))
                .header("content-type", content_type)
                .body(body)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body["message"], "URL is required");
        }

        // 无效请求不会产生历史记录
        let history: Value = client
            .get(format!("{}/api/history?limit=abc", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(history.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let base = spawn_app("<title>x</title>", &dir).await;

        let text = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(text, "OK");
    }
}

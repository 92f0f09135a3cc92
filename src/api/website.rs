//! 网站分析接口
//!
//! - `POST /api/analyze`: 抓取并评分
//! - `GET /api/history`: 历史记录（按创建时间倒序）

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::AppState;
use crate::domains::HistoryQuery;
use crate::utils::validate_url;

/// 分析失败时返回给客户端的信息
pub const ANALYZE_ERROR_MESSAGE: &str = "Error analyzing URL";
/// 历史记录查询失败时返回给客户端的信息
pub const HISTORY_ERROR_MESSAGE: &str = "Error fetching analyses";

/// 分析请求体
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// 错误响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(MessageBody {
            message: message.to_string(),
        }),
    )
        .into_response()
}

// ==================== 接口处理函数 ====================

/// 分析 URL
///
/// 请求体无法解析时按缺少 URL 处理（400），不会触发抓取和写入
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("分析请求体无法解析: {}", rejection);
            AnalyzeRequest::default()
        }
    };

    let url = match validate_url(request.url.as_deref()) {
        Ok(url) => url,
        Err(e) => return message_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    match state.service.analyze_and_record(url).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            error!("分析 URL 失败: {} - {}", url, e);
            message_response(StatusCode::INTERNAL_SERVER_ERROR, ANALYZE_ERROR_MESSAGE)
        }
    }
}

/// 获取历史记录
///
/// 查询参数无法解析时忽略，使用默认条数
pub async fn history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!("历史记录查询参数无效，使用默认值: {}", rejection);
            HistoryQuery::default()
        }
    };

    match state.service.list_analyses(&query).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            error!("获取历史记录失败: {}", e);
            message_response(StatusCode::INTERNAL_SERVER_ERROR, HISTORY_ERROR_MESSAGE)
        }
    }
}

/// 健康检查
pub async fn health() -> &'static str {
    "OK"
}

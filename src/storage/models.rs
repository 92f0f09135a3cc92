// 数据模型定义 - 数据库实体结构

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// 获取当前 UTC 时间，截断到微秒
///
/// MariaDB 的 DATETIME(6) 只保存到微秒，统一截断后插入返回值与读回值一致
pub fn utc_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// 分析记录（持久化）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: i64,
    pub url: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>, // 原始 HTML，仅在开启 store_html 时保存
    #[serde(serialize_with = "serialize_datetime_iso")]
    pub created_at: DateTime<Utc>,
}

/// 待插入的分析记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnalysisRecord {
    pub url: String,
    pub score: f64,
    pub html: Option<String>,
}

impl NewAnalysisRecord {
    pub fn new(url: impl Into<String>, score: f64) -> Self {
        Self {
            url: url.into(),
            score,
            html: None,
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// 补全服务端生成的字段，得到完整记录
    pub(crate) fn into_record(self, id: i64, created_at: DateTime<Utc>) -> AnalysisRecord {
        AnalysisRecord {
            id,
            url: self.url,
            score: self.score,
            html: self.html,
            created_at,
        }
    }
}

/// 自定义序列化：DateTime<Utc> -> ISO 8601 字符串（毫秒精度，带 Z 后缀）
/// 前端直接用 `new Date(...)` 解析
fn serialize_datetime_iso<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

//! 错误类型定义
//!
//! 按来源划分：客户端输入错误、抓取错误、持久化错误、启动配置错误

use thiserror::Error;

/// 领域结果类型
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// 分析服务错误
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// 请求参数不合法（客户端错误，400）
    #[error("{0}")]
    Validation(String),

    /// 网络请求失败或返回空内容（500）
    #[error("{0}")]
    Fetch(String),

    /// 数据库读写失败（500）
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// 启动配置错误
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalyzerError {
    /// 是否由客户端输入导致
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalyzerError::Validation(_))
    }
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        AnalyzerError::Fetch(err.to_string())
    }
}

impl From<sqlx::Error> for AnalyzerError {
    fn from(err: sqlx::Error) -> Self {
        AnalyzerError::Persistence(err.to_string())
    }
}

impl From<anyhow::Error> for AnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        // 存储层统一返回 anyhow::Error，需保留完整的错误链
        AnalyzerError::Persistence(format!("{:#}", err))
    }
}

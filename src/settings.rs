// 服务配置 - JSON 配置文件 + 环境变量覆盖

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AnalyzerError, Result};
use crate::storage::DatabaseConfig;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "SITE_ANALYZER_CONFIG";

/// 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 数据库连接字符串（必填）
    pub database_url: Option<String>,
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 分析成功后是否写入历史记录
    pub record_history: bool,
    /// 是否同时保存页面 HTML
    pub store_html: bool,
    /// 抓取超时（秒），为空表示不设置
    pub fetch_timeout_secs: Option<u64>,
    /// 日志目录，为空时只输出到控制台
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            host: "0.0.0.0".to_string(),
            port: 3000,
            record_history: true,
            store_html: false,
            fetch_timeout_secs: None,
            log_dir: None,
        }
    }
}

impl Settings {
    /// 加载配置：先读配置文件（如果指定），再用进程环境变量覆盖
    pub async fn load() -> Result<Self> {
        let mut settings = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim())).await?,
            _ => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// 从 JSON 文件读取配置，缺省字段使用默认值
    pub async fn from_file(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AnalyzerError::Config(format!("读取配置文件失败 {}: {}", path.display(), e))
        })?;

        let settings = serde_json::from_slice::<Settings>(&bytes).map_err(|e| {
            AnalyzerError::Config(format!("解析配置文件失败 {}: {}", path.display(), e))
        })?;

        info!("已加载配置文件: {}", path.display());
        Ok(settings)
    }

    /// 用环境变量覆盖配置项
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("DATABASE_URL") {
            self.database_url = Some(url.trim().to_string());
        }
        if let Some(host) = get("HOST") {
            self.host = host.trim().to_string();
        }
        if let Some(port) = get("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| AnalyzerError::Config(format!("PORT 不是合法端口: {}", port)))?;
        }
        if let Some(value) = get("RECORD_HISTORY") {
            self.record_history = parse_bool("RECORD_HISTORY", &value)?;
        }
        if let Some(value) = get("STORE_HTML") {
            self.store_html = parse_bool("STORE_HTML", &value)?;
        }
        if let Some(value) = get("FETCH_TIMEOUT_SECS") {
            let secs = value.trim().parse::<u64>().map_err(|_| {
                AnalyzerError::Config(format!("FETCH_TIMEOUT_SECS 不是合法秒数: {}", value))
            })?;
            self.fetch_timeout_secs = (secs > 0).then_some(secs);
        }
        if let Some(dir) = get("LOG_DIR") {
            self.log_dir = Some(PathBuf::from(dir.trim()));
        }

        Ok(())
    }

    /// 解析数据库配置，未设置或格式错误时返回配置错误
    pub fn database_config(&self) -> Result<DatabaseConfig> {
        let url = self
            .database_url
            .as_deref()
            .ok_or_else(|| AnalyzerError::Config("DATABASE_URL 未设置".to_string()))?;

        DatabaseConfig::from_url(url).map_err(|e| AnalyzerError::Config(e.to_string()))
    }

    /// 抓取超时
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    /// 监听地址（host:port）
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AnalyzerError::Config(format!(
            "{} 不是合法布尔值: {}",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bind_address(), "0.0.0.0:3000");
        assert!(settings.record_history);
        assert!(!settings.store_html);
        assert!(settings.fetch_timeout().is_none());
    }

    #[test]
    fn test_missing_database_url_is_config_error() {
        let settings = Settings::default();
        assert!(matches!(
            settings.database_config(),
            Err(AnalyzerError::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings
            .apply_env(env_of(&[
                ("DATABASE_URL", "sqlite:data/test.db"),
                ("HOST", "127.0.0.1"),
                ("PORT", "8080"),
                ("RECORD_HISTORY", "false"),
                ("STORE_HTML", "yes"),
                ("FETCH_TIMEOUT_SECS", "15"),
                ("LOG_DIR", "/tmp/logs"),
            ]))
            .unwrap();

        assert_eq!(settings.bind_address(), "127.0.0.1:8080");
        assert!(!settings.record_history);
        assert!(settings.store_html);
        assert_eq!(settings.fetch_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(settings.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(
            settings.database_config().unwrap(),
            DatabaseConfig::SQLite {
                db_path: "data/test.db".to_string()
            }
        );
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut settings = Settings::default();
        settings
            .apply_env(env_of(&[("PORT", "  "), ("DATABASE_URL", "")]))
            .unwrap();
        assert_eq!(settings.port, 3000);
        assert!(settings.database_url.is_none());
    }

    #[test]
    fn test_invalid_env_values() {
        let mut settings = Settings::default();
        assert!(settings.apply_env(env_of(&[("PORT", "abc")])).is_err());
        assert!(settings.apply_env(env_of(&[("STORE_HTML", "maybe")])).is_err());
        assert!(settings
            .apply_env(env_of(&[("FETCH_TIMEOUT_SECS", "-1")]))
            .is_err());
    }

    #[tokio::test]
    async fn test_from_file_with_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{"port": 4000, "store_html": true}"#)
            .await
            .unwrap();

        let settings = Settings::from_file(&path).await.unwrap();
        assert_eq!(settings.port, 4000);
        assert!(settings.store_html);
        assert_eq!(settings.host, "0.0.0.0");
        assert!(settings.record_history);
    }

    #[tokio::test]
    async fn test_from_file_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        assert!(matches!(
            Settings::from_file(&path).await,
            Err(AnalyzerError::Config(_))
        ));
    }
}

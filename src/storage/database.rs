// 数据库入口 - 根据配置打开对应的数据库实现

use super::config::DatabaseConfig;
use super::repository::mariadb::MariaDbRepository;
use super::repository::sqlite::SqliteRepository;
use super::repository::AnalysisRepository;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// 按配置连接数据库并初始化表结构
///
/// 连接池在进程启动时创建一次，之后由所有请求共享
pub async fn open_repository(config: &DatabaseConfig) -> Result<Arc<dyn AnalysisRepository>> {
    let repo: Arc<dyn AnalysisRepository> = match config {
        DatabaseConfig::SQLite { db_path } => Arc::new(
            SqliteRepository::new(db_path)
                .await
                .with_context(|| format!("打开 SQLite 数据库失败: {}", db_path))?,
        ),
        DatabaseConfig::MariaDB {
            host,
            port,
            database,
            username,
            password,
        } => Arc::new(
            MariaDbRepository::new(host, *port, database, username, password)
                .await
                .context("打开 MariaDB 数据库失败")?,
        ),
    };

    info!("数据库已就绪，类型: {}", repo.db_type());
    Ok(repo)
}

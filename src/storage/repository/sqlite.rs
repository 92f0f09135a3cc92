// SQLite 数据库实现

use super::AnalysisRepository;
use crate::storage::models::*;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tracing::info;

const MEMORY_DB_PATH: &str = ":memory:";

/// SQLite 数据库实现
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// 创建新的 SQLite 数据库连接
    pub async fn new(db_path: &str) -> Result<Self> {
        info!("初始化 SQLite 数据库: {}", db_path);

        let pool = if db_path == MEMORY_DB_PATH {
            // 内存数据库每个连接各自独立，只能保持单个长连接
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await?
        } else {
            // 确保数据库文件的目录存在
            if let Some(parent) = std::path::Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            // 添加 ?mode=rwc 参数确保创建数据库
            SqlitePoolOptions::new()
                .max_connections(20)
                .min_connections(2)
                .idle_timeout(Duration::from_secs(180))
                .max_lifetime(Duration::from_secs(1800))
                .acquire_timeout(Duration::from_secs(10))
                .connect(&format!("sqlite:{}?mode=rwc", db_path))
                .await?
        };

        let repo = Self { pool };

        // 初始化表结构
        repo.initialize_tables().await?;

        Ok(repo)
    }
}

#[async_trait]
impl AnalysisRepository for SqliteRepository {
    async fn save(&self, record: &NewAnalysisRecord) -> Result<AnalysisRecord> {
        let created_at = utc_now();
        let result = sqlx::query(
            r#"
            INSERT INTO analyses (url, score, html, created_at)
            VALUES (?1, ?2, ?3, ?4)
        "#,
        )
        .bind(&record.url)
        .bind(record.score)
        .bind(&record.html)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(record
            .clone()
            .into_record(result.last_insert_rowid(), created_at))
    }

    async fn list(&self, limit: i64) -> Result<Vec<AnalysisRecord>> {
        let records = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT id, url, score, html, created_at
            FROM analyses
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn list_by_url(&self, url: &str, limit: i64) -> Result<Vec<AnalysisRecord>> {
        let records = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT id, url, score, html, created_at
            FROM analyses
            WHERE url = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(url)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<AnalysisRecord>> {
        let record = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT id, url, score, html, created_at
            FROM analyses
            WHERE url = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn initialize_tables(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS analyses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT NOT NULL,
                score REAL NOT NULL,
                html TEXT,
                created_at DATETIME NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_analyses_url ON analyses(url)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_analyses_created_at ON analyses(created_at)")
            .execute(&self.pool)
            .await?;

        info!("SQLite 数据库表初始化完成");
        Ok(())
    }

    fn db_type(&self) -> &str {
        "sqlite"
    }
}

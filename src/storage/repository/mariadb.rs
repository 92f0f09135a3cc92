// MariaDB 数据库实现

use super::AnalysisRepository;
use crate::storage::models::*;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

/// MariaDB 数据库实现
pub struct MariaDbRepository {
    pool: MySqlPool,
}

impl MariaDbRepository {
    /// 创建新的 MariaDB 数据库连接
    pub async fn new(
        host: &str,
        port: u16,
        database: &str,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        info!(
            "初始化 MariaDB 数据库: {}@{}:{}/{}",
            username, host, port, database
        );

        // 先连接到 MySQL 服务器（不指定数据库），检查并创建数据库
        let server_url = format!(
            "mysql://{}:{}@{}:{}?connect_timeout=30",
            username, password, host, port
        );

        info!("连接到 MariaDB 服务器检查数据库是否存在...");
        let server_pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&server_url)
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "连接 MariaDB 服务器失败 ({}:{}): {}\n\n请检查：\n1. MariaDB 服务是否已启动\n2. 网络连接是否正常\n3. 主机地址和端口是否正确",
                    host, port, e
                )
            })?;

        let db_exists: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.schemata WHERE schema_name = ?",
        )
        .bind(database)
        .fetch_one(&server_pool)
        .await?;

        if db_exists == 0 {
            info!("数据库 '{}' 不存在，正在创建...", database);
            sqlx::query(&format!(
                "CREATE DATABASE `{}` CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci",
                database.replace('`', "``")
            ))
            .execute(&server_pool)
            .await?;
            info!("数据库 '{}' 创建成功", database);
        }

        // 关闭临时连接
        server_pool.close().await;

        let connection_url = format!(
            "mysql://{}:{}@{}:{}/{}?connect_timeout=30",
            username, password, host, port, database
        );

        info!("创建 MariaDB 连接池...");
        let pool = MySqlPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .idle_timeout(Duration::from_secs(180))
            .max_lifetime(Duration::from_secs(1800))
            .acquire_timeout(Duration::from_secs(30))
            .connect(&connection_url)
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "创建 MariaDB 连接池失败 ({}:{}/{}): {}",
                    host,
                    port,
                    database,
                    e
                )
            })?;

        info!("MariaDB 连接池创建成功");

        let repo = Self { pool };
        repo.initialize_tables().await?;

        Ok(repo)
    }
}

#[async_trait]
impl AnalysisRepository for MariaDbRepository {
    async fn save(&self, record: &NewAnalysisRecord) -> Result<AnalysisRecord> {
        let created_at = utc_now();
        let result = sqlx::query(
            r#"
            INSERT INTO analyses (url, score, html, created_at)
            VALUES (?, ?, ?, ?)
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
            .into_record(result.last_insert_id() as i64, created_at))
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
        // url 只对前 255 个字符建索引，避免超过 InnoDB 索引长度限制
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS analyses (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                url VARCHAR(2048) NOT NULL,
                score DOUBLE NOT NULL,
                html LONGTEXT,
                created_at DATETIME(6) NOT NULL,
                INDEX idx_analyses_url (url(255)),
                INDEX idx_analyses_created_at (created_at)
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
        "#,
        )
        .execute(&self.pool)
        .await?;

        info!("MariaDB 数据库表初始化完成");
        Ok(())
    }

    fn db_type(&self) -> &str {
        "mariadb"
    }
}

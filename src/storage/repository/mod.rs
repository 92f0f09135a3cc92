// Repository 抽象层 - 定义数据库操作接口

pub mod mariadb;
pub mod sqlite;

use super::models::*;
use anyhow::Result;
use async_trait::async_trait;

/// 历史记录默认返回条数
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// 数据库操作接口 - 所有数据库实现必须实现此 trait
///
/// 记录只追加：没有更新和删除操作，同一 URL 的多次分析都会保留
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// 插入一条分析记录，返回带 id 和创建时间的完整记录
    async fn save(&self, record: &NewAnalysisRecord) -> Result<AnalysisRecord>;

    /// 按创建时间倒序获取最近的记录
    async fn list(&self, limit: i64) -> Result<Vec<AnalysisRecord>>;

    /// 按创建时间倒序获取某个 URL 的记录
    async fn list_by_url(&self, url: &str, limit: i64) -> Result<Vec<AnalysisRecord>>;

    /// 获取某个 URL 最新的一条记录
    async fn find_by_url(&self, url: &str) -> Result<Option<AnalysisRecord>>;

    /// 初始化数据库表结构
    async fn initialize_tables(&self) -> Result<()>;

    /// 获取数据库类型标识
    fn db_type(&self) -> &str;
}

// 网站分析领域服务
//
// 串联抓取、扫描、评分和持久化
// 抓取器和仓库都以 trait 对象注入，请求之间只共享这两个句柄

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::analysis::{calculate_score, scan_html, ScoreResult};
use crate::error::Result;
use crate::fetcher::HtmlFetcher;
use crate::storage::{AnalysisRecord, AnalysisRepository, NewAnalysisRecord, DEFAULT_LIST_LIMIT};

/// 历史记录单次查询上限
pub const MAX_LIST_LIMIT: i64 = 200;

/// 记录策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOptions {
    /// 分析成功后写入历史记录
    pub record_history: bool,
    /// 历史记录中保存页面 HTML
    pub store_html: bool,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            record_history: true,
            store_html: false,
        }
    }
}

/// 历史记录查询参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    pub url: Option<String>,
}

impl HistoryQuery {
    /// 实际使用的条数，限制在 1..=MAX_LIST_LIMIT
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }
}

/// 网站分析服务
#[derive(Clone)]
pub struct WebsiteService {
    fetcher: Arc<dyn HtmlFetcher>,
    repository: Arc<dyn AnalysisRepository>,
    options: RecordOptions,
}

impl WebsiteService {
    /// 创建新的网站分析服务
    pub fn new(
        fetcher: Arc<dyn HtmlFetcher>,
        repository: Arc<dyn AnalysisRepository>,
        options: RecordOptions,
    ) -> Self {
        Self {
            fetcher,
            repository,
            options,
        }
    }

    /// 获取记录策略
    pub fn options(&self) -> RecordOptions {
        self.options
    }

    async fn fetch_and_score(&self, url: &str) -> Result<(String, ScoreResult)> {
        let html = self.fetcher.fetch_html(url).await?;
        let data = scan_html(&html)?;
        debug!("页面扫描结果: {} {:?}", url, data);
        Ok((html, calculate_score(&data)))
    }

    /// 抓取并评分，不写入历史记录
    pub async fn analyze_url(&self, url: &str) -> Result<ScoreResult> {
        let (_, result) = self.fetch_and_score(url).await?;
        Ok(result)
    }

    /// 抓取、评分，并按记录策略写入历史记录
    ///
    /// 写入失败视为整个分析失败
    pub async fn analyze_and_record(&self, url: &str) -> Result<ScoreResult> {
        let (html, result) = self.fetch_and_score(url).await?;
        info!("分析完成: {} 得分 {}", url, result.friendly_score());

        if self.options.record_history {
            let mut record = NewAnalysisRecord::new(url, result.total.score);
            if self.options.store_html {
                record = record.with_html(html);
            }
            let saved = self.create_analysis_record(&record).await?;
            debug!("已保存分析记录 id={}", saved.id);
        }

        Ok(result)
    }

    /// 写入一条分析记录
    pub async fn create_analysis_record(
        &self,
        record: &NewAnalysisRecord,
    ) -> Result<AnalysisRecord> {
        Ok(self.repository.save(record).await?)
    }

    /// 最近的分析记录（默认 50 条）
    pub async fn list_all_analyses(&self) -> Result<Vec<AnalysisRecord>> {
        self.list_analyses(&HistoryQuery::default()).await
    }

    /// 按查询参数获取分析记录，按创建时间倒序
    pub async fn list_analyses(&self, query: &HistoryQuery) -> Result<Vec<AnalysisRecord>> {
        let limit = query.effective_limit();
        let records = match query.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => self.repository.list_by_url(url, limit).await?,
            None => self.repository.list(limit).await?,
        };
        Ok(records)
    }

    /// 某个 URL 最新的分析记录
    pub async fn latest_analysis_for_url(&self, url: &str) -> Result<Option<AnalysisRecord>> {
        Ok(self.repository.find_by_url(url).await?)
    }
}

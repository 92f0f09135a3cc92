// 页面抓取模块
// 负责通过 HTTP GET 获取网页 HTML 文本

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::Result;

/// HTML 抓取接口，便于在服务层替换为测试实现
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    /// 获取 URL 对应的原始 HTML 文本
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// 基于 reqwest 的 HTTP 抓取器
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// 创建新的抓取器
    ///
    /// `timeout` 为空时不设置超时，等待远端自行结束
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HtmlFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        debug!("抓取页面: {}", url);

        // 与浏览器 fetch 一致：非 2xx 状态码也读取响应体
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("页面抓取完成: {} (状态码 {}, {} 字节)", url, status, body.len());
        Ok(body)
    }
}

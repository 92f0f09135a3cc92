//! 应用程序初始化和启动
//!
//! 负责服务的完整启动流程，包括：
//! - 配置加载
//! - 日志系统初始化
//! - 数据库连接
//! - HTTP 服务启动

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::{self, AppState};
use crate::domains::{RecordOptions, WebsiteService};
use crate::fetcher::HttpFetcher;
use crate::logger;
use crate::settings::Settings;
use crate::storage;

/// 应用程序入口点
///
/// 启动步骤：
/// 1. 加载配置（配置文件 + 环境变量）
/// 2. 日志系统初始化
/// 3. 连接数据库并初始化表结构，失败即退出
/// 4. 组装服务并监听 HTTP 端口
pub async fn run() -> Result<()> {
    let settings = Settings::load().await?;

    // guard 必须持有到进程结束
    let _log_guard = logger::init(settings.log_dir.as_deref())?;

    info!("初始化网页分析服务...");

    let db_config = settings.database_config()?;
    info!("使用数据库: {}", db_config.db_type());
    let repository = storage::open_repository(&db_config).await?;

    let fetcher = Arc::new(HttpFetcher::new(settings.fetch_timeout())?);
    let options = RecordOptions {
        record_history: settings.record_history,
        store_html: settings.store_html,
    };
    info!("记录策略: {:?}", options);

    let service = WebsiteService::new(fetcher, repository, options);
    let app = api::router(AppState::new(service));

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("无法监听地址 {}", address))?;
    info!("服务已启动: http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

/// 等待 Ctrl-C
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("收到退出信号，正在关闭服务...");
    }
}

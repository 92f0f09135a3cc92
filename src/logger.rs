// 日志初始化 - 控制台 + 按天轮转的日志文件

use std::path::Path;

use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// 未设置 RUST_LOG 时的默认过滤规则
const DEFAULT_FILTER: &str = "info";

/// 初始化日志系统
///
/// - 日志级别由 `RUST_LOG` 控制，默认 `info`
/// - 指定 `log_dir` 时同时写入 `<log_dir>/app.log`（每天轮转）
///
/// 返回的 guard 需要在整个程序生命周期内持有，drop 后文件日志不再刷新
pub fn init(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // 使用本地时区
    let timer = LocalTime::new(
        time::format_description::parse(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]",
        )
        .map_err(|e| anyhow!("日志时间格式无效: {}", e))?,
    );

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_ansi(cfg!(debug_assertions)); // release 版本不使用颜色代码

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;

            // 配置日志输出到文件（每天轮转）
            let file_appender = tracing_appender::rolling::daily(dir, "app.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // 同时输出到控制台和文件
            let writer = std::io::stdout.and(non_blocking);
            builder
                .with_writer(writer)
                .try_init()
                .map_err(|e| anyhow!("日志系统初始化失败: {}", e))?;

            eprintln!("日志文件位置: {:?}", dir);
            Ok(Some(guard))
        }
        None => {
            builder
                .try_init()
                .map_err(|e| anyhow!("日志系统初始化失败: {}", e))?;
            Ok(None)
        }
    }
}

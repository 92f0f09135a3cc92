use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match site_analyzer_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // 日志系统可能尚未初始化，直接输出到 stderr
            eprintln!("启动失败: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

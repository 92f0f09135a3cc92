// 网页可访问性/SEO 评分服务 - 主库

// 声明模块
pub mod analysis;
pub mod api;
pub mod app;
pub mod domains;
pub mod error;
pub mod fetcher;
pub mod logger;
pub mod settings;
pub mod storage;
pub mod utils;

pub use app::run;
pub use error::{AnalyzerError, Result};

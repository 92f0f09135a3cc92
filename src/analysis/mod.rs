//! 页面分析模块
//!
//! 负责核心的评分业务逻辑，包括：
//! - 基于正则的 HTML 标签扫描
//! - 根据扫描结果计算可访问性/SEO 得分

pub mod html_scanner;
pub mod scorer;

// 重新导出常用结构体和函数
pub use html_scanner::*;
pub use scorer::*;

// 领域模块 - 用于组织应用的业务逻辑
//
// 目前只有网站分析一个领域:抓取、评分、历史记录

pub mod website;

pub use website::{HistoryQuery, RecordOptions, WebsiteService};

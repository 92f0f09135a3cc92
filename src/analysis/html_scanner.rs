// HTML 扫描 - 用正则提取页面结构信号，不是完整的 HTML 解析器

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::{AnalyzerError, Result};

/// 抓取结果为空时的错误信息
pub const EMPTY_HTML_MESSAGE: &str = "Unable to fetch website HTML";

/// 页面扫描结果（评分输入）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysisData {
    /// 是否存在 `<title>` 标签（只判断存在，不检查内容是否为空）
    pub title_exists_and_is_not_empty: bool,
    pub total_img_tags: u32,
    pub img_tags_without_alt: u32,
    pub total_input_tags: u32,
    pub inputs_without_label: u32,
}

struct TagPatterns {
    title: Regex,
    img: Regex,
    img_empty_alt: Regex,
    input: Regex,
    input_empty_label: Regex,
}

fn patterns() -> &'static TagPatterns {
    // 使用 OnceLock 缓存正则表达式对象
    static PATTERNS: OnceLock<TagPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| TagPatterns {
        title: Regex::new(r"<title>(.*?)</title>").unwrap(),
        img: Regex::new(r"<img[^>]*>").unwrap(),
        img_empty_alt: Regex::new(r#"<img[^>]*alt="""#).unwrap(),
        input: Regex::new(r"<input[^>]*>").unwrap(),
        input_empty_label: Regex::new(r#"<input[^>]*label="""#).unwrap(),
    })
}

fn count(re: &Regex, html: &str) -> u32 {
    re.find_iter(html).count() as u32
}

/// 扫描 HTML 文本，统计标题、图片和输入框信号
///
/// 已知局限（保持原样）：只有字面量 `alt=""` / `label=""` 才算缺失。
/// `alt="描述"` 不算缺失，完全没有 `alt` 属性的 `<img>` 也不算缺失。
/// 匹配区分大小写，嵌套或畸形标签按正则的自然结果处理。
///
/// # 错误
/// - HTML 为空时返回 `AnalyzerError::Fetch("Unable to fetch website HTML")`
pub fn scan_html(html: &str) -> Result<PageAnalysisData> {
    if html.is_empty() {
        return Err(AnalyzerError::Fetch(EMPTY_HTML_MESSAGE.to_string()));
    }

    let p = patterns();
    Ok(PageAnalysisData {
        title_exists_and_is_not_empty: p.title.is_match(html),
        total_img_tags: count(&p.img, html),
        img_tags_without_alt: count(&p.img_empty_alt, html),
        total_input_tags: count(&p.input, html),
        inputs_without_label: count(&p.input_empty_label, html),
    })
}

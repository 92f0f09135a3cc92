//! 输入验证工具函数
//!
//! 请求进入抓取和持久化之前的参数检查

use crate::error::{AnalyzerError, Result};

/// URL 缺失时返回给客户端的信息
pub const URL_REQUIRED_MESSAGE: &str = "URL is required";

/// 验证请求中的 URL 是否存在
///
/// # 参数
/// - `url`: 请求体中的 url 字段
///
/// # 返回
/// - `Ok(&str)`: 去掉首尾空白后的 URL
/// - `Err(AnalyzerError::Validation)`: 字段缺失、为空或只有空白
pub fn validate_url(url: Option<&str>) -> Result<&str> {
    match url.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(AnalyzerError::Validation(URL_REQUIRED_MESSAGE.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert_eq!(validate_url(Some("https://a.com")).unwrap(), "https://a.com");
        assert_eq!(validate_url(Some("  https://a.com \n")).unwrap(), "https://a.com");

        for missing in [None, Some(""), Some("   ")] {
            let err = validate_url(missing).unwrap_err();
            assert!(err.is_client_error());
            assert_eq!(err.to_string(), URL_REQUIRED_MESSAGE);
        }
    }
}

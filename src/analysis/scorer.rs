// 评分计算 - 根据扫描结果计算三项子得分和总分

use serde::{Deserialize, Serialize};

use super::html_scanner::PageAnalysisData;

/// 标题满分
pub const TITLE_MAX_SCORE: f64 = 3.0;
/// 图片 alt 满分
pub const IMAGE_ALT_MAX_SCORE: f64 = 4.0;
/// 输入框 label 满分
pub const INPUT_LABEL_MAX_SCORE: f64 = 3.0;
/// 总分满分
pub const TOTAL_MAX_SCORE: f64 = 10.0;

/// 单项得分
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScore {
    pub score: f64,
    pub max_score: f64,
}

/// 评分结果，直接作为 `/api/analyze` 的响应体
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub title_score: SubScore,
    pub image_alt_score: SubScore,
    pub input_label_score: SubScore,
    pub total: SubScore,
}

impl ScoreResult {
    /// 便于阅读的总分，例如 `8/10`、`7.5/10`
    pub fn friendly_score(&self) -> String {
        format!("{}/{}", self.total.score, self.total.max_score)
    }
}

/// 四舍五入保留一位小数
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 按缺失比例从满分中扣减；没有该类元素时给满分
fn ratio_score(max: f64, total: u32, missing: u32) -> f64 {
    if total == 0 {
        return max;
    }
    debug_assert!(missing <= total, "缺失数不能超过元素总数");
    let failure_ratio = f64::from(missing) / f64::from(total);
    round1(max * (1.0 - failure_ratio))
}

/// 计算可访问性/SEO 得分
///
/// - 标题：存在得 3 分，否则 0 分
/// - 图片 alt：`4 * (1 - 缺失数/图片数)`，保留一位小数
/// - 输入框 label：`3 * (1 - 缺失数/输入框数)`，保留一位小数
/// - 总分：三项之和再保留一位小数
pub fn calculate_score(data: &PageAnalysisData) -> ScoreResult {
    let title = if data.title_exists_and_is_not_empty {
        TITLE_MAX_SCORE
    } else {
        0.0
    };
    let image_alt = ratio_score(
        IMAGE_ALT_MAX_SCORE,
        data.total_img_tags,
        data.img_tags_without_alt,
    );
    let input_label = ratio_score(
        INPUT_LABEL_MAX_SCORE,
        data.total_input_tags,
        data.inputs_without_label,
    );

    ScoreResult {
        title_score: SubScore {
            score: title,
            max_score: TITLE_MAX_SCORE,
        },
        image_alt_score: SubScore {
            score: image_alt,
            max_score: IMAGE_ALT_MAX_SCORE,
        },
        input_label_score: SubScore {
            score: input_label,
            max_score: INPUT_LABEL_MAX_SCORE,
        },
        total: SubScore {
            score: round1(title + image_alt + input_label),
            max_score: TOTAL_MAX_SCORE,
        },
    }
}

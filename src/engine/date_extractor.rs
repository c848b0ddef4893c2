// ==========================================
// 商品保质期追踪 - 标签日期提取引擎
// ==========================================
// 职责: 从 OCR/AI 转写的标签文本推断生产日期与到期日
// 输入: 自由文本（大小写、空白不敏感）
// 输出: ExtractedDates（字段可缺省）
// 红线: 任意输入都不报错;不读取系统时钟,同输入同输出
// ==========================================

use crate::domain::product::ExtractedDates;
use crate::domain::types::{BestBeforeDuration, DurationUnit};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

// ==========================================
// 匹配模式（作用于归一化后的小写文本）
// ==========================================

/// 裸月/年: M/YYYY, MM-YYYY
static BARE_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2})[/\-]([0-9]{4})").expect("valid regex"));

/// 生产日期标记: mfg / manufacturing / manufactured
static MFG_LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:mfg|manufacturing|manufactured)\s*:?\s*([0-9]{1,2})[/\-]([0-9]{4})")
        .expect("valid regex")
});

/// 到期日标记: exp / expiry / expires
static EXP_LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:exp|expiry|expires)\s*:?\s*([0-9]{1,2})[/\-]([0-9]{4})")
        .expect("valid regex")
});

/// 保质期时长: best before N months/years
static BEST_BEFORE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"best\s+before\s+([0-9]+)\s*(month|months|year|years|yr|yrs)")
        .expect("valid regex")
});

// ==========================================
// LabelSignals - 标签中识别到的原始信号
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSignals {
    /// 全部合法的裸月/年（按出现顺序,已剔除非法月份）
    pub bare_dates: Vec<NaiveDate>,
    /// 第一个合法的生产日期标记
    pub labeled_manufacturing: Option<NaiveDate>,
    /// 第一个合法的到期日标记
    pub labeled_expiry: Option<NaiveDate>,
    /// 第一个保质期时长
    pub best_before: Option<BestBeforeDuration>,
}

// ==========================================
// DateExtractor - 标签日期提取引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct DateExtractor {
    // 无状态引擎,模式为进程级静态
}

impl DateExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// 提取生产日期与到期日
    pub fn extract(&self, label_text: &str) -> ExtractedDates {
        let normalized = Self::normalize(label_text);
        let signals = self.scan(&normalized);
        let dates = Self::resolve(&signals);

        debug!(
            bare_dates = signals.bare_dates.len(),
            labeled_manufacturing = signals.labeled_manufacturing.is_some(),
            labeled_expiry = signals.labeled_expiry.is_some(),
            best_before = ?signals.best_before,
            manufacturing_date = ?dates.manufacturing_date,
            expiry_date = ?dates.expiry_date,
            "标签日期提取完成"
        );

        dates
    }

    /// 文本归一化: 小写 + 连续空白折叠为单个空格 + 去首尾空白
    pub fn normalize(text: &str) -> String {
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// 在归一化文本上独立匹配全部信号
    pub fn scan(&self, normalized: &str) -> LabelSignals {
        let bare_dates = BARE_DATE_PATTERN
            .captures_iter(normalized)
            .filter_map(|caps| month_year_from(&caps))
            .collect();

        LabelSignals {
            bare_dates,
            labeled_manufacturing: first_labeled_date(&MFG_LABEL_PATTERN, normalized),
            labeled_expiry: first_labeled_date(&EXP_LABEL_PATTERN, normalized),
            best_before: best_before_from(normalized),
        }
    }

    /// 按优先级合成结果
    ///
    /// 规则（顺序执行,每步只填尚未设置的字段）:
    /// 1) 生产日期标记 → manufacturing_date
    /// 2) 否则第 1 个裸日期 → manufacturing_date
    /// 3) 到期日标记 → expiry_date
    /// 4) 否则第 2 个裸日期 → expiry_date
    /// 5) 仍无到期日 且 有保质期时长 且 有生产日期 → 生产日期 + 时长
    /// 6) 两者皆空 且 恰有 1 个裸日期 且 有保质期时长 → 该日期作生产日期并推算到期日
    ///
    /// 第 3 个及之后的裸日期不参与判定。
    pub fn resolve(signals: &LabelSignals) -> ExtractedDates {
        let mut result = ExtractedDates {
            manufacturing_date: signals
                .labeled_manufacturing
                .or_else(|| signals.bare_dates.first().copied()),
            expiry_date: signals
                .labeled_expiry
                .or_else(|| signals.bare_dates.get(1).copied()),
        };

        if result.expiry_date.is_none() {
            if let (Some(duration), Some(mfg)) = (signals.best_before, result.manufacturing_date) {
                result.expiry_date = duration.add_to(mfg);
            }
        }

        if result.is_empty() && signals.bare_dates.len() == 1 {
            if let Some(duration) = signals.best_before {
                let mfg = signals.bare_dates[0];
                result.manufacturing_date = Some(mfg);
                result.expiry_date = duration.add_to(mfg);
            }
        }

        result
    }
}

/// 便捷函数: 使用默认引擎提取
pub fn extract_dates(label_text: &str) -> ExtractedDates {
    DateExtractor::new().extract(label_text)
}

// ==========================================
// 内部辅助
// ==========================================

/// (月, 年) 捕获组 → 当月 1 日;非法月份返回 None
fn month_year_from(caps: &Captures<'_>) -> Option<NaiveDate> {
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    let year: i32 = caps.get(2)?.as_str().parse().ok()?;

    if !(1..=12).contains(&month) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, 1)
}

fn first_labeled_date(pattern: &Regex, normalized: &str) -> Option<NaiveDate> {
    pattern
        .captures_iter(normalized)
        .find_map(|caps| month_year_from(&caps))
}

fn best_before_from(normalized: &str) -> Option<BestBeforeDuration> {
    let caps = BEST_BEFORE_PATTERN.captures(normalized)?;
    // 超出 u32 的数量视为无效时长
    let count: u32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = DurationUnit::from_token(caps.get(2)?.as_str())?;

    Some(BestBeforeDuration { count, unit })
}

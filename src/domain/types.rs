// ==========================================
// 商品保质期追踪 - 领域类型定义
// ==========================================
// 新鲜度等级 / 保质期时长单位 / 列表筛选条件
// ==========================================

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// 新鲜度等级 (Freshness Tier)
// ==========================================
// 派生视图: 每次按 (到期日, 当前时刻, 阈值) 重新计算,不落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FreshnessTier {
    Fresh,        // 新鲜
    ExpiringSoon, // 临期
    Expired,      // 已过期
}

impl FreshnessTier {
    /// 全部等级（按展示顺序）
    pub const ALL: [FreshnessTier; 3] = [
        FreshnessTier::Fresh,
        FreshnessTier::ExpiringSoon,
        FreshnessTier::Expired,
    ];

    /// 标签值（与序列化格式一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessTier::Fresh => "fresh",
            FreshnessTier::ExpiringSoon => "expiring-soon",
            FreshnessTier::Expired => "expired",
        }
    }

    /// 徽章文案（本地化）
    pub fn badge_label(&self) -> String {
        match self {
            FreshnessTier::Fresh => crate::i18n::t("tier.fresh"),
            FreshnessTier::ExpiringSoon => crate::i18n::t("tier.expiring_soon"),
            FreshnessTier::Expired => crate::i18n::t("tier.expired"),
        }
    }
}

impl fmt::Display for FreshnessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 等级解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("无效的新鲜度等级: {0}（可选: fresh / expiring-soon / expired）")]
pub struct ParseTierError(pub String);

impl FromStr for FreshnessTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fresh" => Ok(FreshnessTier::Fresh),
            "expiring-soon" => Ok(FreshnessTier::ExpiringSoon),
            "expired" => Ok(FreshnessTier::Expired),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}

// ==========================================
// 保质期时长 (Best-before Duration)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Month,
    Year,
}

impl DurationUnit {
    /// 从标签单位词解析（month/months/year/years/yr/yrs）
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "month" | "months" => Some(DurationUnit::Month),
            "year" | "years" | "yr" | "yrs" => Some(DurationUnit::Year),
            _ => None,
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationUnit::Month => write!(f, "month"),
            DurationUnit::Year => write!(f, "year"),
        }
    }
}

/// "best before N months/years" 中的相对保质期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestBeforeDuration {
    pub count: u32,
    pub unit: DurationUnit,
}

impl BestBeforeDuration {
    pub fn months(count: u32) -> Self {
        Self {
            count,
            unit: DurationUnit::Month,
        }
    }

    pub fn years(count: u32) -> Self {
        Self {
            count,
            unit: DurationUnit::Year,
        }
    }

    /// 折算月数,溢出返回 None
    pub fn total_months(&self) -> Option<u32> {
        match self.unit {
            DurationUnit::Month => Some(self.count),
            DurationUnit::Year => self.count.checked_mul(12),
        }
    }

    /// 按日历月累加到基准日期
    ///
    /// 日号保持不变,目标月份天数不足时截到月末（1/31 + 1 个月 → 2/28 或 2/29）。
    /// 超出日历范围返回 None。
    pub fn add_to(&self, base: NaiveDate) -> Option<NaiveDate> {
        let months = self.total_months()?;
        base.checked_add_months(Months::new(months))
    }
}

impl fmt::Display for BestBeforeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.count == 1 { "" } else { "s" };
        write!(f, "best before {} {}{}", self.count, self.unit, suffix)
    }
}

// ==========================================
// 列表筛选条件 (Status Filter)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(FreshnessTier),
}

impl StatusFilter {
    pub fn matches(&self, tier: FreshnessTier) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == tier,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(tier) => write!(f, "{}", tier),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<FreshnessTier>().map(StatusFilter::Only)
    }
}

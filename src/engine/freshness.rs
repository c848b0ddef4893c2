// ==========================================
// 商品保质期追踪 - 新鲜度分级引擎
// ==========================================
// 红线: 新鲜度是"等级制",每次按当前时刻重新计算,不缓存
// ==========================================
// 职责: 到期日 + 临期阈值 → 新鲜度等级;列表统计与筛选
// 输入: 到期时刻 / 阈值天数 / 注入的当前时刻
// 输出: FreshnessTier
// ==========================================

use crate::domain::product::{start_of_day_utc, TrackedProduct};
use crate::domain::types::{FreshnessTier, StatusFilter};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 默认临期阈值（天）
pub const DEFAULT_THRESHOLD_DAYS: u32 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// ==========================================
// FreshnessSummary - 各等级数量统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessSummary {
    pub fresh: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    pub total: usize,
}

impl FreshnessSummary {
    pub fn count(&self, tier: FreshnessTier) -> usize {
        match tier {
            FreshnessTier::Fresh => self.fresh,
            FreshnessTier::ExpiringSoon => self.expiring_soon,
            FreshnessTier::Expired => self.expired,
        }
    }

    fn record(&mut self, tier: FreshnessTier) {
        match tier {
            FreshnessTier::Fresh => self.fresh += 1,
            FreshnessTier::ExpiringSoon => self.expiring_soon += 1,
            FreshnessTier::Expired => self.expired += 1,
        }
        self.total += 1;
    }
}

// ==========================================
// ProductQuery - 列表查询条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// 名称关键字（忽略大小写,空串 = 不过滤）
    pub search: String,
    pub status: StatusFilter,
}

impl ProductQuery {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }
}

// ==========================================
// FreshnessClassifier - 新鲜度分级引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct FreshnessClassifier {
    // 无状态引擎,不需要注入依赖
}

impl FreshnessClassifier {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 判定新鲜度等级
    ///
    /// 规则:
    /// - diff_days < 0 → Expired
    /// - 0 ≤ diff_days ≤ threshold_days → ExpiringSoon
    /// - diff_days > threshold_days → Fresh
    ///
    /// diff_days 按毫秒差向上取整,边界以 now 起算的整 24 小时为准。
    pub fn classify(
        &self,
        expiry: DateTime<Utc>,
        threshold_days: u32,
        now: DateTime<Utc>,
    ) -> FreshnessTier {
        let diff = Self::diff_days(expiry, now);

        if diff < 0 {
            FreshnessTier::Expired
        } else if diff <= i64::from(threshold_days) {
            FreshnessTier::ExpiringSoon
        } else {
            FreshnessTier::Fresh
        }
    }

    /// 日期精度的到期日（按当日 00:00 UTC）
    pub fn classify_date(
        &self,
        expiry: NaiveDate,
        threshold_days: u32,
        now: DateTime<Utc>,
    ) -> FreshnessTier {
        self.classify(start_of_day_utc(expiry), threshold_days, now)
    }

    /// 距到期天数（向上取整）
    ///
    /// 过期不足 1 天时结果为 0,偏向"尚未过期"。
    pub fn diff_days(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        let millis = (expiry - now).num_milliseconds();
        let days = millis / MILLIS_PER_DAY;
        // 整除向零截断: 正数有余数时补 1 即为向上取整
        if millis % MILLIS_PER_DAY > 0 {
            days + 1
        } else {
            days
        }
    }

    /// 倒计时天数（向零截断,用于"剩余 N 天 / 已过期 N 天"展示）
    pub fn days_until_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        (expiry - now).num_days()
    }

    /// 倒计时文案（本地化）
    pub fn countdown_text(&self, expiry: DateTime<Utc>, threshold_days: u32, now: DateTime<Utc>) -> String {
        let days = Self::days_until_expiry(expiry, now);
        match self.classify(expiry, threshold_days, now) {
            FreshnessTier::Expired => crate::i18n::t_with_args(
                "countdown.expired_ago",
                &[("count", &days.abs().to_string())],
            ),
            _ => crate::i18n::t_with_args("countdown.days_left", &[("count", &days.to_string())]),
        }
    }

    // ==========================================
    // 列表视图
    // ==========================================

    /// 统计各等级商品数量
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub fn summarize(
        &self,
        products: &[TrackedProduct],
        threshold_days: u32,
        now: DateTime<Utc>,
    ) -> FreshnessSummary {
        let mut summary = FreshnessSummary::default();
        for product in products {
            summary.record(self.classify(product.expiry_date, threshold_days, now));
        }
        summary
    }

    /// 按名称关键字与等级筛选（保持原有顺序）
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub fn filter_products<'a>(
        &self,
        products: &'a [TrackedProduct],
        query: &ProductQuery,
        threshold_days: u32,
        now: DateTime<Utc>,
    ) -> Vec<&'a TrackedProduct> {
        let needle = query.search.trim().to_lowercase();

        products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .filter(|p| {
                query
                    .status
                    .matches(self.classify(p.expiry_date, threshold_days, now))
            })
            .collect()
    }
}

/// 便捷函数: 使用默认引擎判定
pub fn classify(expiry: DateTime<Utc>, threshold_days: u32, now: DateTime<Utc>) -> FreshnessTier {
    FreshnessClassifier::new().classify(expiry, threshold_days, now)
}

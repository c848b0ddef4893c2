// ==========================================
// 商品保质期追踪 - 到期提醒计划
// ==========================================
// 职责: 计算到期前 N 天的提醒时刻,生成提醒内容
// 红线: 只产出计划,不负责投递（推送由外部协作方完成）
// ==========================================

use crate::config::ReminderSettings;
use crate::domain::product::TrackedProduct;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 单条提醒计划
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPlan {
    pub product_id: String,
    pub remind_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
}

// ==========================================
// ReminderPlanner - 提醒计划引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ReminderPlanner {}

impl ReminderPlanner {
    pub fn new() -> Self {
        Self {}
    }

    /// 提醒时刻 = 到期时刻 - days_before 天
    ///
    /// 提醒时刻不晚于 now 时返回 None（不补发过去的提醒）。
    pub fn remind_at(
        expiry: DateTime<Utc>,
        days_before: u32,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let at = expiry.checked_sub_signed(Duration::days(i64::from(days_before)))?;
        (at > now).then_some(at)
    }

    /// 为商品列表生成提醒计划
    #[instrument(skip(self, products, settings), fields(count = products.len()))]
    pub fn plan(
        &self,
        products: &[TrackedProduct],
        settings: &ReminderSettings,
        now: DateTime<Utc>,
    ) -> Vec<ReminderPlan> {
        if !settings.enabled {
            debug!("提醒已关闭,跳过计划生成");
            return Vec::new();
        }

        let days = settings.days_before_expiry;
        products
            .iter()
            .filter_map(|p| {
                let remind_at = Self::remind_at(p.expiry_date, days, now)?;
                Some(ReminderPlan {
                    product_id: p.id.clone(),
                    remind_at,
                    title: crate::i18n::t("reminder.title"),
                    body: crate::i18n::t_with_args(
                        "reminder.body",
                        &[("name", &p.name), ("count", &days.to_string())],
                    ),
                })
            })
            .collect()
    }
}

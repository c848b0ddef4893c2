// ==========================================
// 商品保质期追踪 - 引擎层
// ==========================================
// 职责: 纯函数规则引擎（日期提取 / 新鲜度分级 / 提醒计划）
// 红线: 引擎不做 I/O,不读系统时钟,当前时刻一律由调用方注入
// ==========================================

pub mod date_extractor;
pub mod freshness;
pub mod reminder;

// 重导出核心引擎
pub use date_extractor::{extract_dates, DateExtractor, LabelSignals};
pub use freshness::{
    classify, FreshnessClassifier, FreshnessSummary, ProductQuery, DEFAULT_THRESHOLD_DAYS,
};
pub use reminder::{ReminderPlan, ReminderPlanner};

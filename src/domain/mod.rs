// ==========================================
// 商品保质期追踪 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod product;
pub mod types;

// 重导出核心类型
pub use product::{start_of_day_utc, ExtractedDates, ProductDraft, TrackedProduct};
pub use types::{
    BestBeforeDuration, DurationUnit, FreshnessTier, ParseTierError, StatusFilter,
};

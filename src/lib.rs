// ==========================================
// 商品保质期追踪 - 核心库
// ==========================================
// 系统定位: 标签日期提取 + 新鲜度分级（纯函数核心）
// 外部协作方: 拍照/识别服务、持久化、推送、界面
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 适配层 - 外部识别结果
pub mod scan;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 命令行集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BestBeforeDuration, DurationUnit, ExtractedDates, FreshnessTier, ProductDraft, StatusFilter,
    TrackedProduct,
};

// 引擎
pub use engine::{
    classify, extract_dates, DateExtractor, FreshnessClassifier, ReminderPlanner,
    DEFAULT_THRESHOLD_DAYS,
};

// API
pub use api::{ScanOutcome, TrackerApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "expiry-tracker";

// ==========================================
// 商品保质期追踪 - 配置层
// ==========================================
// 职责: 提醒设置、日志设置,支持文件 + 环境变量覆写
// ==========================================

pub mod tracker_config;

// 重导出核心配置
pub use tracker_config::{
    ConfigError, ConfigResult, LogConfig, ReminderSettings, TrackerConfig, CONFIG_PATH_ENV,
    MAX_THRESHOLD_DAYS, MIN_THRESHOLD_DAYS, THRESHOLD_ENV,
};

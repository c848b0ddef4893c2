// ==========================================
// 商品保质期追踪 - 配置加载
// ==========================================
// 职责: 提醒设置 / 日志设置的加载、校验与环境变量覆写
// 存储: JSON 配置文件（缺失时使用默认值）
// ==========================================

use crate::engine::freshness::DEFAULT_THRESHOLD_DAYS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "EXPIRY_TRACKER_CONFIG";

/// 临期阈值覆写环境变量
pub const THRESHOLD_ENV: &str = "EXPIRY_TRACKER_THRESHOLD_DAYS";

/// 临期阈值允许范围（天）
pub const MIN_THRESHOLD_DAYS: u32 = 1;
pub const MAX_THRESHOLD_DAYS: u32 = 30;

// ==========================================
// 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ReminderSettings - 提醒设置
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    /// 是否开启到期提醒
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// 到期前多少天提醒,同时作为临期阈值（1~30）
    #[serde(default = "default_days_before_expiry")]
    pub days_before_expiry: u32,
}

fn default_enabled() -> bool {
    true
}

fn default_days_before_expiry() -> u32 {
    DEFAULT_THRESHOLD_DAYS
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            days_before_expiry: default_days_before_expiry(),
        }
    }
}

impl ReminderSettings {
    /// 校验阈值范围
    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_THRESHOLD_DAYS..=MAX_THRESHOLD_DAYS).contains(&self.days_before_expiry) {
            return Err(ConfigError::InvalidValue {
                key: "reminder.daysBeforeExpiry".to_string(),
                value: self.days_before_expiry.to_string(),
                message: format!(
                    "超出范围 [{}, {}]",
                    MIN_THRESHOLD_DAYS, MAX_THRESHOLD_DAYS
                ),
            });
        }
        Ok(())
    }
}

// ==========================================
// LogConfig - 日志设置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// 默认过滤器（RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ==========================================
// TrackerConfig - 全量配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerConfig {
    #[serde(default)]
    pub reminder: ReminderSettings,

    #[serde(default)]
    pub log: LogConfig,

    /// 界面语言（en / zh-CN）
    #[serde(default)]
    pub locale: Option<String>,
}

impl TrackerConfig {
    /// 临期阈值（与提醒天数一致）
    pub fn threshold_days(&self) -> u32 {
        self.reminder.days_before_expiry
    }

    /// 加载配置
    ///
    /// 路径优先级: 显式路径 > EXPIRY_TRACKER_CONFIG > 用户配置目录。
    /// 文件不存在时使用默认值;加载后应用环境变量覆写并校验。
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(&p)?,
            Some(p) => {
                debug!("配置文件不存在,使用默认配置: {}", p.display());
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(std::env::var(THRESHOLD_ENV).ok().as_deref())?;
        config.reminder.validate()?;

        info!(
            threshold_days = config.threshold_days(),
            reminders = config.reminder.enabled,
            "配置加载完成"
        );
        Ok(config)
    }

    /// 从 JSON 文件读取（不做环境变量覆写）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// 应用阈值覆写（值来自 EXPIRY_TRACKER_THRESHOLD_DAYS）
    pub fn apply_env_overrides(&mut self, threshold: Option<&str>) -> ConfigResult<()> {
        let raw = match threshold.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(()),
        };

        let days = raw.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
            key: THRESHOLD_ENV.to_string(),
            value: raw.to_string(),
            message: e.to_string(),
        })?;

        self.reminder.days_before_expiry = days;
        Ok(())
    }
}

/// 默认配置文件路径
fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| dir.join("expiry-tracker").join("config.json"))
}

// ==========================================
// 商品保质期追踪 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换下层错误为用户可读的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::scan::ScanError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("字段{field}格式错误: {message}")]
    FieldValueError { field: String, message: String },

    // ==========================================
    // 下层错误
    // ==========================================
    #[error("识别结果处理失败: {0}")]
    Scan(#[from] ScanError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 商品保质期追踪 - 扫描结果适配错误类型
// ==========================================

use thiserror::Error;

/// 扫描结果适配错误
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("识别服务返回为空")]
    EmptyResponse,

    #[error("识别服务失败: {0}")]
    ServiceFailed(String),

    #[error("识别结果解析失败: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Result 类型别名
pub type ScanResult<T> = Result<T, ScanError>;

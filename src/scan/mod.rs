// ==========================================
// 商品保质期追踪 - 识别结果适配层
// ==========================================
// 职责: 隔离外部识别服务的数据结构变化,只向引擎输出标签文本
// ==========================================

pub mod error;
pub mod payload;

pub use error::{ScanError, ScanResult};
pub use payload::{ScanPayload, ScanResponse};

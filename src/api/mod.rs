// ==========================================
// 商品保质期追踪 - API 层
// ==========================================
// 职责: 面向界面 / 存储协作方的用例入口
// ==========================================

pub mod error;
pub mod tracker_api;

pub use error::{ApiError, ApiResult};
pub use tracker_api::{ManualEntryForm, ScanOutcome, TrackerApi};

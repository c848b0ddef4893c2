// ==========================================
// 商品保质期追踪 - 应用层
// ==========================================
// 职责: 命令行集成,连接终端与 API 层
// ==========================================

pub mod cli;
pub mod commands;

// 重导出
pub use cli::{Cli, Command};
pub use commands::run;

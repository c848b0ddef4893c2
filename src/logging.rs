// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// ==========================================

use crate::config::LogConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统（默认配置）
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=expiry_tracker=trace
///
/// # 示例
/// ```no_run
/// use expiry_tracker::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with(&LogConfig::default());
}

/// 按配置初始化日志系统
///
/// RUST_LOG 优先于配置中的 level;json=true 时输出结构化 JSON。
/// 日志写到 stderr,stdout 留给命令输出。
pub fn init_with(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    // 重复初始化时保持第一次的设置
    if config.json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别,便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

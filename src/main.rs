// ==========================================
// 商品保质期追踪 - 命令行主入口
// ==========================================

use clap::Parser;
use expiry_tracker::app::{self, Cli};
use expiry_tracker::config::TrackerConfig;
use expiry_tracker::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 日志配置读取失败时退回默认值,真正的配置错误由命令执行时报告
    let log_config = TrackerConfig::load(cli.config.as_deref())
        .map(|c| c.log)
        .unwrap_or_default();
    logging::init_with(&log_config);

    tracing::debug!("{} v{}", expiry_tracker::APP_NAME, expiry_tracker::VERSION);

    let output = app::run(cli)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

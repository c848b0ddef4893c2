// ==========================================
// 商品保质期追踪 - 命令行参数
// ==========================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "expiry-tracker",
    version,
    about = "Extract manufacturing/expiry dates from label text and classify freshness"
)]
pub struct Cli {
    /// 配置文件路径（默认读取 EXPIRY_TRACKER_CONFIG 或用户配置目录）
    #[arg(long, global = true, env = "EXPIRY_TRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// 输出语言（en / zh-CN）
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract manufacturing and expiry dates from label text
    Extract(ExtractArgs),
    /// Classify an expiry date into fresh / expiring-soon / expired
    Classify(ClassifyArgs),
    /// Turn a scan service response into a product draft
    Payload(PayloadArgs),
    /// Compute when an expiry reminder fires
    Remind(RemindArgs),
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// 标签文本（与 --file 二选一,都缺省时读取 stdin）
    pub text: Option<String>,

    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// 到期日: YYYY-MM-DD 或 RFC 3339
    pub expiry: String,

    /// 临期阈值（天）,缺省取配置
    #[arg(long)]
    pub threshold: Option<u32>,

    /// 当前时刻（RFC 3339）,缺省取系统时间
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// 识别结果文件（模型原始输出或服务响应信封）
    pub file: PathBuf,

    /// 文件为 { success, data, error } 响应信封
    #[arg(long)]
    pub envelope: bool,
}

#[derive(Args, Debug)]
pub struct RemindArgs {
    /// 到期日: YYYY-MM-DD 或 RFC 3339
    pub expiry: String,

    /// 提前天数,缺省取配置
    #[arg(long)]
    pub days: Option<u32>,

    /// 当前时刻（RFC 3339）,缺省取系统时间
    #[arg(long)]
    pub now: Option<String>,
}

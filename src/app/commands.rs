// ==========================================
// 商品保质期追踪 - 命令执行
// ==========================================
// 职责: 解析参数 → 调用 API / 引擎 → JSON 输出到 stdout
// 说明: 系统时钟只在这里读取,引擎一律接收注入的 now
// ==========================================

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use std::io::Read;

use crate::api::TrackerApi;
use crate::app::cli::{ClassifyArgs, Cli, Command, ExtractArgs, PayloadArgs, RemindArgs};
use crate::domain::product::start_of_day_utc;
use crate::engine::freshness::FreshnessClassifier;
use crate::engine::reminder::ReminderPlanner;
use crate::scan::{ScanPayload, ScanResponse};

/// 执行命令,返回待输出的 JSON
pub fn run(cli: Cli) -> anyhow::Result<serde_json::Value> {
    let api = TrackerApi::load(cli.config.as_deref()).context("loading configuration")?;

    if let Some(locale) = cli.locale.as_deref().or(api.config().locale.as_deref()) {
        crate::i18n::set_locale(locale);
    }

    match cli.cmd {
        Command::Extract(args) => extract(&api, args),
        Command::Classify(args) => classify(&api, args),
        Command::Payload(args) => payload(&api, args),
        Command::Remind(args) => remind(&api, args),
    }
}

fn extract(api: &TrackerApi, args: ExtractArgs) -> anyhow::Result<serde_json::Value> {
    let text = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading label text from stdin")?;
            buf
        }
    };

    Ok(json!({
        "extracted": crate::engine::extract_dates(&text),
        "outcome": api.process_label(&text),
    }))
}

fn classify(api: &TrackerApi, args: ClassifyArgs) -> anyhow::Result<serde_json::Value> {
    let expiry = parse_instant(&args.expiry)?;
    let now = parse_now(args.now.as_deref())?;
    let threshold = args.threshold.unwrap_or(api.config().threshold_days());

    let classifier = FreshnessClassifier::new();
    let tier = classifier.classify(expiry, threshold, now);

    Ok(json!({
        "tier": tier,
        "badge": tier.badge_label(),
        "diffDays": FreshnessClassifier::diff_days(expiry, now),
        "countdown": classifier.countdown_text(expiry, threshold, now),
        "thresholdDays": threshold,
    }))
}

fn payload(api: &TrackerApi, args: PayloadArgs) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let payload = if args.envelope {
        ScanResponse::from_json(&raw)?.into_payload()?
    } else {
        ScanPayload::from_model_output(&raw)?
    };

    Ok(json!({
        "labelText": payload.to_label_text(),
        "outcome": api.process_payload(&payload),
    }))
}

fn remind(api: &TrackerApi, args: RemindArgs) -> anyhow::Result<serde_json::Value> {
    let expiry = parse_instant(&args.expiry)?;
    let now = parse_now(args.now.as_deref())?;
    let days = args.days.unwrap_or(api.config().reminder.days_before_expiry);

    Ok(json!({
        "enabled": api.config().reminder.enabled,
        "daysBeforeExpiry": days,
        "remindAt": ReminderPlanner::remind_at(expiry, days, now),
    }))
}

// ==========================================
// 参数解析
// ==========================================

/// YYYY-MM-DD（当日 00:00 UTC）或 RFC 3339
fn parse_instant(value: &str) -> anyhow::Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(start_of_day_utc(date));
    }
    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(e) => bail!("invalid date '{}': expected YYYY-MM-DD or RFC 3339 ({})", trimmed, e),
    }
}

fn parse_now(value: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match value {
        Some(v) => parse_instant(v),
        None => Ok(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_instant_formats() {
        assert_eq!(
            parse_instant("2024-01-08").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_instant("2024-01-08T10:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 8, 8, 30, 0).unwrap()
        );
        assert!(parse_instant("08/01/2024").is_err());
    }

    #[test]
    fn test_classify_command_output() {
        let api = TrackerApi::new(Default::default());
        let args = ClassifyArgs {
            expiry: "2024-01-08".to_string(),
            threshold: Some(7),
            now: Some("2024-01-01T00:00:00Z".to_string()),
        };
        let out = classify(&api, args).unwrap();
        assert_eq!(out["tier"], "expiring-soon");
        assert_eq!(out["diffDays"], 7);
    }

    #[test]
    fn test_remind_command_output() {
        let api = TrackerApi::new(Default::default());
        let args = RemindArgs {
            expiry: "2024-01-20".to_string(),
            days: None,
            now: Some("2024-01-01T00:00:00Z".to_string()),
        };
        let out = remind(&api, args).unwrap();
        assert_eq!(out["daysBeforeExpiry"], 7);
        assert_eq!(out["remindAt"], "2024-01-13T00:00:00Z");
    }
}

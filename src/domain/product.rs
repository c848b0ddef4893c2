// ==========================================
// 商品保质期追踪 - 商品与提取结果
// ==========================================
// 职责: 日期提取结果 / 商品草稿 / 已追踪商品
// 红线: 只承载数据,持久化由外部存储协作方负责
// ==========================================

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// ExtractedDates - 标签日期提取结果
// ==========================================
// 两个字段均可缺省: 缺少到期日 = 扫描失败,由调用方转人工录入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl ExtractedDates {
    /// 两个日期均未识别
    pub fn is_empty(&self) -> bool {
        self.manufacturing_date.is_none() && self.expiry_date.is_none()
    }

    pub fn has_expiry(&self) -> bool {
        self.expiry_date.is_some()
    }
}

/// 日期 → 当日 00:00 UTC
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

// ==========================================
// ProductDraft - 待入库商品（扫描或人工录入）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,

    #[serde(default)]
    pub manufacturing_date: Option<NaiveDate>,

    pub expiry_date: NaiveDate,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl ProductDraft {
    /// 生成带 ID 与录入时间的追踪记录
    pub fn into_tracked(self, added_at: DateTime<Utc>) -> TrackedProduct {
        TrackedProduct {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            manufacturing_date: self.manufacturing_date,
            expiry_date: start_of_day_utc(self.expiry_date),
            added_at,
            category: self.category,
            notes: self.notes,
        }
    }
}

// ==========================================
// TrackedProduct - 已追踪商品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedProduct {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub manufacturing_date: Option<NaiveDate>,

    /// 到期时刻（UTC,日期精度的记录落在当日 00:00）
    pub expiry_date: DateTime<Utc>,

    pub added_at: DateTime<Utc>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_dates_wire_format() {
        let dates = ExtractedDates {
            manufacturing_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            expiry_date: None,
        };
        let json = serde_json::to_value(dates).unwrap();
        assert_eq!(json, serde_json::json!({ "manufacturingDate": "2024-03-01" }));
        assert!(!dates.is_empty());
        assert!(!dates.has_expiry());
        assert!(ExtractedDates::default().is_empty());
    }

    #[test]
    fn test_into_tracked_normalizes_expiry() {
        let draft = ProductDraft {
            name: "Organic Milk".to_string(),
            manufacturing_date: None,
            expiry_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            category: Some("Food".to_string()),
            notes: None,
        };
        let added = start_of_day_utc(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        let a = draft.clone().into_tracked(added);
        let b = draft.into_tracked(added);

        assert_eq!(a.expiry_date.to_rfc3339(), "2025-09-01T00:00:00+00:00");
        assert_eq!(a.added_at, added);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }
}

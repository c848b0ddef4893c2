// ==========================================
// 商品保质期追踪 - 追踪 API
// ==========================================
// 职责: 扫描识别 → 商品草稿、人工录入校验、新鲜度 / 提醒查询
// 红线: 到期日缺失 = 扫描失败,必须转人工录入,不得猜测
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::TrackerConfig;
use crate::domain::product::{ExtractedDates, ProductDraft, TrackedProduct};
use crate::domain::types::FreshnessTier;
use crate::engine::date_extractor::DateExtractor;
use crate::engine::freshness::{FreshnessClassifier, FreshnessSummary, ProductQuery};
use crate::engine::reminder::{ReminderPlan, ReminderPlanner};
use crate::scan::ScanPayload;

// ==========================================
// ScanOutcome - 扫描结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ScanOutcome {
    /// 已识别到期日,可直接入库
    Detected { product: ProductDraft },
    /// 未识别到期日,需要人工录入（附带已识别的部分结果）
    ManualEntryRequired { extracted: ExtractedDates },
}

impl ScanOutcome {
    pub fn is_detected(&self) -> bool {
        matches!(self, ScanOutcome::Detected { .. })
    }
}

// ==========================================
// ManualEntryForm - 人工录入表单
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntryForm {
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// YYYY-MM-DD（必填）
    pub expiry_date: String,
    /// YYYY-MM-DD（可选）
    #[serde(default)]
    pub manufacturing_date: String,
    #[serde(default)]
    pub notes: String,
}

// ==========================================
// TrackerApi - 追踪 API
// ==========================================
pub struct TrackerApi {
    config: TrackerConfig,
    extractor: DateExtractor,
    classifier: FreshnessClassifier,
    planner: ReminderPlanner,
}

impl TrackerApi {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            extractor: DateExtractor::new(),
            classifier: FreshnessClassifier::new(),
            planner: ReminderPlanner::new(),
        }
    }

    /// 加载配置并创建实例
    pub fn load(config_path: Option<&Path>) -> ApiResult<Self> {
        Ok(Self::new(TrackerConfig::load(config_path)?))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    // ==========================================
    // 扫描入库
    // ==========================================

    /// 处理标签转写文本
    #[instrument(skip(self, label_text), fields(len = label_text.len()))]
    pub fn process_label(&self, label_text: &str) -> ScanOutcome {
        self.build_outcome(label_text, None, None)
    }

    /// 处理结构化识别字段
    #[instrument(skip(self, payload))]
    pub fn process_payload(&self, payload: &ScanPayload) -> ScanOutcome {
        let text = payload.to_label_text();
        self.build_outcome(
            &text,
            payload.product_name.clone(),
            payload.category.clone(),
        )
    }

    /// 处理识别模型原始输出（JSON,可带代码块标记）
    pub fn process_model_output(&self, content: &str) -> ApiResult<ScanOutcome> {
        let payload = ScanPayload::from_model_output(content)?;
        Ok(self.process_payload(&payload))
    }

    fn build_outcome(
        &self,
        label_text: &str,
        name: Option<String>,
        category: Option<String>,
    ) -> ScanOutcome {
        let extracted = self.extractor.extract(label_text);

        let Some(expiry_date) = extracted.expiry_date else {
            warn!("未识别到到期日,转人工录入");
            return ScanOutcome::ManualEntryRequired { extracted };
        };

        let product = ProductDraft {
            name: name.unwrap_or_else(|| crate::i18n::t("scan.unnamed_product")),
            manufacturing_date: extracted.manufacturing_date,
            expiry_date,
            category: Some(category.unwrap_or_else(|| crate::i18n::t("scan.default_category"))),
            notes: Some(crate::i18n::t_with_args(
                "scan.extracted_notes",
                &[("text", label_text.trim())],
            )),
        };

        info!(expiry_date = %expiry_date, "扫描识别成功");
        ScanOutcome::Detected { product }
    }

    // ==========================================
    // 人工录入
    // ==========================================

    /// 校验人工录入表单
    ///
    /// 名称与到期日必填;空白的可选字段视为缺省。
    pub fn manual_entry(&self, form: ManualEntryForm) -> ApiResult<ProductDraft> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("商品名称不能为空".to_string()));
        }

        let expiry_date = parse_form_date("expiryDate", &form.expiry_date)?
            .ok_or_else(|| ApiError::InvalidInput("到期日不能为空".to_string()))?;
        let manufacturing_date = parse_form_date("manufacturingDate", &form.manufacturing_date)?;

        Ok(ProductDraft {
            name: name.to_string(),
            manufacturing_date,
            expiry_date,
            category: non_blank(form.category),
            notes: non_blank(form.notes),
        })
    }

    /// 草稿入库前补全 ID 与录入时间
    pub fn add_product(&self, draft: ProductDraft, now: DateTime<Utc>) -> TrackedProduct {
        let product = draft.into_tracked(now);
        info!(product_id = %product.id, name = %product.name, "商品已添加");
        product
    }

    // ==========================================
    // 新鲜度与提醒
    // ==========================================

    /// 按配置阈值判定新鲜度
    pub fn freshness(&self, product: &TrackedProduct, now: DateTime<Utc>) -> FreshnessTier {
        self.classifier
            .classify(product.expiry_date, self.config.threshold_days(), now)
    }

    pub fn summary(&self, products: &[TrackedProduct], now: DateTime<Utc>) -> FreshnessSummary {
        self.classifier
            .summarize(products, self.config.threshold_days(), now)
    }

    pub fn search<'a>(
        &self,
        products: &'a [TrackedProduct],
        query: &ProductQuery,
        now: DateTime<Utc>,
    ) -> Vec<&'a TrackedProduct> {
        self.classifier
            .filter_products(products, query, self.config.threshold_days(), now)
    }

    pub fn reminders(&self, products: &[TrackedProduct], now: DateTime<Utc>) -> Vec<ReminderPlan> {
        self.planner.plan(products, &self.config.reminder, now)
    }
}

// ==========================================
// 内部辅助
// ==========================================

fn parse_form_date(field: &str, value: &str) -> ApiResult<Option<NaiveDate>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| ApiError::FieldValueError {
            field: field.to_string(),
            message: format!("期望 YYYY-MM-DD,实际 {} ({})", trimmed, e),
        })
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> TrackerApi {
        TrackerApi::new(TrackerConfig::default())
    }

    #[test]
    fn test_manual_entry_requires_name_and_expiry() {
        let form = ManualEntryForm {
            name: "  ".to_string(),
            expiry_date: "2025-01-01".to_string(),
            ..Default::default()
        };
        assert!(matches!(api().manual_entry(form), Err(ApiError::InvalidInput(_))));

        let form = ManualEntryForm {
            name: "Milk".to_string(),
            ..Default::default()
        };
        assert!(matches!(api().manual_entry(form), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_manual_entry_parses_dates() {
        let form = ManualEntryForm {
            name: " Organic Milk ".to_string(),
            category: "".to_string(),
            expiry_date: "2025-01-15".to_string(),
            manufacturing_date: "2024-12-01".to_string(),
            notes: " keep cold ".to_string(),
        };
        let draft = api().manual_entry(form).unwrap();
        assert_eq!(draft.name, "Organic Milk");
        assert_eq!(draft.expiry_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(draft.manufacturing_date, NaiveDate::from_ymd_opt(2024, 12, 1));
        assert_eq!(draft.category, None);
        assert_eq!(draft.notes.as_deref(), Some("keep cold"));
    }

    #[test]
    fn test_manual_entry_rejects_bad_date() {
        let form = ManualEntryForm {
            name: "Milk".to_string(),
            expiry_date: "2025-02-30".to_string(),
            ..Default::default()
        };
        let err = api().manual_entry(form).unwrap_err();
        assert!(matches!(err, ApiError::FieldValueError { ref field, .. } if field == "expiryDate"));
    }

    #[test]
    fn test_process_label_without_expiry_needs_manual_entry() {
        let outcome = api().process_label("MFG: 03/2024");
        assert_eq!(
            outcome,
            ScanOutcome::ManualEntryRequired {
                extracted: ExtractedDates {
                    manufacturing_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                    expiry_date: None,
                }
            }
        );
    }

    #[test]
    fn test_process_model_output_errors() {
        let err = api().process_model_output("not json").unwrap_err();
        assert!(matches!(err, ApiError::Scan(_)));

        let outcome = api()
            .process_model_output(r#"{"expiryDate": "09/2025"}"#)
            .unwrap();
        assert!(outcome.is_detected());
    }

    #[test]
    fn test_process_payload_uses_name_and_category() {
        let payload = ScanPayload {
            product_name: Some("Oat Milk".to_string()),
            manufacturing_date: Some("03/2024".to_string()),
            best_before_duration: Some("18 months".to_string()),
            category: Some("Beverage".to_string()),
            ..Default::default()
        };
        match api().process_payload(&payload) {
            ScanOutcome::Detected { product } => {
                assert_eq!(product.name, "Oat Milk");
                assert_eq!(product.category.as_deref(), Some("Beverage"));
                assert_eq!(product.expiry_date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}

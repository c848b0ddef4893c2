// ==========================================
// 商品保质期追踪 - 识别结果适配器
// ==========================================
// 职责: 把外部识别服务的松散 JSON 统一成单一标签文本
// 输入: 模型原始输出 / 服务响应信封
// 输出: ScanPayload → 标签文本（交给日期提取引擎）
// ==========================================

use crate::scan::error::{ScanError, ScanResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

// ==========================================
// ScanPayload - 结构化识别字段
// ==========================================
// 字段全部可缺省;空串与字面量 "null" 视为缺省,数字按文本处理
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanPayload {
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_name: Option<String>,

    /// MM/YYYY
    #[serde(default, deserialize_with = "lenient_text")]
    pub manufacturing_date: Option<String>,

    /// MM/YYYY
    #[serde(default, deserialize_with = "lenient_text")]
    pub expiry_date: Option<String>,

    /// 例: "best before 18 months" 或 "18 months"
    #[serde(default, deserialize_with = "lenient_text")]
    pub best_before_duration: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
}

impl ScanPayload {
    /// 解析模型原始输出（允许 ```json 代码块包裹）
    pub fn from_model_output(content: &str) -> ScanResult<Self> {
        let json = strip_code_fences(content);
        if json.is_empty() {
            return Err(ScanError::EmptyResponse);
        }

        serde_json::from_str(json).map_err(|e| {
            warn!("识别结果解析失败: {}", e);
            ScanError::MalformedPayload(e)
        })
    }

    /// 合成标签文本
    ///
    /// 每个已知字段一行: "MFG: <值>" / "EXP: <值>" / "best before <时长>"。
    pub fn to_label_text(&self) -> String {
        let mut lines = Vec::new();

        if let Some(mfg) = &self.manufacturing_date {
            lines.push(format!("MFG: {}", mfg));
        }
        if let Some(exp) = &self.expiry_date {
            lines.push(format!("EXP: {}", exp));
        }
        if let Some(duration) = &self.best_before_duration {
            if duration.to_lowercase().contains("best before") {
                lines.push(duration.clone());
            } else {
                lines.push(format!("best before {}", duration));
            }
        }

        let text = lines.join("\n");
        debug!(lines = lines.len(), "识别字段已合成标签文本");
        text
    }
}

// ==========================================
// ScanResponse - 识别服务响应信封
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResponse {
    pub success: bool,

    #[serde(default)]
    pub data: Option<ScanPayload>,

    #[serde(default)]
    pub error: Option<String>,
}

impl ScanResponse {
    pub fn from_json(raw: &str) -> ScanResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 取出识别字段;失败响应转为 ScanError
    pub fn into_payload(self) -> ScanResult<ScanPayload> {
        if !self.success {
            let message = self
                .error
                .unwrap_or_else(|| "Unknown error occurred".to_string());
            return Err(ScanError::ServiceFailed(message));
        }

        self.data.ok_or(ScanError::EmptyResponse)
    }
}

// ==========================================
// 内部辅助
// ==========================================

/// 去掉 ```json / ``` 代码块标记
fn strip_code_fences(content: &str) -> &str {
    let mut s = content.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

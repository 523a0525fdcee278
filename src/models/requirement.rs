//! # 需求数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;
use super::lenient::null_as_default;

/// 需求质量评分
///
/// 后端以 JSON 字符串存储，查询时已解析为对象；解析失败时各项为 0。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityScore {
    /// 清晰度
    #[serde(default, deserialize_with = "null_as_default")]
    pub clarity: f64,
    /// 一致性
    #[serde(default, deserialize_with = "null_as_default")]
    pub consistency: f64,
    /// 可测试性
    #[serde(default, deserialize_with = "null_as_default")]
    pub testability: f64,
    /// 完整性
    #[serde(default, deserialize_with = "null_as_default")]
    pub completeness: f64,
}

/// 需求记录
///
/// 对应后端 `requirements` 表的一行，`/api/v1/require/search` 直接以数组形式返回
/// （不带分页信息）。`/api/v1/require/update` 的请求体也使用此结构，
/// 后端要求其中必须包含 `require_id`、`require_name`、`description`、`quality_score`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// 需求 ID
    #[serde(default)]
    pub require_id: Option<RecordId>,

    /// 需求名称
    #[serde(default)]
    pub require_name: Option<String>,

    /// 需求描述
    #[serde(default)]
    pub description: Option<String>,

    /// 需求原文
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,

    /// 标签列表
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// 质量评分
    #[serde(default)]
    pub quality_score: Option<QualityScore>,

    /// 创建时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// 更新时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// 其余未建模的列
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

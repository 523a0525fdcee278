//! # 测试点数据模型
//!
//! 测试点由需求分析任务从需求分块中提取，每个测试点归属一个模块和一个功能。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;
use super::lenient::null_as_default;

/// 测试点记录
///
/// 对应后端 `points` 表的一行：
/// ```json
/// {
///   "point_id": "POINT-1A2B3C4D-12345",
///   "task_id": "TASK-...",
///   "require_id": "REQ-...",
///   "module": "登录",
///   "function_name": "密码登录",
///   "description": "...",
///   "test_type": "功能测试",
///   "business_domain": "账户",
///   "chunks": "...",
///   "preconditions": ["已注册账号"]
/// }
/// ```
///
/// 新建测试点时还没有 `point_id`，因此该字段为可选，序列化时省略空值。
/// 文本列在后端可能为 `null`，解析为空字符串。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// 测试点 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_id: Option<RecordId>,

    /// 来源任务 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<RecordId>,

    /// 来源需求 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_id: Option<RecordId>,

    /// 所属模块
    #[serde(default, deserialize_with = "null_as_default")]
    pub module: String,

    /// 功能名称
    #[serde(default, deserialize_with = "null_as_default")]
    pub function_name: String,

    /// 测试点描述
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// 测试类型
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_type: String,

    /// 业务领域
    #[serde(default, deserialize_with = "null_as_default")]
    pub business_domain: String,

    /// 需求原文分块
    #[serde(default)]
    pub chunks: Value,

    /// 前置条件：后端已将 JSON 字符串解析为数组
    #[serde(default)]
    pub preconditions: Value,

    /// 其余未建模的列
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

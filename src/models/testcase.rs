//! # 测试用例数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;

/// 测试用例记录
///
/// 对应后端 `testcases` 表的一行。用例由大模型按测试点生成，字段并不固定，
/// 这里只建模稳定存在的列；`preconditions`、`test_steps`、`expected_result`
/// 在后端已从 JSON 字符串解析，形状可能是字符串也可能是数组，因此保留为 `Value`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testcase {
    /// 用例 ID（`CASE-...`）
    #[serde(default)]
    pub case_id: Option<RecordId>,

    /// 生成该用例的任务 ID
    #[serde(default)]
    pub task_id: Option<RecordId>,

    /// 来源需求 ID
    #[serde(default)]
    pub require_id: Option<RecordId>,

    /// 用例标题
    #[serde(default)]
    pub title: Option<String>,

    /// 优先级
    #[serde(default)]
    pub priority: Option<Value>,

    /// 前置条件
    #[serde(default)]
    pub preconditions: Value,

    /// 测试步骤
    #[serde(default)]
    pub test_steps: Value,

    /// 预期结果
    #[serde(default)]
    pub expected_result: Value,

    /// 其余未建模的列
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//! # 任务数据模型
//!
//! 后端的需求分析、用例生成都以异步任务的形式执行，任务行同时承担"状态查询"的返回结构：
//! `/api/v1/task/status`、`/api/v1/task/detail` 和 `/api/v1/task/list` 返回的都是同一种记录。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;
use super::lenient::null_as_default;

/// 任务记录
///
/// 对应后端 `tasks` 表的一行：
/// ```json
/// {
///   "task_id": "TASK-1A2B3C4D-12345",
///   "require_id": "REQ-...",
///   "task_type": "point_analysis",
///   "status": "processing",
///   "progress": 30,
///   "message": "需求分块完成，开始提取功能点...",
///   "start_time": "2024-05-01 10:00:00",
///   "end_time": null,
///   "result": {}
/// }
/// ```
///
/// 除已知字段外的其余列保存在 `extra` 中，回写时不会丢失。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// 任务 ID：状态查询接口可能省略
    #[serde(default)]
    pub task_id: Option<RecordId>,

    /// 关联的需求 ID
    #[serde(default)]
    pub require_id: Option<RecordId>,

    /// 任务类型：`point_analysis` / `testcase_analysis`
    #[serde(default)]
    pub task_type: Option<String>,

    /// 任务状态：`pending` / `processing` / `completed` / `failed`
    #[serde(default)]
    pub status: Option<String>,

    /// 完成百分比（0–100），`null` 按 0 处理
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: f64,

    /// 当前阶段的说明文字
    #[serde(default)]
    pub message: Option<String>,

    /// 开始时间
    #[serde(default)]
    pub start_time: Option<String>,

    /// 结束时间：任务完成前为空
    #[serde(default)]
    pub end_time: Option<String>,

    /// 任务结果：后端已将 JSON 字符串解析为对象
    #[serde(default)]
    pub result: Option<Value>,

    /// 其余未建模的列
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// 任务是否已经结束（完成或失败）
    pub fn is_finished(&self) -> bool {
        matches!(self.status.as_deref(), Some("completed") | Some("failed"))
    }
}

/// 发起分析/生成后返回的任务句柄
///
/// `/api/v1/point/analysis` 与 `/api/v1/testcase/generate` 的 `data`：
/// ```json
/// { "task_id": "TASK-...", "status": "pending", "progress": 0 }
/// ```
///
/// 句柄按原样记录：后端没有返回 `task_id` 时也不视为失败。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskHandle {
    /// 新建任务的 ID
    #[serde(default)]
    pub task_id: Option<RecordId>,

    /// 初始状态
    #[serde(default)]
    pub status: Option<String>,

    /// 初始进度
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: f64,

    /// 其余字段
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

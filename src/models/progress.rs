//! # 进度步骤数据模型
//!
//! 用例生成任务在界面上展示为固定的四步清单，由轮询得到的百分比推导而来，
//! 推导逻辑见 `services::progress`。

use serde::{Deserialize, Serialize};

/// 进度清单的步骤数
pub const STEP_COUNT: usize = 4;

/// 尚未达到阈值的步骤所显示的文字
pub const PENDING_LABEL: &str = "等待开始";

/// 单个进度步骤
///
/// 对应前端结构 `{ desc: string, completed: boolean }`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStep {
    /// 步骤说明
    pub desc: String,
    /// 是否已完成
    pub completed: bool,
}

impl ProgressStep {
    /// 未开始的步骤
    pub fn pending() -> Self {
        Self {
            desc: PENDING_LABEL.to_string(),
            completed: false,
        }
    }

    /// 已完成的步骤
    pub fn done(desc: &str) -> Self {
        Self {
            desc: desc.to_string(),
            completed: true,
        }
    }
}

/// 四步进度清单
pub type ProgressSteps = [ProgressStep; STEP_COUNT];

/// 初始进度清单：四步均为"等待开始"
pub fn initial_steps() -> ProgressSteps {
    std::array::from_fn(|_| ProgressStep::pending())
}

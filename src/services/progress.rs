//! # 进度步骤推导
//!
//! 把任务状态中的完成百分比映射为四步进度清单：第 *i* 步（从 0 开始）在
//! `progress >= 25 * (i + 1)` 时标记为完成并换上该步的固定文字，否则保持"等待开始"。
//!
//! 每次轮询都从完整的当前百分比重新推导，而不是在上一次结果上增量推进，
//! 所以同一个百分比总得到相同的清单；百分比下降时已完成的步骤会随之回退。

use crate::models::progress::{ProgressStep, ProgressSteps, STEP_COUNT};

/// 各步骤完成后的文字
pub const STEP_LABELS: [&str; STEP_COUNT] = ["测试点分析完成", "用例设计完成", "优先级排序完成", "生成完成"];

/// 每一步对应的百分比增量
const STEP_PERCENT: f64 = 25.0;

/// 根据完成百分比推导四步进度清单
///
/// # 参数
/// - `progress` - 任务完成百分比（0–100）
///
/// # 返回值
/// 四个步骤组成的清单
pub fn progress_steps(progress: f64) -> ProgressSteps {
    std::array::from_fn(|i| {
        let threshold = STEP_PERCENT * (i + 1) as f64;
        if progress >= threshold {
            ProgressStep::done(STEP_LABELS[i])
        } else {
            ProgressStep::pending()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::{PENDING_LABEL, initial_steps};

    fn completed(steps: &ProgressSteps) -> Vec<bool> {
        steps.iter().map(|s| s.completed).collect()
    }

    #[test]
    fn test_sixty_percent() {
        let steps = progress_steps(60.0);
        assert_eq!(completed(&steps), vec![true, true, false, false]);
        let labels: Vec<&str> = steps.iter().map(|s| s.desc.as_str()).collect();
        assert_eq!(labels, vec!["测试点分析完成", "用例设计完成", "等待开始", "等待开始"]);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(completed(&progress_steps(24.9)), vec![false; 4]);
        assert_eq!(completed(&progress_steps(25.0)), vec![true, false, false, false]);
        assert_eq!(completed(&progress_steps(75.0)), vec![true, true, true, false]);
        assert_eq!(completed(&progress_steps(100.0)), vec![true; 4]);
        assert_eq!(progress_steps(100.0)[3].desc, "生成完成");
    }

    #[test]
    fn test_same_progress_same_steps() {
        assert_eq!(progress_steps(50.0), progress_steps(50.0));
        assert_eq!(progress_steps(0.0), initial_steps());
    }

    #[test]
    fn test_lower_progress_regresses() {
        let high = progress_steps(80.0);
        let low = progress_steps(30.0);
        assert!(high[2].completed);
        assert!(!low[2].completed);
        assert_eq!(low[2].desc, PENDING_LABEL);
    }
}

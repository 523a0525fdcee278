//! # Husky Console - 客户端状态层核心模块
//!
//! husky 是一个测试用例生成平台：后端把需求拆分为测试点，再由测试点生成测试用例，
//! 分析与生成都以异步任务的形式执行。本 crate 是平台的客户端状态层，包括：
//! - 对后端 REST 接口的 HTTP 封装（信封解包、失败归一、失败通知）
//! - 四个与后端资源一一对应的状态模块（任务、需求、测试点、测试用例）
//! - 把四个模块组装在一起、由宿主显式构造的 `Store`
//!
//! ## 模块结构
//! - `store/` - 状态模块与动作入口（面向 UI 的接口层）
//! - `models/` - 数据模型（对应后端 JSON 结构）
//! - `services/` - HTTP 封装、通知、进度推导、配置加载
//! - `utils/` - 通用工具函数
//!
//! ## 使用方式
//! ```no_run
//! use std::sync::Arc;
//! use husky_console::models::settings::ClientConfig;
//! use husky_console::services::notify::NoticeQueue;
//! use husky_console::store::Store;
//!
//! # async fn demo() -> Result<(), String> {
//! let notices = Arc::new(NoticeQueue::new());
//! let store = Store::from_config(&ClientConfig::default(), notices.clone())?;
//! let envelope = store.point.fetch_point_list(&serde_json::json!({ "current": 1, "size": 10 })).await;
//! if envelope.is_success() {
//!     println!("{} points", store.point.state().point_list.len());
//! }
//! for notice in notices.drain() {
//!     println!("{}", notice.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod services;
pub mod store;
pub mod utils;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use models::id::RecordId;
use services::notify::LogNotifier;
use store::Store;

/// 轮询任务状态的间隔
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// 连续失败多少次后停止轮询
const MAX_POLL_FAILURES: u32 = 3;

/// 控制台入口
///
/// 支持的子命令：
/// - `lists` - 拉取四个模块的列表并输出条数
/// - `watch <task_id>` - 轮询任务状态直到完成，输出进度清单
///
/// # 错误
/// 配置加载失败、HTTP 客户端初始化失败或参数无效时返回错误
pub async fn run(args: Vec<String>) -> Result<(), String> {
    let config = services::config::load_config().await?;
    log::info!("后端地址: {}，超时 {} ms", config.base_url, config.timeout_ms);

    let store = Store::from_config(&config, Arc::new(LogNotifier))?;

    match args.first().map(String::as_str) {
        Some("lists") | None => print_lists(&store).await,
        Some("watch") => {
            let task_id = args
                .get(1)
                .ok_or_else(|| "用法: husky-console watch <task_id>".to_string())?;
            watch_task(&store, &RecordId::from(task_id.as_str())).await
        }
        Some(other) => Err(format!("未知的子命令: {}", other)),
    }
}

/// 并发拉取四个列表
async fn print_lists(store: &Store) -> Result<(), String> {
    let params = serde_json::json!({ "current": 1, "size": 10 });
    let (tasks, requirements, points, testcases) = tokio::join!(
        store.task.fetch_task_list(&params),
        store.requirement.fetch_requirement_list(&params),
        store.point.fetch_point_list(&params),
        store.testcase.fetch_testcase_list(&params),
    );

    let snapshot = store.snapshot();
    println!("任务: {} ({})", snapshot.task.task_list.len(), tasks.message);
    println!("需求: {} ({})", snapshot.requirement.requirement_list.len(), requirements.message);
    println!("测试点: {} ({})", snapshot.point.point_list.len(), points.message);
    println!("测试用例: {} ({})", snapshot.testcase.testcase_list.len(), testcases.message);
    Ok(())
}

/// 轮询任务状态直到完成
async fn watch_task(store: &Store, task_id: &RecordId) -> Result<(), String> {
    let mut failures = 0;
    loop {
        let envelope = store.testcase.fetch_task_status(task_id).await;
        if envelope.is_success() {
            failures = 0;
            let state = store.testcase.state();
            let steps: Vec<String> = state
                .progress_steps
                .iter()
                .map(|s| format!("[{}] {}", if s.completed { "x" } else { " " }, s.desc))
                .collect();
            println!("{} | {}", state.task_message, steps.join(" "));

            if let Some(status) = state.task_status {
                if status.progress >= 100.0 || status.is_finished() {
                    return Ok(());
                }
            }
        } else {
            failures += 1;
            if failures >= MAX_POLL_FAILURES {
                return Err(format!("连续 {} 次获取任务状态失败", failures));
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

//! # Husky Console - 控制台入口点
//!
//! 初始化日志后调用 `husky_console::run()`，核心逻辑位于 `lib.rs` 中。
//! 日志级别通过 `RUST_LOG` 环境变量控制，默认 `info`。

use tracing_subscriber::EnvFilter;

/// 应用程序主入口函数
///
/// 使用单线程运行时：所有动作都是在网络边界挂起的协作式任务。
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // 库代码使用 log 宏，fmt 订阅器的 tracing-log 桥接负责转发
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = husky_console::run(args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

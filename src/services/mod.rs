//! # 业务逻辑服务模块
//!
//! 包含与状态模块解耦的基础服务：
//! - `http` - HTTP 请求封装：信封解包、失败归一、失败通知
//! - `notify` - 用户通知出口：日志通知、通知队列
//! - `progress` - 由任务百分比推导四步进度清单
//! - `config` - 客户端配置加载（配置文件 + 环境变量）

pub mod config;
pub mod http;
pub mod notify;
pub mod progress;

//! # 数据模型模块
//!
//! 定义了与 husky 后端 JSON 结构一一对应的 Rust 数据结构。
//! 所有结构体均派生 `Serialize` 和 `Deserialize`，用于请求体构造、响应解析和状态快照输出。
//! - `envelope` - 响应信封、分页数据
//! - `id` - 字符串/整数两用的记录标识符
//! - `lenient` - 容忍 `null` 列的反序列化辅助函数
//! - `task` / `requirement` / `point` / `testcase` - 四类业务记录
//! - `progress` - 用例生成进度清单
//! - `settings` - 客户端连接配置

pub mod envelope;
pub mod id;
pub mod lenient;
pub mod point;
pub mod progress;
pub mod requirement;
pub mod settings;
pub mod task;
pub mod testcase;

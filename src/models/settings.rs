//! # 客户端配置数据模型
//!
//! 定义了访问 husky 后端所需的连接配置（ClientConfig）。
//! 配置文件位于 `~/.husky/console.json`，加载逻辑见 `services::config`。

use serde::{Deserialize, Serialize};

/// 默认后端地址
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// 默认请求超时（毫秒）
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// 客户端连接配置
///
/// 对应配置文件结构：
/// ```json
/// {
///   "baseUrl": "http://localhost:5000",
///   "timeoutMs": 5000
/// }
/// ```
///
/// 两个字段都可以省略，省略时使用默认值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// 后端基础地址：所有接口路径都拼接在其后
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 请求超时（毫秒）：超时按传输层失败处理
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

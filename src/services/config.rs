//! # 客户端配置加载服务
//!
//! 按以下顺序确定最终配置，后者覆盖前者：
//! 1. 内置默认值（`http://localhost:5000`，5000 毫秒）
//! 2. 配置文件 `~/.husky/console.json`（不存在时跳过）
//! 3. 环境变量 `HUSKY_BASE_URL`、`HUSKY_TIMEOUT_MS`

use std::path::Path;

use crate::models::settings::ClientConfig;
use crate::utils::path;

/// 覆盖后端地址的环境变量
pub const ENV_BASE_URL: &str = "HUSKY_BASE_URL";

/// 覆盖请求超时的环境变量
pub const ENV_TIMEOUT_MS: &str = "HUSKY_TIMEOUT_MS";

/// 从指定文件读取配置
///
/// 文件不存在时返回默认配置，与首次使用时的行为保持一致。
///
/// # 错误
/// 文件存在但无法读取或 JSON 解析失败时返回错误
pub async fn read_config_file(config_path: &Path) -> Result<ClientConfig, String> {
    if !config_path.exists() {
        return Ok(ClientConfig::default());
    }

    let content = tokio::fs::read_to_string(config_path)
        .await
        .map_err(|e| format!("读取配置文件失败: {}", e))?;

    serde_json::from_str(&content).map_err(|e| format!("解析配置文件失败: {}", e))
}

/// 用环境变量覆盖配置
///
/// # 参数
/// - `config` - 待覆盖的配置
/// - `lookup` - 环境变量查询函数（便于测试时注入）
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.base_url = base_url.trim().to_string();
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        match raw.trim().parse::<u64>() {
            Ok(timeout_ms) => config.timeout_ms = timeout_ms,
            Err(_) => log::warn!("忽略无效的 {}: {}", ENV_TIMEOUT_MS, raw),
        }
    }

    config
}

/// 加载最终生效的客户端配置
///
/// # 错误
/// 无法确定主目录，或配置文件存在但损坏时返回错误
pub async fn load_config() -> Result<ClientConfig, String> {
    let config_path = path::get_config_path()?;
    let config = read_config_file(&config_path).await?;
    Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
}

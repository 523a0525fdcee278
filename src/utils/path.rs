//! # 路径工具函数
//!
//! 提供与配置文件位置相关的工具函数：
//! - 获取 Husky Console 自身配置目录路径（`~/.husky/`）
//! - 获取客户端配置文件路径（`~/.husky/console.json`）

use std::path::PathBuf;

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "console.json";

/// 获取 Husky Console 配置目录的绝对路径
///
/// 使用 `dirs` crate 获取跨平台的主目录路径。
///
/// # 返回值
/// 返回 `~/.husky/` 目录的绝对路径。
///
/// # 错误
/// 如果无法确定用户主目录（极端情况，如无 HOME 环境变量），返回错误信息。
pub fn get_config_dir() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "无法获取用户主目录".to_string())?;
    Ok(home.join(".husky"))
}

/// 获取客户端配置文件的绝对路径（`~/.husky/console.json`）
///
/// # 错误
/// 如果无法确定用户主目录，返回错误信息。
pub fn get_config_path() -> Result<PathBuf, String> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

//! # 记录标识符
//!
//! 后端生成的业务 ID 形如 `POINT-1A2B3C4D-12345`，但早期数据和部分接口仍使用整数主键，
//! 因此标识符同时接受字符串和整数两种 JSON 形态，并按原形态回写。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 记录标识符：字符串或整数
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// 整数主键
    Int(i64),
    /// 字符串业务 ID
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

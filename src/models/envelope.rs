//! # 响应信封与分页数据模型
//!
//! husky 后端的每个响应都包裹在统一的信封结构中：
//!
//! ```json
//! { "code": 0, "message": "ok", "data": ... }
//! ```
//!
//! - `code == 0` 表示成功，其余值均为业务失败
//! - `data` 的形状由具体接口决定（列表、单条记录、任务描述等）
//!
//! 本模块同时定义了列表接口共用的分页结构 `PageData` 和客户端状态中的 `Pagination`。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 动作失败时返回给调用方的合成错误码
pub const FAILURE_CODE: i64 = -1;

/// 后端响应信封
///
/// 对应后端 JSON 结构：
/// ```json
/// { "code": 0, "message": "Success", "data": { "total": 1, "list": [] } }
/// ```
///
/// 动作成功时原样返回整个信封（调用方自行读取 `data`）；
/// 动作失败时返回 `code = -1` 的合成信封，`data` 为 `null`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// 业务状态码：0 为成功
    pub code: i64,

    /// 提示信息：失败时用于错误通知
    #[serde(default)]
    pub message: String,

    /// 业务数据：形状由接口决定，缺省为 `null`
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// 构造动作失败时的合成信封 `{code: -1, message}`
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            code: FAILURE_CODE,
            message: message.into(),
            data: Value::Null,
        }
    }

    /// 信封是否表示成功
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// 将 `data` 字段按指定类型解析
    ///
    /// # 错误
    /// `data` 的形状与目标类型不符时返回错误描述
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, String> {
        T::deserialize(&self.data).map_err(|e| format!("解析响应数据失败: {}", e))
    }
}

/// 分页列表接口的 `data` 结构
///
/// 对应后端 JSON 结构：
/// ```json
/// { "list": [...], "current": 1, "size": 10, "total": 42 }
/// ```
///
/// `current` / `size` 仅 `*/list` 接口返回，`*/search` 接口只返回 `list` 和 `total`，
/// 因此两者均为可选字段。
#[derive(Debug, Clone, Deserialize)]
pub struct PageData<T> {
    /// 当前页的记录列表
    pub list: Vec<T>,
    /// 当前页码
    #[serde(default)]
    pub current: Option<u64>,
    /// 每页条数
    #[serde(default)]
    pub size: Option<u64>,
    /// 记录总数
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> PageData<T> {
    /// 取出服务端给出的分页信息
    ///
    /// 服务端省略的字段退化为：页码 1、页大小为本页条数、总数为本页条数。
    pub fn pagination(&self) -> Pagination {
        let len = self.list.len() as u64;
        Pagination {
            current: self.current.unwrap_or(1),
            size: self.size.unwrap_or(len),
            total: self.total.unwrap_or(len),
        }
    }
}

/// 客户端分页状态
///
/// 每次列表请求成功后整体替换，不做任何一致性校验
/// （例如不检查 `current * size` 与 `total` 是否匹配）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 当前页码
    pub current: u64,
    /// 每页条数
    pub size: u64,
    /// 记录总数
    pub total: u64,
}

impl Pagination {
    /// 以本地列表长度合成分页信息：`{current: 1, size: len, total: len}`
    pub fn synthesized(len: usize) -> Self {
        let len = len as u64;
        Self {
            current: 1,
            size: len,
            total: len,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            size: 10,
            total: 0,
        }
    }
}

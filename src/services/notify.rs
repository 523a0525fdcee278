//! # 用户通知服务
//!
//! 动作执行结果通过"瞬时通知"（toast）告知用户。通知是纯旁路输出，不属于任何持久状态，
//! 因此以 `Notifier` trait 的形式注入到 HTTP 封装和各状态模块中，由宿主决定如何展示：
//! - `LogNotifier` - 无界面场景（控制台、后台任务），把通知写入日志
//! - `NoticeQueue` - 有界面场景，通知先进入队列，由 UI 层定期取走渲染
//!
//! ## 展示时长
//! 成功与失败通知均展示 3 秒。

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// 通知的默认展示时长（毫秒）
pub const NOTICE_DURATION_MS: u64 = 3000;

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// 成功提示
    Success,
    /// 错误提示
    Error,
}

/// 一条瞬时通知
///
/// 对应前端结构：
/// ```typescript
/// interface Notice {
///   kind: 'success' | 'error';
///   message: string;
///   durationMs: number;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// 通知类型
    pub kind: NoticeKind,
    /// 通知文字
    pub message: String,
    /// 展示时长（毫秒）
    pub duration_ms: u64,
}

impl Notice {
    /// 构造成功通知
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            duration_ms: NOTICE_DURATION_MS,
        }
    }

    /// 构造错误通知
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            duration_ms: NOTICE_DURATION_MS,
        }
    }
}

/// 通知出口
///
/// 实现方必须是 `Send + Sync`：同一个通知出口被所有状态模块共享。
pub trait Notifier: Send + Sync {
    /// 发出一条通知
    fn notify(&self, notice: Notice);
}

/// 把通知写入日志的通知出口
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => log::info!("[通知] {}", notice.message),
            NoticeKind::Error => log::warn!("[通知] {}", notice.message),
        }
    }
}

/// 缓冲通知的队列
///
/// UI 层通过 `drain()` 取走所有待展示通知；测试中也用它断言通知的数量和内容。
/// 锁中毒时继续使用队列内容，通知不会因此丢失。
#[derive(Debug, Default)]
pub struct NoticeQueue {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeQueue {
    /// 创建空队列
    pub fn new() -> Self {
        Self::default()
    }

    /// 取走并清空所有待展示的通知
    pub fn drain(&self) -> Vec<Notice> {
        let mut notices = self.notices.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *notices)
    }

    /// 查看待展示的通知（不清空）
    pub fn pending(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for NoticeQueue {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

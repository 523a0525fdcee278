//! # 客户端状态仓库
//!
//! 每个业务资源对应一个状态模块，模块持有自己的状态切片并暴露"动作"入口：
//! - `task` - 任务列表、任务详情、任务状态轮询
//! - `requirement` - 需求列表与增删改
//! - `point` - 测试点列表、增删改与需求分析
//! - `testcase` - 测试用例列表、用例生成与生成进度
//!
//! `Store` 把四个模块组装在一起，由宿主显式构造并注入 `ApiClient`，不存在全局单例。
//!
//! ## 动作的统一流程
//! 1. 置 `loading = true`（由 `LoadingGuard` 持有，任何返回路径都会复位）
//! 2. 通过 `ApiClient` 调用模块对应的接口
//! 3. 成功：提交状态切片，必要时发出成功通知，返回完整信封
//! 4. 失败：状态保持不变，返回 `{code: -1, message}` 合成信封；
//!    封装层已通知过的失败不再重复通知，本地处理失败由动作自己通知一次
//! 5. `LoadingGuard` 析构，置 `loading = false`
//!
//! ## 并发
//! 模块状态放在 `std::sync::RwLock` 中，锁只在同步的提交阶段短暂持有，从不跨越 await。
//! 同一模块的重叠动作不做互斥：后完成的响应覆盖先完成的，`loading` 以最后一次复位为准。

pub mod point;
pub mod requirement;
pub mod task;
pub mod testcase;

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::models::envelope::Envelope;
use crate::models::settings::ClientConfig;
use crate::services::http::{ApiClient, ApiError};
use crate::services::notify::{Notice, Notifier};

use point::{PointModule, PointState};
use requirement::{RequirementModule, RequirementState};
use task::{TaskModule, TaskState};
use testcase::{TestcaseModule, TestcaseState};

/// 带加载标记的状态切片
pub(crate) trait Loading {
    fn set_loading(&mut self, loading: bool);
}

/// 加载标记守卫
///
/// 创建时置位，析构时复位；动作无论成功、失败还是提前返回都会经过析构。
pub(crate) struct LoadingGuard<'a, S: Loading> {
    state: &'a RwLock<S>,
}

impl<'a, S: Loading> LoadingGuard<'a, S> {
    pub(crate) fn begin(state: &'a RwLock<S>) -> Self {
        commit(state, |s| s.set_loading(true));
        Self { state }
    }
}

impl<S: Loading> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        commit(self.state, |s| s.set_loading(false));
    }
}

/// 在写锁下修改状态切片
///
/// 锁中毒只可能来自提交闭包内的 panic，此时状态仍然是一次完整赋值的结果，直接继续使用。
pub(crate) fn commit<S, R>(state: &RwLock<S>, mutate: impl FnOnce(&mut S) -> R) -> R {
    let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
    mutate(&mut guard)
}

/// 读取状态切片的快照
pub(crate) fn snapshot<S: Clone>(state: &RwLock<S>) -> S {
    state.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// 动作失败的统一收口
///
/// 记录日志；封装层没有通知过的失败在这里补发一条错误通知；返回合成失败信封。
pub(crate) fn recover(notifier: &dyn Notifier, error: ApiError, failure: &str) -> Envelope {
    log::error!("{}: {}", failure, error);
    if !error.is_notified() {
        notifier.notify(Notice::error(failure));
    }
    Envelope::failure(failure)
}

/// 不发通知的失败收口（用于高频轮询）
pub(crate) fn recover_quietly(error: ApiError, failure: &str) -> Envelope {
    log::error!("{}: {}", failure, error);
    Envelope::failure(failure)
}

/// 解析信封数据，失败时归为本地处理失败
pub(crate) fn decode<T: serde::de::DeserializeOwned>(envelope: &Envelope) -> Result<T, ApiError> {
    envelope.decode_data().map_err(ApiError::Payload)
}

/// 四个状态模块组成的仓库
pub struct Store {
    /// 任务模块
    pub task: TaskModule,
    /// 需求模块
    pub requirement: RequirementModule,
    /// 测试点模块
    pub point: PointModule,
    /// 测试用例模块
    pub testcase: TestcaseModule,
}

/// 整个仓库的状态快照，供 UI 层一次性渲染
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub task: TaskState,
    pub requirement: RequirementState,
    pub point: PointState,
    pub testcase: TestcaseState,
}

impl Store {
    /// 使用已构造好的 API 客户端创建仓库，所有模块共享同一个客户端
    pub fn new(client: ApiClient) -> Self {
        Self {
            task: TaskModule::new(client.clone()),
            requirement: RequirementModule::new(client.clone()),
            point: PointModule::new(client.clone()),
            testcase: TestcaseModule::new(client),
        }
    }

    /// 按配置创建基于 reqwest 的仓库
    ///
    /// # 错误
    /// 底层 HTTP 客户端初始化失败时返回错误
    pub fn from_config(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> Result<Self, String> {
        Ok(Self::new(ApiClient::from_config(config, notifier)?))
    }

    /// 获取所有模块的状态快照
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            task: self.task.state(),
            requirement: self.requirement.state(),
            point: self.point.state(),
            testcase: self.testcase.state(),
        }
    }
}

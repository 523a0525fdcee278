//! # 任务状态模块
//!
//! 管理任务列表、当前任务详情，以及被界面"盯住"的那个任务的状态和进度清单：
//! - `fetch_task_list` - 分页获取任务列表
//! - `fetch_task_detail` - 获取单个任务详情
//! - `fetch_task_status` - 轮询任务状态并推导进度清单（不切换加载标记）
//! - `cancel_task` - 取消任务

use std::sync::RwLock;

use serde::Serialize;
use serde_json::json;

use super::{Loading, LoadingGuard, commit, decode, recover, recover_quietly, snapshot};
use crate::models::envelope::{Envelope, PageData, Pagination};
use crate::models::id::RecordId;
use crate::models::progress::{ProgressSteps, initial_steps};
use crate::models::task::Task;
use crate::services::http::{ApiClient, ApiError};
use crate::services::notify::Notice;
use crate::services::progress;

const TASK_LIST: &str = "/api/v1/task/list";
const TASK_DETAIL: &str = "/api/v1/task/detail";
const TASK_STATUS: &str = "/api/v1/task/status";
const TASK_CANCEL: &str = "/api/v1/task/cancel";

const FETCH_LIST_FAILED: &str = "获取任务列表失败";
const FETCH_DETAIL_FAILED: &str = "获取任务详情失败";
const FETCH_STATUS_FAILED: &str = "获取任务状态失败";
const CANCEL_FAILED: &str = "取消任务失败";
const CANCEL_SUCCEEDED: &str = "任务已取消";

/// 任务模块状态
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskState {
    /// 当前页的任务列表
    pub task_list: Vec<Task>,
    /// 当前查看的任务详情
    pub current_task: Option<Task>,
    /// 是否有请求进行中
    pub loading: bool,
    /// 分页信息
    pub pagination: Pagination,
    /// 最近一次轮询得到的任务状态
    pub task_status: Option<Task>,
    /// 由任务进度推导的四步清单
    pub progress_steps: ProgressSteps,
}

impl Default for TaskState {
    fn default() -> Self {
        Self {
            task_list: Vec::new(),
            current_task: None,
            loading: false,
            pagination: Pagination::default(),
            task_status: None,
            progress_steps: initial_steps(),
        }
    }
}

impl Loading for TaskState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// 任务模块
pub struct TaskModule {
    client: ApiClient,
    state: RwLock<TaskState>,
}

impl TaskModule {
    /// 创建处于初始状态的模块
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: RwLock::new(TaskState::default()),
        }
    }

    /// 获取状态快照
    pub fn state(&self) -> TaskState {
        snapshot(&self.state)
    }

    /// 选中一个任务作为当前任务（`None` 表示取消选择）
    pub fn select_task(&self, task: Option<Task>) {
        commit(&self.state, |s| s.current_task = task);
    }

    // ======== 动作 ========

    /// 分页获取任务列表
    ///
    /// 成功后整体替换任务列表和分页信息。
    ///
    /// # 参数
    /// - `params` - 查询条件（页码、页大小、排序等），原样作为请求体发送
    ///
    /// # 返回值
    /// 成功时为完整信封；失败时为 `{code: -1, message: "获取任务列表失败"}`
    pub async fn fetch_task_list<P: Serialize + ?Sized>(&self, params: &P) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self.try_fetch_task_list(params).await {
            Ok(envelope) => envelope,
            Err(e) => recover(self.client.notifier(), e, FETCH_LIST_FAILED),
        }
    }

    async fn try_fetch_task_list<P: Serialize + ?Sized>(&self, params: &P) -> Result<Envelope, ApiError> {
        let envelope = self.client.post(TASK_LIST, params).await?;
        let page: PageData<Task> = decode(&envelope)?;
        commit(&self.state, |s| {
            s.pagination = page.pagination();
            s.task_list = page.list;
        });
        Ok(envelope)
    }

    /// 获取任务详情，成功后替换当前任务
    ///
    /// # 参数
    /// - `task_id` - 任务 ID
    pub async fn fetch_task_detail(&self, task_id: &RecordId) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self.try_fetch_task_detail(task_id).await {
            Ok(envelope) => envelope,
            Err(e) => recover(self.client.notifier(), e, FETCH_DETAIL_FAILED),
        }
    }

    async fn try_fetch_task_detail(&self, task_id: &RecordId) -> Result<Envelope, ApiError> {
        let envelope = self
            .client
            .post(TASK_DETAIL, &json!({ "task_id": task_id }))
            .await?;
        let task: Task = decode(&envelope)?;
        commit(&self.state, |s| s.current_task = Some(task));
        Ok(envelope)
    }

    /// 轮询任务状态
    ///
    /// 由界面的定时器反复调用，因此不切换加载标记，失败时也不追加本地通知。
    /// 进度清单每次都从完整的当前百分比重新推导。
    ///
    /// # 参数
    /// - `task_id` - 任务 ID
    pub async fn fetch_task_status(&self, task_id: &RecordId) -> Envelope {
        match self.try_fetch_task_status(task_id).await {
            Ok(envelope) => envelope,
            Err(e) => recover_quietly(e, FETCH_STATUS_FAILED),
        }
    }

    async fn try_fetch_task_status(&self, task_id: &RecordId) -> Result<Envelope, ApiError> {
        let envelope = self
            .client
            .post(TASK_STATUS, &json!({ "task_id": task_id }))
            .await?;
        let status: Task = decode(&envelope)?;
        let steps = progress::progress_steps(status.progress);
        commit(&self.state, |s| {
            s.task_status = Some(status);
            s.progress_steps = steps;
        });
        Ok(envelope)
    }

    /// 取消任务
    ///
    /// 后端把任务标记为失败；本模块不修改任何状态，只发出成功通知。
    ///
    /// # 参数
    /// - `task_id` - 任务 ID
    pub async fn cancel_task(&self, task_id: &RecordId) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self
            .client
            .post(TASK_CANCEL, &json!({ "task_id": task_id }))
            .await
        {
            Ok(envelope) => {
                self.client.notifier().notify(Notice::success(CANCEL_SUCCEEDED));
                envelope
            }
            Err(e) => recover(self.client.notifier(), e, CANCEL_FAILED),
        }
    }
}

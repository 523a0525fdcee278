//! # 测试用例状态模块
//!
//! 管理测试用例列表，发起用例生成任务，并轮询生成任务的状态：
//! - `fetch_testcase_list` - 分页获取用例列表
//! - `search_testcases_by_task` - 获取某个生成任务产出的全部用例
//! - `generate_testcases` - 对选中的测试点发起用例生成，记录任务 ID
//! - `fetch_task_status` - 轮询生成任务状态，推导四步进度清单
//!
//! ## 进度清单
//! 每次轮询都由完整的当前百分比重新推导清单（见 `services::progress`），
//! 后端若返回更低的百分比，已完成的步骤会回退；这里不额外加单调性约束。

use std::sync::RwLock;

use serde::Serialize;
use serde_json::json;

use super::{Loading, LoadingGuard, commit, decode, recover, recover_quietly, snapshot};
use crate::models::envelope::{Envelope, PageData, Pagination};
use crate::models::id::RecordId;
use crate::models::progress::{ProgressSteps, initial_steps};
use crate::models::task::{Task, TaskHandle};
use crate::models::testcase::Testcase;
use crate::services::http::{ApiClient, ApiError};
use crate::services::notify::Notice;
use crate::services::progress;

const TESTCASE_LIST: &str = "/api/v1/testcase/list";
const TESTCASE_SEARCH: &str = "/api/v1/testcase/search";
const TESTCASE_GENERATE: &str = "/api/v1/testcase/generate";
const TASK_STATUS: &str = "/api/v1/task/status";

const FETCH_LIST_FAILED: &str = "获取测试用例列表失败";

/// 测试用例模块状态
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestcaseState {
    /// 测试用例列表
    pub testcase_list: Vec<Testcase>,
    /// 当前选中的测试用例
    pub current_testcase: Option<Testcase>,
    /// 是否有请求进行中
    pub loading: bool,
    /// 分页信息
    pub pagination: Pagination,
    /// 最近一次生成任务的 ID
    pub task_id: Option<RecordId>,
    /// 用例所属需求 ID（由界面设置）
    pub require_id: Option<RecordId>,
    /// 最近一次轮询得到的任务状态
    pub task_status: Option<Task>,
    /// 任务当前阶段的说明文字
    pub task_message: String,
    /// 四步进度清单
    pub progress_steps: ProgressSteps,
}

impl Default for TestcaseState {
    fn default() -> Self {
        Self {
            testcase_list: Vec::new(),
            current_testcase: None,
            loading: false,
            pagination: Pagination::default(),
            task_id: None,
            require_id: None,
            task_status: None,
            task_message: String::new(),
            progress_steps: initial_steps(),
        }
    }
}

impl Loading for TestcaseState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// 测试用例模块
pub struct TestcaseModule {
    client: ApiClient,
    state: RwLock<TestcaseState>,
}

impl TestcaseModule {
    /// 创建处于初始状态的模块
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: RwLock::new(TestcaseState::default()),
        }
    }

    /// 获取状态快照
    pub fn state(&self) -> TestcaseState {
        snapshot(&self.state)
    }

    /// 选中一个测试用例作为当前用例
    pub fn select_testcase(&self, testcase: Option<Testcase>) {
        commit(&self.state, |s| s.current_testcase = testcase);
    }

    /// 设置用例所属的需求 ID
    pub fn set_require_id(&self, require_id: Option<RecordId>) {
        commit(&self.state, |s| s.require_id = require_id);
    }

    // ======== 列表 ========

    /// 分页获取测试用例列表
    ///
    /// # 返回值
    /// 成功时为完整信封；失败时为 `{code: -1, message: "获取测试用例列表失败"}`
    pub async fn fetch_testcase_list<P: Serialize + ?Sized>(&self, params: &P) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self.try_fetch_page(TESTCASE_LIST, params).await {
            Ok(envelope) => envelope,
            Err(e) => recover(self.client.notifier(), e, FETCH_LIST_FAILED),
        }
    }

    /// 获取某个生成任务产出的全部用例
    pub async fn search_testcases_by_task(&self, task_id: &RecordId) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self
            .try_fetch_page(TESTCASE_SEARCH, &json!({ "task_id": task_id }))
            .await
        {
            Ok(envelope) => envelope,
            Err(e) => recover(self.client.notifier(), e, FETCH_LIST_FAILED),
        }
    }

    async fn try_fetch_page<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Envelope, ApiError> {
        let envelope = self.client.post(path, params).await?;
        let page: PageData<Testcase> = decode(&envelope)?;
        commit(&self.state, |s| {
            s.pagination = page.pagination();
            s.testcase_list = page.list;
        });
        Ok(envelope)
    }

    // ======== 生成任务 ========

    /// 对选中的测试点发起用例生成
    ///
    /// 成功后记录 `data.task_id`，并提示"测试用例生成任务已启动"。
    ///
    /// # 参数
    /// - `point_ids` - 测试点 ID 列表
    pub async fn generate_testcases(&self, point_ids: &[RecordId]) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self.try_generate_testcases(point_ids).await {
            Ok(envelope) => {
                self.client
                    .notifier()
                    .notify(Notice::success("测试用例生成任务已启动"));
                envelope
            }
            Err(e) => recover(self.client.notifier(), e, "启动测试用例生成失败"),
        }
    }

    async fn try_generate_testcases(&self, point_ids: &[RecordId]) -> Result<Envelope, ApiError> {
        let envelope = self
            .client
            .post(TESTCASE_GENERATE, &json!({ "point_ids": point_ids }))
            .await?;
        let handle: TaskHandle = decode(&envelope)?;
        commit(&self.state, |s| s.task_id = handle.task_id);
        Ok(envelope)
    }

    /// 轮询生成任务的状态
    ///
    /// 不切换加载标记（轮询期间界面不应闪烁），失败时只记录日志，
    /// 错误通知由 HTTP 封装层负责。
    ///
    /// # 参数
    /// - `task_id` - 生成任务 ID
    pub async fn fetch_task_status(&self, task_id: &RecordId) -> Envelope {
        match self.try_fetch_task_status(task_id).await {
            Ok(envelope) => envelope,
            Err(e) => recover_quietly(e, "获取任务状态失败"),
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
            s.task_message = status.message.clone().unwrap_or_default();
            s.task_status = Some(status);
            s.progress_steps = steps;
        });
        Ok(envelope)
    }
}

//! # 需求状态模块
//!
//! 需求搜索接口直接返回需求数组，不带分页信息，
//! 因此分页在客户端按列表长度合成：`{current: 1, size: len, total: len}`。

use std::sync::RwLock;

use serde::Serialize;
use serde_json::json;

use super::{Loading, LoadingGuard, commit, decode, recover, snapshot};
use crate::models::envelope::{Envelope, Pagination};
use crate::models::id::RecordId;
use crate::models::requirement::Requirement;
use crate::services::http::{ApiClient, ApiError};
use crate::services::notify::Notice;

const REQUIRE_SEARCH: &str = "/api/v1/require/search";
const REQUIRE_UPDATE: &str = "/api/v1/require/update";
const REQUIRE_DELETE: &str = "/api/v1/require/delete";

/// 需求模块状态
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementState {
    /// 需求列表
    pub requirement_list: Vec<Requirement>,
    /// 当前选中的需求
    pub current_requirement: Option<Requirement>,
    /// 是否有请求进行中
    pub loading: bool,
    /// 分页信息（客户端合成）
    pub pagination: Pagination,
}

impl Loading for RequirementState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// 需求模块
pub struct RequirementModule {
    client: ApiClient,
    state: RwLock<RequirementState>,
}

impl RequirementModule {
    /// 创建处于初始状态的模块
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: RwLock::new(RequirementState::default()),
        }
    }

    /// 获取状态快照
    pub fn state(&self) -> RequirementState {
        snapshot(&self.state)
    }

    /// 选中一个需求作为当前需求
    pub fn select_requirement(&self, requirement: Option<Requirement>) {
        commit(&self.state, |s| s.current_requirement = requirement);
    }

    /// 获取需求列表
    ///
    /// # 参数
    /// - `params` - 查询条件，原样作为请求体发送
    ///
    /// # 返回值
    /// 成功时为完整信封；失败时为 `{code: -1, message: "获取需求列表失败"}`
    pub async fn fetch_requirement_list<P: Serialize + ?Sized>(&self, params: &P) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self.try_fetch_requirement_list(params).await {
            Ok(envelope) => envelope,
            Err(e) => recover(self.client.notifier(), e, "获取需求列表失败"),
        }
    }

    async fn try_fetch_requirement_list<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<Envelope, ApiError> {
        let envelope = self.client.post(REQUIRE_SEARCH, params).await?;
        let list: Vec<Requirement> = decode(&envelope)?;
        commit(&self.state, |s| {
            s.pagination = Pagination::synthesized(list.len());
            s.requirement_list = list;
        });
        Ok(envelope)
    }

    /// 更新需求
    ///
    /// 不修改本地状态，成功时提示"需求更新成功"，调用方自行决定是否重新拉取列表。
    pub async fn update_requirement(&self, requirement: &Requirement) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self.client.post(REQUIRE_UPDATE, requirement).await {
            Ok(envelope) => {
                self.client.notifier().notify(Notice::success("需求更新成功"));
                envelope
            }
            Err(e) => recover(self.client.notifier(), e, "更新需求失败"),
        }
    }

    /// 删除需求
    pub async fn delete_requirement(&self, require_id: &RecordId) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self
            .client
            .post(REQUIRE_DELETE, &json!({ "require_id": require_id }))
            .await
        {
            Ok(envelope) => {
                self.client.notifier().notify(Notice::success("需求删除成功"));
                envelope
            }
            Err(e) => recover(self.client.notifier(), e, "删除需求失败"),
        }
    }
}

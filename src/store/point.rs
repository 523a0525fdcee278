//! # 测试点状态模块
//!
//! 管理测试点列表与增删改，并负责发起需求分析任务：
//! 分析任务启动后，其任务句柄记录在 `active_task` 中，
//! 界面据此通过任务模块轮询分析进度。

use std::sync::RwLock;

use serde::Serialize;
use serde_json::json;

use super::{Loading, LoadingGuard, commit, decode, recover, snapshot};
use crate::models::envelope::{Envelope, PageData, Pagination};
use crate::models::id::RecordId;
use crate::models::point::Point;
use crate::models::task::TaskHandle;
use crate::services::http::{ApiClient, ApiError};
use crate::services::notify::Notice;

const POINT_LIST: &str = "/api/v1/point/list";
const POINT_SEARCH: &str = "/api/v1/point/search";
const POINT_CREATE: &str = "/api/v1/point/create";
const POINT_UPDATE: &str = "/api/v1/point/update";
const POINT_DELETE: &str = "/api/v1/point/delete";
const POINT_ANALYSIS: &str = "/api/v1/point/analysis";

const FETCH_LIST_FAILED: &str = "获取测试点列表失败";

/// 测试点模块状态
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointState {
    /// 测试点列表
    pub point_list: Vec<Point>,
    /// 当前选中的测试点
    pub current_point: Option<Point>,
    /// 是否有请求进行中
    pub loading: bool,
    /// 分页信息
    pub pagination: Pagination,
    /// 最近一次启动的需求分析任务
    pub active_task: Option<TaskHandle>,
}

impl Loading for PointState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// 测试点模块
pub struct PointModule {
    client: ApiClient,
    state: RwLock<PointState>,
}

impl PointModule {
    /// 创建处于初始状态的模块
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: RwLock::new(PointState::default()),
        }
    }

    /// 获取状态快照
    pub fn state(&self) -> PointState {
        snapshot(&self.state)
    }

    /// 选中一个测试点作为当前测试点
    pub fn select_point(&self, point: Option<Point>) {
        commit(&self.state, |s| s.current_point = point);
    }

    /// 分页获取测试点列表
    ///
    /// # 返回值
    /// 成功时为完整信封；失败时为 `{code: -1, message: "获取测试点列表失败"}`
    pub async fn fetch_point_list<P: Serialize + ?Sized>(&self, params: &P) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self.try_fetch_page(POINT_LIST, params).await {
            Ok(envelope) => envelope,
            Err(e) => recover(self.client.notifier(), e, FETCH_LIST_FAILED),
        }
    }

    /// 获取某个分析任务产出的全部测试点
    ///
    /// 搜索接口只返回 `list` 和 `total`，分页退化为 `{1, 本页条数, total}`。
    pub async fn search_points_by_task(&self, task_id: &RecordId) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self
            .try_fetch_page(POINT_SEARCH, &json!({ "task_id": task_id }))
            .await
        {
            Ok(envelope) => envelope,
            Err(e) => recover(self.client.notifier(), e, FETCH_LIST_FAILED),
        }
    }

    async fn try_fetch_page<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Envelope, ApiError> {
        let envelope = self.client.post(path, params).await?;
        let page: PageData<Point> = decode(&envelope)?;
        commit(&self.state, |s| {
            s.pagination = page.pagination();
            s.point_list = page.list;
        });
        Ok(envelope)
    }

    /// 新建测试点
    pub async fn create_point(&self, point: &Point) -> Envelope {
        self.write_point(POINT_CREATE, point, "测试点创建成功", "创建测试点失败")
            .await
    }

    /// 更新测试点
    ///
    /// 后端要求 `point_id`、`module`、`function_name`、`description`、`test_type`、
    /// `business_domain`、`chunks`、`preconditions` 均非空。
    pub async fn update_point(&self, point: &Point) -> Envelope {
        self.write_point(POINT_UPDATE, point, "测试点更新成功", "更新测试点失败")
            .await
    }

    /// 删除测试点
    pub async fn delete_point(&self, point_id: &RecordId) -> Envelope {
        self.write_point(
            POINT_DELETE,
            &json!({ "point_id": point_id }),
            "测试点删除成功",
            "删除测试点失败",
        )
        .await
    }

    /// 只发通知、不提交状态的写操作
    async fn write_point<P: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &P,
        succeeded: &str,
        failed: &str,
    ) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self.client.post(path, body).await {
            Ok(envelope) => {
                self.client.notifier().notify(Notice::success(succeeded));
                envelope
            }
            Err(e) => recover(self.client.notifier(), e, failed),
        }
    }

    /// 对需求发起测试点分析
    ///
    /// 成功后把返回的任务句柄记为 `active_task`。
    ///
    /// # 参数
    /// - `require_id` - 需求 ID
    pub async fn analysis_point(&self, require_id: &RecordId) -> Envelope {
        let _loading = LoadingGuard::begin(&self.state);
        match self.try_analysis_point(require_id).await {
            Ok(envelope) => {
                self.client.notifier().notify(Notice::success("需求分析任务已启动"));
                envelope
            }
            Err(e) => recover(self.client.notifier(), e, "启动需求分析失败"),
        }
    }

    async fn try_analysis_point(&self, require_id: &RecordId) -> Result<Envelope, ApiError> {
        let envelope = self
            .client
            .post(POINT_ANALYSIS, &json!({ "require_id": require_id }))
            .await?;
        let handle: TaskHandle = decode(&envelope)?;
        commit(&self.state, |s| s.active_task = Some(handle));
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::notify::{NoticeKind, NoticeQueue};
    use crate::test_support::ScriptedTransport;

    fn module(transport: ScriptedTransport) -> (Arc<ScriptedTransport>, Arc<NoticeQueue>, PointModule) {
        let transport = Arc::new(transport);
        let notices = Arc::new(NoticeQueue::new());
        let client = ApiClient::new(transport.clone(), notices.clone());
        (transport, notices, PointModule::new(client))
    }

    fn point_page() -> serde_json::Value {
        json!({
            "code": 0,
            "message": "Success",
            "data": {
                "current": 1,
                "size": 20,
                "total": 2,
                "list": [
                    { "point_id": "POINT-1", "module": "登录", "function_name": "密码登录",
                      "preconditions": ["已注册账号"] },
                    { "point_id": "POINT-2", "module": "登录", "function_name": "验证码登录" }
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_point_list_success() {
        let (_, _, module) = module(ScriptedTransport::new().respond(POINT_LIST, point_page()));

        let envelope = module.fetch_point_list(&json!({ "current": 1, "size": 20 })).await;
        assert!(envelope.is_success());

        let state = module.state();
        assert_eq!(state.point_list.len(), 2);
        assert_eq!(state.point_list[0].preconditions, json!(["已注册账号"]));
        assert_eq!(state.pagination, Pagination { current: 1, size: 20, total: 2 });
    }

    #[tokio::test]
    async fn test_fetch_point_list_tolerates_null_columns() {
        let (_, notices, module) = module(ScriptedTransport::new().respond(
            POINT_LIST,
            json!({
                "code": 0,
                "data": {
                    "current": 1, "size": 10, "total": 1,
                    "list": [ { "point_id": "P1", "module": null, "function_name": "登录",
                                "description": null, "test_type": null, "business_domain": null,
                                "chunks": null, "preconditions": null } ]
                }
            }),
        ));

        let envelope = module.fetch_point_list(&json!({ "current": 1 })).await;
        assert!(envelope.is_success());

        let state = module.state();
        assert_eq!(state.point_list.len(), 1);
        assert_eq!(state.point_list[0].module, "");
        assert_eq!(state.point_list[0].function_name, "登录");
        assert_eq!(state.pagination, Pagination { current: 1, size: 10, total: 1 });
        assert!(notices.drain().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_point_list_business_failure() {
        let (_, notices, module) = module(
            ScriptedTransport::new()
                .respond(POINT_LIST, point_page())
                .respond(POINT_LIST, json!({ "code": 1, "message": "bad" })),
        );

        module.fetch_point_list(&json!({})).await;
        let before = module.state();
        notices.drain();

        let envelope = module.fetch_point_list(&json!({})).await;
        assert_eq!(envelope.code, -1);
        assert_eq!(envelope.message, "获取测试点列表失败");

        let after = module.state();
        assert_eq!(after.point_list, before.point_list);
        assert_eq!(after.pagination, before.pagination);
        assert!(!after.loading);

        let drained = notices.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn test_search_by_task_uses_total_from_server() {
        let (transport, _, module) = module(ScriptedTransport::new().respond(
            POINT_SEARCH,
            json!({ "code": 0, "data": { "total": 1, "list": [ { "point_id": "POINT-9" } ] } }),
        ));

        module.search_points_by_task(&RecordId::from("TASK-A")).await;
        assert_eq!(transport.requests()[0].payload, Some(json!({ "task_id": "TASK-A" })));
        assert_eq!(module.state().pagination, Pagination { current: 1, size: 1, total: 1 });
    }

    #[tokio::test]
    async fn test_create_update_delete_only_notify() {
        let ok = json!({ "code": 0, "message": "ok", "data": null });
        let (transport, notices, module) = module(
            ScriptedTransport::new()
                .respond(POINT_CREATE, ok.clone())
                .respond(POINT_UPDATE, ok.clone())
                .respond(POINT_DELETE, ok),
        );
        let mut point = Point {
            module: "登录".to_string(),
            function_name: "密码登录".to_string(),
            ..Default::default()
        };

        assert!(module.create_point(&point).await.is_success());
        point.point_id = Some(RecordId::from("POINT-1"));
        assert!(module.update_point(&point).await.is_success());
        assert!(module.delete_point(&RecordId::from(7)).await.is_success());

        let messages: Vec<String> = notices.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["测试点创建成功", "测试点更新成功", "测试点删除成功"]);

        let requests = transport.requests();
        // 新建时没有 point_id
        assert!(requests[0].payload.as_ref().unwrap().get("point_id").is_none());
        assert_eq!(requests[1].payload.as_ref().unwrap()["point_id"], json!("POINT-1"));
        assert_eq!(requests[2].payload, Some(json!({ "point_id": 7 })));
        assert!(module.state().point_list.is_empty());
    }

    #[tokio::test]
    async fn test_analysis_records_active_task() {
        let (_, notices, module) = module(ScriptedTransport::new().respond(
            POINT_ANALYSIS,
            json!({ "code": 0, "message": "Analysis started",
                    "data": { "task_id": "TASK-X", "status": "pending", "progress": 0 } }),
        ));

        let envelope = module.analysis_point(&RecordId::from("REQ-1")).await;
        assert!(envelope.is_success());
        let active = module.state().active_task.unwrap();
        assert_eq!(active.task_id, Some(RecordId::from("TASK-X")));
        assert_eq!(active.status.as_deref(), Some("pending"));
        assert_eq!(notices.drain(), vec![Notice::success("需求分析任务已启动")]);
    }

    #[tokio::test]
    async fn test_analysis_without_task_id_still_succeeds() {
        let (_, notices, module) = module(ScriptedTransport::new().respond(
            POINT_ANALYSIS,
            json!({ "code": 0, "message": "Analysis started", "data": { "status": "pending" } }),
        ));

        let envelope = module.analysis_point(&RecordId::from("REQ-1")).await;
        assert!(envelope.is_success());
        let active = module.state().active_task.unwrap();
        assert!(active.task_id.is_none());
        assert_eq!(active.status.as_deref(), Some("pending"));
        assert_eq!(notices.drain(), vec![Notice::success("需求分析任务已启动")]);
    }

    #[tokio::test]
    async fn test_analysis_transport_failure() {
        let (_, notices, module) = module(ScriptedTransport::new().fail(POINT_ANALYSIS, "timeout"));

        let envelope = module.analysis_point(&RecordId::from("REQ-1")).await;
        assert_eq!(envelope, Envelope::failure("启动需求分析失败"));
        assert!(module.state().active_task.is_none());
        assert_eq!(notices.drain(), vec![Notice::error("timeout")]);
    }
}

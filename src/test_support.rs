//! 单元测试用的内存传输层

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use http::Method;
use serde_json::Value;
use tokio::sync::Notify;

use crate::services::http::{Transport, TransportFuture};

/// 一次被记录下来的请求
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub payload: Option<Value>,
}

/// 按路径回放预设响应的传输层
///
/// 同一路径可以预设多个响应，按顺序依次取出；未预设的路径按传输失败处理。
/// 设置闸门后，每个请求都会挂起直到闸门放行，用于观察请求进行中的状态。
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, String>>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, path: &str, body: Value) -> Self {
        self.push(path, Ok(body))
    }

    pub(crate) fn fail(self, path: &str, error: &str) -> Self {
        self.push(path, Err(error.to_string()))
    }

    pub(crate) fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(self, path: &str, response: Result<Value, String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
        self
    }
}

impl Transport for ScriptedTransport {
    fn execute<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        payload: Option<Value>,
    ) -> TransportFuture<'a> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.to_string(),
                payload,
            });

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            self.responses
                .lock()
                .unwrap()
                .get_mut(path)
                .and_then(|queue| queue.pop_front())
                .unwrap_or_else(|| Err(format!("no scripted response for {}", path)))
        })
    }
}

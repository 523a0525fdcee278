//! 集成测试用的本地模拟后端
//!
//! 在 127.0.0.1 的随机端口上启动一个 hyper HTTP/1.1 服务器，按路径回放预设响应，
//! 并记录收到的每个请求（路径、查询字符串、JSON 请求体）。

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use tokio::net::TcpListener;

/// 预设的路由响应
#[derive(Clone)]
pub struct Route {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Route {
    /// 200 + JSON 响应体
    pub fn json(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: None,
        }
    }

    /// 指定状态码和原始响应体
    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    /// 延迟响应（用于触发客户端超时）
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// 模拟后端收到的请求
#[derive(Debug, Clone)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

/// 运行中的模拟后端
pub struct MockBackend {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Received>>>,
}

impl MockBackend {
    /// 启动模拟后端
    pub async fn start(routes: Vec<(&str, Route)>) -> Self {
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        );
        let received = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server_received = received.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let io = TokioIo::new(stream);
                let routes = routes.clone();
                let received = server_received.clone();

                tokio::spawn(async move {
                    let service = service_fn(move |req| handle(req, routes.clone(), received.clone()));
                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });

        Self { addr, received }
    }

    /// 后端基础地址
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// 已收到的请求
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

async fn handle(
    req: Request<Incoming>,
    routes: Arc<HashMap<String, Route>>,
    received: Arc<Mutex<Vec<Received>>>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    let bytes = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => Bytes::new(),
    };
    let body = serde_json::from_slice::<Value>(&bytes).ok();

    received.lock().unwrap().push(Received {
        method,
        path: path.clone(),
        query,
        body,
    });

    let route = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| Route::raw(StatusCode::NOT_FOUND, "not found"));

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    let mut response = Response::new(Full::new(Bytes::from(route.body)));
    *response.status_mut() = route.status;
    Ok(response)
}

//! # HTTP 请求封装服务
//!
//! 所有对 husky 后端的调用都经过 `ApiClient`，它负责：
//! - 拼接固定的基础地址、施加固定的请求超时
//! - 请求拦截：记录每一次外发请求
//! - 响应拦截：解开 `{code, message, data}` 信封
//! - 失败归一：非 0 业务码、传输失败、非信封响应都转换为 `ApiError`
//! - 失败提示：每次失败恰好发出一条 3 秒的错误通知，成功时不发通知
//!
//! ## 分层
//! 网络层抽象为 `Transport` trait，生产环境使用基于 reqwest 的 `ReqwestTransport`，
//! 测试中可以替换为内存实现，使信封处理和状态模块的测试不依赖真实网络。
//!
//! ## 不做的事情
//! 不重试，不区分超时与其他传输失败，不附加认证头。

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::models::envelope::Envelope;
use crate::models::settings::ClientConfig;
use crate::services::notify::{Notice, Notifier};

/// 业务失败且服务端未给出提示文字时的默认通知
pub const DEFAULT_FAILURE_MESSAGE: &str = "请求失败";

/// 传输失败且没有错误描述时的默认通知
pub const DEFAULT_TRANSPORT_MESSAGE: &str = "服务器异常";

/// 传输层返回的异步结果
///
/// 成功时为响应体解析出的 JSON（无法解析为 JSON 时为原始文本字符串），
/// 失败时为错误描述。
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, String>> + Send + 'a>>;

/// 网络传输层
///
/// 只负责把请求送达并取回响应体，不理解信封结构。
pub trait Transport: Send + Sync {
    /// 执行一次请求
    ///
    /// # 参数
    /// - `method` - HTTP 方法
    /// - `path` - 接口路径（以 `/` 开头，如 `/api/v1/task/list`）
    /// - `payload` - GET/DELETE 作为查询参数，POST/PUT 作为 JSON 请求体
    fn execute<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        payload: Option<Value>,
    ) -> TransportFuture<'a>;
}

/// HTTP 封装层的失败分类
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// 传输失败：连接失败、超时或 HTTP 状态码非 2xx，拿不到信封
    #[error("传输失败: {0}")]
    Transport(String),

    /// 业务失败：信封中的 `code` 非 0
    #[error("业务失败 (code={code}): {message}")]
    Business { code: i64, message: String },

    /// 响应体不是信封结构
    #[error("响应不是合法的信封: {0}")]
    Malformed(String),

    /// 本地处理失败：请求参数无法序列化，或响应数据形状与预期不符
    #[error("数据处理失败: {0}")]
    Payload(String),
}

impl ApiError {
    /// 封装层是否已经为这次失败发出过通知
    ///
    /// 只有本地处理失败（`Payload`）不经过响应拦截，需要调用方自行通知。
    pub fn is_notified(&self) -> bool {
        !matches!(self, ApiError::Payload(_))
    }
}

/// 基于 reqwest 的传输层实现
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// 按配置创建传输层
    ///
    /// # 错误
    /// 底层 HTTP 客户端初始化失败时返回错误
    pub fn new(config: &ClientConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| format!("创建 HTTP 客户端失败: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        payload: Option<Value>,
    ) -> TransportFuture<'a> {
        Box::pin(async move {
            let sends_query = method == Method::GET || method == Method::DELETE;
            let mut request = self.client.request(method, self.url(path));
            if let Some(payload) = payload.as_ref() {
                request = if sends_query {
                    request.query(payload)
                } else {
                    request.json(payload)
                };
            }

            let response = request.send().await.map_err(describe_error)?;

            let status = response.status();
            if !status.is_success() {
                return Err(format!("请求失败，状态码 {}", status.as_u16()));
            }

            let text = response.text().await.map_err(describe_error)?;
            Ok(serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text)))
        })
    }
}

/// 把 reqwest 错误转换为面向用户的描述
fn describe_error(error: reqwest::Error) -> String {
    if error.is_timeout() {
        "请求超时".to_string()
    } else {
        error.to_string()
    }
}

/// 后端 API 客户端
///
/// 持有传输层和通知出口，可以廉价克隆后分发给各状态模块。
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// 使用指定的传输层和通知出口创建客户端
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    /// 按配置创建基于 reqwest 的客户端
    ///
    /// # 错误
    /// 底层 HTTP 客户端初始化失败时返回错误
    pub fn from_config(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> Result<Self, String> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), notifier))
    }

    /// 获取通知出口（状态模块用它发出成功提示和本地失败提示）
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// 发送请求并解开响应信封
    ///
    /// # 参数
    /// - `method` - HTTP 方法
    /// - `path` - 接口路径
    /// - `payload` - 可选的查询参数或请求体
    ///
    /// # 返回值
    /// `code == 0` 时返回完整信封（调用方自行读取 `data`）
    ///
    /// # 错误
    /// 业务失败、传输失败或响应不是信封时返回 `ApiError`，并已发出一条错误通知
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
    ) -> Result<Envelope, ApiError> {
        // 请求拦截
        log::debug!("--> {} {}", method, path);

        let body = match self.transport.execute(method.clone(), path, payload).await {
            Ok(body) => body,
            Err(e) => {
                log::error!("响应错误: {} {}: {}", method, path, e);
                let message = if e.is_empty() {
                    DEFAULT_TRANSPORT_MESSAGE
                } else {
                    e.as_str()
                };
                self.notifier.notify(Notice::error(message));
                return Err(ApiError::Transport(e));
            }
        };

        self.intercept_response(&method, path, body)
    }

    /// 响应拦截：检查信封业务码
    fn intercept_response(
        &self,
        method: &Method,
        path: &str,
        body: Value,
    ) -> Result<Envelope, ApiError> {
        let envelope: Envelope = match serde_json::from_value(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::error!("响应不是信封结构: {} {}: {}", method, path, e);
                self.notifier.notify(Notice::error(DEFAULT_FAILURE_MESSAGE));
                return Err(ApiError::Malformed(e.to_string()));
            }
        };

        if envelope.is_success() {
            log::debug!("<-- {} {} ok", method, path);
            return Ok(envelope);
        }

        let message = if envelope.message.is_empty() {
            DEFAULT_FAILURE_MESSAGE.to_string()
        } else {
            envelope.message
        };
        log::error!("业务失败: {} {} code={}: {}", method, path, envelope.code, message);
        self.notifier.notify(Notice::error(message.as_str()));
        Err(ApiError::Business {
            code: envelope.code,
            message,
        })
    }

    /// 序列化参数后发送
    ///
    /// 参数无法序列化时视为请求拦截阶段的失败：只记录日志，不发通知。
    async fn send_serialized<P: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: &P,
    ) -> Result<Envelope, ApiError> {
        let value = serde_json::to_value(payload).map_err(|e| {
            log::error!("请求错误: {} {}: {}", method, path, e);
            ApiError::Payload(format!("序列化请求参数失败: {}", e))
        })?;
        let payload = if value.is_null() { None } else { Some(value) };
        self.send(method, path, payload).await
    }

    /// GET 请求，参数作为查询字符串
    pub async fn get<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Envelope, ApiError> {
        self.send_serialized(Method::GET, path, params).await
    }

    /// POST 请求，数据作为 JSON 请求体
    pub async fn post<P: Serialize + ?Sized>(&self, path: &str, data: &P) -> Result<Envelope, ApiError> {
        self.send_serialized(Method::POST, path, data).await
    }

    /// PUT 请求，数据作为 JSON 请求体
    pub async fn put<P: Serialize + ?Sized>(&self, path: &str, data: &P) -> Result<Envelope, ApiError> {
        self.send_serialized(Method::PUT, path, data).await
    }

    /// DELETE 请求，参数作为查询字符串
    pub async fn delete<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Envelope, ApiError> {
        self.send_serialized(Method::DELETE, path, params).await
    }
}

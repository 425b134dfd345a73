//! 接口客户端适配层
//!
//! 两个预先配置好的客户端：
//! - 认证客户端：内部 `/v1/auth` 接口，自动附带 Bearer 令牌
//! - 目录客户端：外部 TMDb 接口，自动附带 `api_key` 与 `language` 查询参数
//!
//! 两者共用同一个 `HttpClient`、相同的 JSON 请求头和超时，并输出相同格式的日志。

use std::rc::Rc;
use std::time::Duration;

use serde::Deserialize;
use tenpo_movies_shared::protocol::ApiRequest;

use crate::config::AppConfig;
use crate::error::{ApiError, HttpError};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::token::TokenStore;

/// 客户端种类，决定日志前缀和状态码诊断文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClientKind {
    Auth,
    Catalog,
}

impl ClientKind {
    fn label(&self) -> &'static str {
        match self {
            ClientKind::Auth => "[Auth API]",
            ClientKind::Catalog => "[TMDb API]",
        }
    }

    fn diagnose(&self, status: u16) -> Option<&'static str> {
        match (self, status) {
            (ClientKind::Auth, 401) => Some("Unauthorized access - please login again"),
            (ClientKind::Auth, 403) => Some("Access forbidden"),
            (ClientKind::Auth, 404) => Some("Resource not found"),
            (ClientKind::Catalog, 401) => Some("Invalid API key"),
            (ClientKind::Catalog, 404) => Some("Movie/Resource not found"),
            (ClientKind::Catalog, 429) => Some("Rate limit exceeded - too many requests"),
            (ClientKind::Auth, 500..) => Some("Server error - please try again later"),
            (ClientKind::Catalog, 500..) => Some("TMDb server error"),
            _ => None,
        }
    }
}

/// 错误响应体里可能携带的服务端消息
///
/// 内部接口使用 `message`，TMDb 使用 `status_message`。
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "status_message")]
    message: Option<String>,
}

pub(crate) fn server_message(resp: &HttpResponse) -> Option<String> {
    resp.json::<ErrorBody>()
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}

/// 已配置的接口客户端
pub struct ApiClient<C: HttpClient> {
    http: Rc<C>,
    kind: ClientKind,
    base_url: String,
    default_query: Vec<(String, String)>,
    bearer: Option<Rc<dyn TokenStore>>,
    timeout: Duration,
}

impl<C: HttpClient> ApiClient<C> {
    /// 内部认证接口客户端
    pub fn auth(http: Rc<C>, config: &AppConfig, tokens: Rc<dyn TokenStore>) -> Self {
        Self {
            http,
            kind: ClientKind::Auth,
            base_url: config.auth_base_url.clone(),
            default_query: Vec::new(),
            bearer: Some(tokens),
            timeout: config.request_timeout,
        }
    }

    /// 外部目录接口客户端
    pub fn catalog(http: Rc<C>, config: &AppConfig) -> Self {
        Self {
            http,
            kind: ClientKind::Catalog,
            base_url: config.catalog_base_url.clone(),
            default_query: vec![
                ("api_key".to_string(), config.catalog_api_key.clone()),
                ("language".to_string(), config.language_tag.clone()),
            ],
            bearer: None,
            timeout: config.request_timeout,
        }
    }

    fn build<R: ApiRequest>(&self, request: &R) -> Result<HttpRequest, HttpError> {
        let url = format!("{}{}", self.base_url, R::PATH);
        let mut req = HttpRequest::new(&url, R::METHOD)
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json")
            .with_timeout(self.timeout);

        if let Some(token) = self.bearer.as_ref().and_then(|store| store.get()) {
            req = req.with_header("Authorization", &format!("Bearer {}", token));
        }

        for (key, value) in request.query() {
            req = req.with_query(key, &value);
        }
        for (key, value) in &self.default_query {
            req = req.with_query(key, value);
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(request)
                .map_err(|e| HttpError::RequestBuild(e.to_string()))?;
            if body != "null" {
                req = req.with_body(body);
            }
        }

        Ok(req)
    }

    /// 发送请求并返回原始响应（任意状态码）
    ///
    /// 只有传输层失败才返回错误；状态码由调用方解释。
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<HttpResponse, ApiError> {
        let label = self.kind.label();
        let req = self.build(request).inspect_err(|e| {
            log::error!("{} Request Error: {}", label, e);
        })?;

        log::debug!("{} {} {}", label, req.method.as_str(), R::PATH);

        let resp = self.http.send(req).await.inspect_err(|e| {
            log::error!("{} Response Error: {}", label, e);
        })?;

        if resp.ok() {
            log::debug!("{} Response {}", label, resp.status);
        } else {
            log::warn!("{} Response Error {}: {}", label, resp.status, resp.body);
            if let Some(diagnosis) = self.kind.diagnose(resp.status) {
                log::error!("{}", diagnosis);
            }
        }

        Ok(resp)
    }

    /// 发送请求，要求 2xx 并解析为端点声明的响应类型
    pub async fn fetch<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let resp = self.send(request).await?;
        if !resp.ok() {
            return Err(ApiError::Status {
                status: resp.status,
                message: server_message(&resp),
            });
        }
        Ok(resp.json::<R::Response>()?)
    }
}

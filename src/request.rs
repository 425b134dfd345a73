use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::HttpError;

pub use tenpo_movies_shared::protocol::HttpMethod;

#[cfg(test)]
use std::cell::RefCell;

/// 统一的请求超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 拼接查询参数后的完整 URL
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }

        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, query)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 浏览器里的 fetch 返回的 Future 不是 Send 的，因此使用 (?Send)。
/// 实现方负责遵守 `HttpRequest::timeout`，超时以 `HttpError::Timeout` 返回。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // 完整 URL -> 按顺序出队的响应；队列只剩一个时重复使用
    responses: RefCell<HashMap<String, Vec<Result<HttpResponse, HttpError>>>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.push(
            url,
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn mock_raw(&self, url: &str, status: u16, body: &str) {
        self.push(
            url,
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn mock_error(&self, url: &str, error: HttpError) {
        self.push(url, Err(error));
    }

    fn push(&self, url: &str, response: Result<HttpResponse, HttpError>) {
        self.responses
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push(response);
    }

    pub fn request_urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.full_url()).collect()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = req.full_url();
        self.requests.borrow_mut().push(req);

        let mut responses = self.responses.borrow_mut();
        match responses.get_mut(&url) {
            Some(queue) if queue.len() > 1 => queue.remove(0),
            Some(queue) if queue.len() == 1 => queue[0].clone(),
            _ => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_encodes_query() {
        let req = HttpRequest::new("https://api.example.com/3/movie/popular", HttpMethod::Get)
            .with_query("page", "2")
            .with_query("language", "es-CL")
            .with_query("api_key", "a b&c");
        assert_eq!(
            req.full_url(),
            "https://api.example.com/3/movie/popular?page=2&language=es-CL&api_key=a+b%26c"
        );
    }

    #[test]
    fn test_full_url_without_query() {
        let req = HttpRequest::new("/v1/auth/sign-in", HttpMethod::Post);
        assert_eq!(req.full_url(), "/v1/auth/sign-in");
        assert_eq!(req.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_response_ok_range() {
        let ok = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let bad = HttpResponse {
            status: 400,
            body: String::new(),
        };
        assert!(ok.ok());
        assert!(!bad.ok());
    }
}

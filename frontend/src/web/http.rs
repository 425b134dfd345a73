//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient`。
//! 超时通过 `AbortController` 实现：计时器先到就中止 fetch 并返回 `HttpError::Timeout`。

use std::pin::pin;

use futures::future::{Either, select};
use gloo_timers::future::TimeoutFuture;
use tenpo_movies::HttpError;
use tenpo_movies::request::{HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, Headers, Request, RequestInit, Response};

fn js_error(e: JsValue) -> String {
    e.as_string()
        .or_else(|| {
            e.dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{:?}", e))
}

/// 基于浏览器 fetch 的 HTTP 客户端
#[derive(Clone, Copy, Default)]
pub struct WebHttpClient;

impl WebHttpClient {
    pub fn new() -> Self {
        Self
    }

    fn build_request(req: &HttpRequest, signal: &AbortSignal) -> Result<Request, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuild(format!("Headers: {}", js_error(e))))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuild(format!("header {}: {}", key, js_error(e))))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        opts.set_signal(Some(signal));

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.full_url(), &opts)
            .map_err(|e| HttpError::RequestBuild(js_error(e)))
    }

    async fn execute(request: Request) -> Result<HttpResponse, HttpError> {
        let window = web_sys::window()
            .ok_or_else(|| HttpError::Network("window is not available".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::Network(js_error(e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::Decode(format!("not a Response: {}", js_error(e))))?;

        let status = response.status();
        let promise = response
            .text()
            .map_err(|e| HttpError::Decode(js_error(e)))?;
        let body = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::Network(js_error(e)))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for WebHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let controller = AbortController::new()
            .map_err(|e| HttpError::RequestBuild(format!("AbortController: {}", js_error(e))))?;
        let request = Self::build_request(&req, &controller.signal())?;

        let millis = u32::try_from(req.timeout.as_millis()).unwrap_or(u32::MAX);
        let fetch = pin!(Self::execute(request));
        let timer = pin!(TimeoutFuture::new(millis));

        match select(fetch, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => {
                controller.abort();
                Err(HttpError::Timeout(req.timeout.as_secs()))
            }
        }
    }
}

//! 原生 Web API 封装模块
//!
//! 对浏览器原生 API 的轻量级封装，实现核心库的 `HttpClient` / `TokenStore`，
//! 以及路由、语言检测和可见性观察。

mod http;
mod locale;
mod observer;
pub mod router;
mod storage;

pub use http::WebHttpClient;
pub use locale::browser_language;
pub use observer::VisibilityObserver;
pub use storage::CookieTokenStore;

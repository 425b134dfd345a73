//! 电影目录客户端核心
//!
//! 与平台无关的业务层：会话、分页加载、路由守卫、接口客户端。
//! 浏览器相关的部分（fetch、Cookie、IntersectionObserver、视图）在 `frontend` 包中，
//! 通过 `HttpClient` / `TokenStore` 两个 trait 接入。

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod gateway;
pub mod i18n;
pub mod request;
pub mod route;
pub mod session;
pub mod token;

pub use config::AppConfig;
pub use error::{ApiError, AuthError, HttpError};
pub use feed::{FeedState, FeedTask, PageFeed};
pub use gateway::{AuthGateway, AuthService, CatalogGateway, PageSource};
pub use route::{AppRoute, RouteDecision};
pub use session::{Session, SessionState};
pub use token::TokenStore;

pub use tenpo_movies_shared as shared;

//! 电影目录前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web::router`: 路由服务（History API + 核心库的路由守卫）
//! - `auth`: 会话上下文
//! - `catalog`: 目录网关上下文
//! - `components`: UI 组件层

mod auth;
mod catalog;
mod components {
    pub mod home;
    mod icons;
    pub mod login;
    mod movie_card;
    mod movie_list;
}

use std::rc::Rc;

use leptos::prelude::*;
use tenpo_movies::api::ApiClient;
use tenpo_movies::route::AppRoute;
use tenpo_movies::{AppConfig, AuthGateway, CatalogGateway, Session};
use tenpo_movies_shared::Locale;

use crate::auth::AuthContext;
use crate::catalog::CatalogContext;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;

// 原生 Web API 封装模块
pub(crate) mod web;

use web::router::{Router, RouterOutlet};
use web::{CookieTokenStore, WebHttpClient, browser_language};

/// 当前界面语言，缺省为西班牙语
pub(crate) fn use_locale() -> Locale {
    use_context::<Locale>().unwrap_or_default()
}

/// 构建期 `.env` 注入的配置 + 浏览器语言
fn load_config() -> AppConfig {
    let config = AppConfig::from_values(
        option_env!("AUTH_BASE_URL"),
        option_env!("TMDB_BASE_URL"),
        option_env!("TMDB_API_KEY"),
    )
    .with_language(browser_language());

    log::info!(
        "[App] locale={} auth={} catalog={}",
        config.language_tag,
        config.auth_base_url,
        config.catalog_base_url
    );
    if config.catalog_api_key.is_empty() {
        log::warn!("[App] TMDB_API_KEY is not set, catalog requests will fail");
    }
    config
}

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        // 守卫总会把未知路径重定向走
        AppRoute::NotFound => ().into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    provide_context(config.locale);

    // 两个客户端共用同一个 fetch 实现
    let http = Rc::new(WebHttpClient::new());

    // 1. 会话：初始状态由 Cookie 中是否有令牌决定
    let auth_api = ApiClient::auth(http.clone(), &config, Rc::new(CookieTokenStore));
    let session = Session::new(AuthGateway::new(auth_api), CookieTokenStore);
    let auth_ctx = AuthContext::new(session);
    provide_context(auth_ctx);

    // 2. 目录
    let catalog = CatalogGateway::new(ApiClient::catalog(http, &config));
    provide_context(CatalogContext::new(catalog));

    view! {
        // 3. 路由器：注入会话信号实现守卫
        <Router session=auth_ctx.session_signal()>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}

//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的路由、路由属性以及认证守卫的判定。

use std::fmt::Display;

use crate::session::SessionState;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 电影列表首页 (需要认证)
    Home,
    /// 未知路径
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/login" => Self::Login,
            "/" => Self::Home,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Home => "/",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// 已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(AppRoute),
    Redirect(AppRoute),
}

/// 根据当前会话状态决定渲染目标路由还是重定向
///
/// 未知路径没有页面可渲染：匿名用户去登录页，已认证用户回首页。
pub fn guard(route: &AppRoute, state: SessionState) -> RouteDecision {
    let authenticated = state.is_authenticated();

    if *route == AppRoute::NotFound {
        return RouteDecision::Redirect(if authenticated {
            AppRoute::auth_success_redirect()
        } else {
            AppRoute::auth_failure_redirect()
        });
    }
    if route.requires_auth() && !authenticated {
        return RouteDecision::Redirect(AppRoute::auth_failure_redirect());
    }
    if route.should_redirect_when_authenticated() && authenticated {
        return RouteDecision::Redirect(AppRoute::auth_success_redirect());
    }
    RouteDecision::Render(route.clone())
}

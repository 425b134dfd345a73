//! 认证模块
//!
//! 把核心库的 `Session` 包装为可放入 Context 的 `Copy` 句柄。
//! 路由服务只依赖这里导出的会话状态信号，与认证流程本身解耦。

use std::rc::Rc;

use leptos::prelude::*;
use tenpo_movies::{AuthError, AuthGateway, Session, SessionState};
use tenpo_movies_shared::Credentials;

use crate::web::{CookieTokenStore, WebHttpClient};

pub type AppSession = Session<AuthGateway<WebHttpClient>, CookieTokenStore>;

/// 认证上下文
///
/// `Session` 不是 `Send` 的，放在本地存储的 `StoredValue` 中；
/// 状态通过订阅同步到信号上供视图读取。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    session: StoredValue<Rc<AppSession>, LocalStorage>,
}

impl AuthContext {
    pub fn new(session: AppSession) -> Self {
        let (state, set_state) = signal(session.state());
        session.subscribe(move |next| set_state.set(next));

        Self {
            state,
            session: StoredValue::new_local(Rc::new(session)),
        }
    }

    /// 会话状态信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<SessionState> {
        self.state.into()
    }

    /// 登录
    ///
    /// 成功后的跳转由路由服务监听会话状态完成。
    pub async fn login(&self, credentials: Credentials) -> Result<(), AuthError> {
        let session = self.session.get_value();
        session.login(&credentials).await
    }

    /// 注销并清除令牌
    pub async fn logout(&self) {
        let session = self.session.get_value();
        session.logout().await;
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

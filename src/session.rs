//! 会话状态
//!
//! 内存中的认证状态，启动时由令牌是否存在决定初始值，之后只被登录成功（→ 已认证）
//! 和注销（→ 匿名）改变。视图通过上下文显式持有它，而不是依赖全局单例。

use std::cell::{Cell, RefCell};

use tenpo_movies_shared::Credentials;

use crate::error::AuthError;
use crate::gateway::AuthService;
use crate::token::TokenStore;

/// 认证状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

type Listener = Box<dyn Fn(SessionState)>;

/// 登录进行中的标记，离开作用域（包括 Future 被提前 drop）时自动清除
struct PendingGuard<'a>(&'a Cell<bool>);

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct Session<A: AuthService, T: TokenStore> {
    auth: A,
    tokens: T,
    state: Cell<SessionState>,
    login_pending: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

impl<A: AuthService, T: TokenStore> Session<A, T> {
    /// 根据令牌是否存在决定初始状态
    pub fn new(auth: A, tokens: T) -> Self {
        let state = if tokens.get().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        log::debug!("[Session] initial state: {:?}", state);

        Self {
            auth,
            tokens,
            state: Cell::new(state),
            login_pending: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn is_login_pending(&self) -> bool {
        self.login_pending.get()
    }

    pub fn subscribe(&self, listener: impl Fn(SessionState) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// 登录
    ///
    /// 成功时持久化令牌并切换为已认证；服务端拒绝或传输失败时保持匿名并返回错误。
    /// 已有登录在途时直接返回 `AuthError::LoginPending`，不发起请求。
    pub async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let Some(_pending) = PendingGuard::acquire(&self.login_pending) else {
            log::debug!("[Session] sign-in already pending, ignoring");
            return Err(AuthError::LoginPending);
        };

        match self.auth.login(credentials).await {
            Ok(token) => {
                self.tokens.set(&token);
                log::info!("[Session] signed in");
                self.transition(SessionState::Authenticated);
                Ok(())
            }
            Err(e) => {
                log::warn!("[Session] sign-in failed: {}", e);
                Err(e)
            }
        }
    }

    /// 注销
    ///
    /// 服务端注销只是尽力而为：失败时仅记录日志，本地令牌照样清除，状态无条件变为匿名。
    pub async fn logout(&self) {
        if let Err(e) = self.auth.logout().await {
            log::warn!("[Session] sign-out request failed, clearing local session anyway: {}", e);
        }
        self.tokens.remove();
        log::info!("[Session] signed out");
        self.transition(SessionState::Anonymous);
    }

    fn transition(&self, next: SessionState) {
        if self.state.replace(next) == next {
            return;
        }
        for listener in self.listeners.borrow().iter() {
            listener(next);
        }
    }
}

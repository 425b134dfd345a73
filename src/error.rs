use thiserror::Error;

use crate::i18n::{Message, t};
use tenpo_movies_shared::Locale;

// =========================================================
// 传输层错误 (HttpClient 边界)
// =========================================================

/// HTTP 客户端错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("request build failed: {0}")]
    RequestBuild(String),
    /// 网络请求失败
    #[error("{0}")]
    Network(String),
    /// 超过请求超时时间
    #[error("request timed out after {0}s")]
    Timeout(u64),
    /// 响应体读取或解析失败
    #[error("response decode failed: {0}")]
    Decode(String),
}

// =========================================================
// 接口层错误 (Gateway 边界)
// =========================================================

/// 调用后端接口的失败
///
/// 业务上的拒绝（`success: false`）不在这里，由 `AuthError::Rejected` 表示。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),
    /// 非 2xx 响应；若响应体里带有服务端消息则一并保留
    #[error("{}", status_text(*status, message.as_deref()))]
    Status { status: u16, message: Option<String> },
}

fn status_text(status: u16, message: Option<&str>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!("HTTP {}: {}", status, m),
        _ => format!("HTTP {}", status),
    }
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(_) => None,
        }
    }

    /// 服务端给出的消息（如果有）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(m), ..
            } if !m.is_empty() => Some(m),
            _ => None,
        }
    }

    /// 面向用户的文本：优先服务端消息，否则使用本地化的通用提示
    pub fn user_message(&self, locale: Locale) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| t(locale, Message::GenericError).to_string())
    }
}

// =========================================================
// 认证错误 (Session 边界)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// 服务端拒绝（`success: false`），消息原样展示
    #[error("sign-in rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(#[from] ApiError),
    /// 已有一个登录请求在途，本次调用被忽略
    #[error("a sign-in request is already pending")]
    LoginPending,
}

impl AuthError {
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            AuthError::Rejected(message) if !message.is_empty() => message.clone(),
            AuthError::Rejected(_) => t(locale, Message::LoginFailed).to_string(),
            AuthError::Transport(e) => e.user_message(locale),
            AuthError::LoginPending => t(locale, Message::SigningIn).to_string(),
        }
    }
}

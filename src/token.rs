//! 认证令牌存储
//!
//! `TokenStore` 是令牌持久化的唯一入口；浏览器端实现基于 Cookie，
//! 本模块同时提供 Cookie 字符串的编解码，便于在宿主机上测试。

use std::cell::RefCell;
use std::rc::Rc;

use url::form_urlencoded;

use tenpo_movies_shared::{TOKEN_COOKIE_NAME, TOKEN_TTL_DAYS};

/// 令牌存储
///
/// 令牌存在即视为"已认证"，不做任何签名或过期校验。
pub trait TokenStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn remove(&self);
}

/// 内存实现，克隆后共享同一份数据
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn remove(&self) {
        *self.token.borrow_mut() = None;
    }
}

// =========================================================
// Cookie 编解码
// =========================================================

/// 令牌 Cookie 的有效期（秒）
pub const TOKEN_MAX_AGE_SECS: u64 = TOKEN_TTL_DAYS as u64 * 24 * 60 * 60;

fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn decode_value(raw: &str) -> String {
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(k, v)| if v.is_empty() { k.into_owned() } else { format!("{}={}", k, v) })
        .unwrap_or_default()
}

/// 从 `document.cookie` 形式的字符串中读取指定 Cookie
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| decode_value(v))
        .filter(|v| !v.is_empty())
}

/// 写入令牌的 Cookie 指令
pub fn token_cookie(token: &str) -> String {
    format!(
        "{}={}; max-age={}; path=/; SameSite=Lax",
        TOKEN_COOKIE_NAME,
        encode_value(token),
        TOKEN_MAX_AGE_SECS
    )
}

/// 删除令牌的 Cookie 指令
pub fn expired_token_cookie() -> String {
    format!("{}=; max-age=0; path=/; SameSite=Lax", TOKEN_COOKIE_NAME)
}

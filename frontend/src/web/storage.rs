//! Cookie 令牌存储
//!
//! 使用 `web_sys::HtmlDocument::cookie` 实现 `TokenStore`；
//! Cookie 字符串的编解码由核心库的 `token` 模块负责。

use tenpo_movies::TokenStore;
use tenpo_movies::token::{expired_token_cookie, read_cookie, token_cookie};
use tenpo_movies_shared::TOKEN_COOKIE_NAME;
use wasm_bindgen::JsCast;

/// 基于 `document.cookie` 的令牌存储
#[derive(Clone, Copy, Default)]
pub struct CookieTokenStore;

impl CookieTokenStore {
    fn document() -> Option<web_sys::HtmlDocument> {
        web_sys::window()?.document()?.dyn_into().ok()
    }

    fn write(directive: &str) {
        let written = Self::document().and_then(|doc| doc.set_cookie(directive).ok());
        if written.is_none() {
            log::warn!("[Token] failed to write cookie {}", TOKEN_COOKIE_NAME);
        }
    }
}

impl TokenStore for CookieTokenStore {
    fn get(&self) -> Option<String> {
        let cookies = Self::document()?.cookie().ok()?;
        read_cookie(&cookies, TOKEN_COOKIE_NAME)
    }

    fn set(&self, token: &str) {
        Self::write(&token_cookie(token));
    }

    fn remove(&self) {
        Self::write(&expired_token_cookie());
    }
}

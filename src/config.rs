use std::time::Duration;

use tenpo_movies_shared::Locale;

use crate::request::DEFAULT_TIMEOUT;

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，构建时 `.env` 里没有定义的项使用它们
pub const DEFAULT_AUTH_BASE_URL: &str = "/v1/auth";
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.themoviedb.org/3";

/// 应用配置
///
/// 两个接口客户端共用同一个超时；`language_tag` 原样传给目录 API，
/// `locale` 只决定界面文案。
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub auth_base_url: String,
    pub catalog_base_url: String,
    pub catalog_api_key: String,
    pub language_tag: String,
    pub locale: Locale,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            catalog_api_key: String::new(),
            language_tag: Locale::default().as_tag().to_string(),
            locale: Locale::default(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// 由构建期变量组装配置，空值或缺失时回退到默认值
    pub fn from_values(
        auth_base_url: Option<&str>,
        catalog_base_url: Option<&str>,
        catalog_api_key: Option<&str>,
    ) -> Self {
        fn non_empty(v: Option<&str>) -> Option<String> {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.trim_end_matches('/').to_string())
        }

        let defaults = Self::default();
        Self {
            auth_base_url: non_empty(auth_base_url).unwrap_or(defaults.auth_base_url),
            catalog_base_url: non_empty(catalog_base_url).unwrap_or(defaults.catalog_base_url),
            catalog_api_key: catalog_api_key.map(str::trim).unwrap_or_default().to_string(),
            ..defaults
        }
    }

    /// 设置浏览器语言；没有可用语言时保持默认
    pub fn with_language(mut self, tag: Option<String>) -> Self {
        if let Some(tag) = tag.filter(|t| !t.trim().is_empty()) {
            self.locale = Locale::from_tag(&tag);
            self.language_tag = tag;
        }
        self
    }
}

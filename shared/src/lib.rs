use serde::{Deserialize, Serialize};

pub mod date;
pub mod locale;
pub mod number;
pub mod protocol;

pub use locale::Locale;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 认证令牌所在的 Cookie 名称
pub const TOKEN_COOKIE_NAME: &str = "_tenpo_token";
/// 认证令牌有效期（天）
pub const TOKEN_TTL_DAYS: u32 = 7;
/// 海报图片的 CDN 前缀（w500 尺寸）
pub const POSTER_BASE_URL: &str = "https://media.themoviedb.org/t/p/w500";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 目录 API 返回的一部电影
///
/// 前八个字段是页面实际使用的部分，其余为 TMDb 附带的元数据，
/// 缺失时取默认值，避免不同数据源之间的差异导致整页解析失败。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,

    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub video: bool,
}

impl Movie {
    /// 将 0-10 的平均分换算为 0-100 的整数百分比
    pub fn rating_percent(&self) -> u8 {
        (self.vote_average * 10.0).round().clamp(0.0, 100.0) as u8
    }

    pub fn rating_tier(&self) -> RatingTier {
        RatingTier::from_percent(self.rating_percent())
    }

    /// 海报完整地址，没有海报时返回 None
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", POSTER_BASE_URL, p))
    }
}

/// 评分徽章的分档
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    High,
    Medium,
    Low,
}

impl RatingTier {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            70..=u8::MAX => RatingTier::High,
            50..=69 => RatingTier::Medium,
            _ => RatingTier::Low,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RatingTier::High => "bg-green-600",
            RatingTier::Medium => "bg-yellow-600",
            RatingTier::Low => "bg-red-600",
        }
    }
}

/// 一页目录结果及分页元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl Page {
    /// 是否还有下一页：`page < total_pages`
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// 登录凭据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthData {
    pub token: String,
}

/// 认证接口的统一响应包
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<AuthData>,
}

impl AuthResponse {
    /// 非空令牌（仅在 success 时有意义）
    pub fn token(&self) -> Option<&str> {
        self.data
            .as_ref()
            .map(|d| d.token.as_str())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie(vote_average: f64) -> Movie {
        serde_json::from_value(json!({
            "id": 1,
            "title": "Dune",
            "vote_average": vote_average,
        }))
        .unwrap()
    }

    #[test]
    fn test_movie_tolerates_missing_optional_fields() {
        let m = movie(7.8);
        assert_eq!(m.overview, "");
        assert_eq!(m.poster_path, None);
        assert!(m.genre_ids.is_empty());
    }

    #[test]
    fn test_movie_null_poster_path() {
        let m: Movie = serde_json::from_value(json!({
            "id": 2,
            "title": "Heat",
            "poster_path": null,
            "release_date": "1995-12-15",
            "vote_average": 7.9,
            "vote_count": 7000
        }))
        .unwrap();
        assert_eq!(m.poster_url(), None);
        assert_eq!(m.vote_count, 7000);
    }

    #[test]
    fn test_poster_url() {
        let mut m = movie(5.0);
        m.poster_path = Some("/abc.jpg".to_string());
        assert_eq!(
            m.poster_url().as_deref(),
            Some("https://media.themoviedb.org/t/p/w500/abc.jpg")
        );
    }

    #[test]
    fn test_rating_percent_and_tier() {
        assert_eq!(movie(7.25).rating_percent(), 73);
        assert_eq!(movie(7.25).rating_tier(), RatingTier::High);
        assert_eq!(movie(7.0).rating_tier(), RatingTier::High);
        assert_eq!(movie(6.94).rating_tier(), RatingTier::Medium);
        assert_eq!(movie(5.0).rating_tier(), RatingTier::Medium);
        assert_eq!(movie(4.9).rating_tier(), RatingTier::Low);
        assert_eq!(movie(0.0).rating_percent(), 0);
        assert_eq!(movie(10.0).rating_percent(), 100);
    }

    #[test]
    fn test_page_has_next() {
        let page: Page = serde_json::from_value(json!({
            "page": 1,
            "results": [],
            "total_pages": 3,
            "total_results": 60
        }))
        .unwrap();
        assert!(page.has_next());

        let last = Page { page: 3, ..page };
        assert!(!last.has_next());
    }

    #[test]
    fn test_auth_response_token() {
        let ok: AuthResponse = serde_json::from_value(json!({
            "success": true,
            "message": "",
            "data": { "token": "abc" }
        }))
        .unwrap();
        assert_eq!(ok.token(), Some("abc"));

        let rejected: AuthResponse = serde_json::from_value(json!({
            "success": false,
            "message": "Email or password wrong",
            "data": null
        }))
        .unwrap();
        assert_eq!(rejected.token(), None);

        let empty: AuthResponse = serde_json::from_value(json!({
            "success": true,
            "data": { "token": "" }
        }))
        .unwrap();
        assert_eq!(empty.token(), None);
        assert_eq!(empty.message, "");
    }
}

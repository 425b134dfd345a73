//! 业务网关
//!
//! 把接口响应翻译成类型化的结果：
//! - `CatalogGateway`：获取一页热门电影
//! - `AuthGateway`：登录、注销

use std::rc::Rc;

use tenpo_movies_shared::protocol::{PopularMoviesRequest, SignOutRequest};
use tenpo_movies_shared::{AuthResponse, Credentials, Page};

use crate::api::{ApiClient, server_message};
use crate::error::{ApiError, AuthError};
use crate::request::HttpClient;

// =========================================================
// 目录网关
// =========================================================

/// 分页数据源：`页码 -> Page`
#[async_trait::async_trait(?Send)]
pub trait PageSource {
    async fn fetch_page(&self, page: u32) -> Result<Page, ApiError>;
}

pub struct CatalogGateway<C: HttpClient> {
    api: ApiClient<C>,
}

impl<C: HttpClient> CatalogGateway<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self { api }
    }

    /// 获取第 `page` 页热门电影
    pub async fn popular_movies(&self, page: u32) -> Result<Page, ApiError> {
        self.api.fetch(&PopularMoviesRequest { page }).await
    }
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient> PageSource for CatalogGateway<C> {
    async fn fetch_page(&self, page: u32) -> Result<Page, ApiError> {
        self.popular_movies(page).await
    }
}

#[async_trait::async_trait(?Send)]
impl<T: PageSource + ?Sized> PageSource for Rc<T> {
    async fn fetch_page(&self, page: u32) -> Result<Page, ApiError> {
        (**self).fetch_page(page).await
    }
}

// =========================================================
// 认证网关
// =========================================================

/// 认证服务
#[async_trait::async_trait(?Send)]
pub trait AuthService {
    /// 登录成功时返回令牌
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError>;
    async fn logout(&self) -> Result<(), ApiError>;
}

pub struct AuthGateway<C: HttpClient> {
    api: ApiClient<C>,
}

impl<C: HttpClient> AuthGateway<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient> AuthService for AuthGateway<C> {
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let resp = self.api.send(credentials).await?;

        // 5xx 一律视为传输错误；4xx 的响应体仍按业务响应解析（无效凭据返回 400）
        if resp.status >= 500 {
            return Err(ApiError::Status {
                status: resp.status,
                message: server_message(&resp),
            }
            .into());
        }

        let body = match resp.json::<AuthResponse>() {
            Ok(body) => body,
            Err(e) if resp.ok() => return Err(ApiError::from(e).into()),
            Err(_) => {
                return Err(ApiError::Status {
                    status: resp.status,
                    message: server_message(&resp),
                }
                .into());
            }
        };

        if !body.success {
            return Err(AuthError::Rejected(body.message));
        }

        match body.token() {
            Some(token) => Ok(token.to_string()),
            None => {
                log::warn!("[Auth API] sign-in succeeded without a token");
                Err(AuthError::Rejected(body.message))
            }
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let resp = self.api.send(&SignOutRequest).await?;
        if resp.ok() {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: resp.status,
                message: server_message(&resp),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::HttpError;
    use crate::request::MockHttpClient;
    use crate::token::MemoryTokenStore;
    use serde_json::json;
    use tenpo_movies_shared::Locale;

    const SIGN_IN: &str = "/v1/auth/sign-in";
    const SIGN_OUT: &str = "/v1/auth/sign-out";

    fn auth_gateway(http: &Rc<MockHttpClient>) -> AuthGateway<MockHttpClient> {
        let api = ApiClient::auth(
            http.clone(),
            &AppConfig::default(),
            Rc::new(MemoryTokenStore::new()),
        );
        AuthGateway::new(api)
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "leopoldo.henchoz@tenpo.cl".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success_returns_token() {
        let http = Rc::new(MockHttpClient::new());
        http.mock_response(
            SIGN_IN,
            200,
            json!({ "success": true, "message": "", "data": { "token": "abc" } }),
        );

        let token = auth_gateway(&http).login(&credentials()).await.unwrap();
        assert_eq!(token, "abc");
    }

    #[tokio::test]
    async fn test_login_400_is_business_rejection() {
        let http = Rc::new(MockHttpClient::new());
        http.mock_response(
            SIGN_IN,
            400,
            json!({ "success": false, "message": "Email or password wrong", "data": null }),
        );

        let err = auth_gateway(&http).login(&credentials()).await.unwrap_err();
        assert_eq!(err, AuthError::Rejected("Email or password wrong".to_string()));
    }

    #[tokio::test]
    async fn test_login_success_without_token_is_rejected() {
        let http = Rc::new(MockHttpClient::new());
        http.mock_response(
            SIGN_IN,
            200,
            json!({ "success": true, "message": "User created", "data": { "token": "" } }),
        );

        let err = auth_gateway(&http).login(&credentials()).await.unwrap_err();
        assert_eq!(err, AuthError::Rejected("User created".to_string()));
    }

    #[tokio::test]
    async fn test_login_server_error_is_transport() {
        let http = Rc::new(MockHttpClient::new());
        http.mock_raw(SIGN_IN, 502, "Bad Gateway");

        let err = auth_gateway(&http).login(&credentials()).await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Transport(ApiError::Status {
                status: 502,
                message: None
            })
        );
    }

    #[tokio::test]
    async fn test_login_unparseable_4xx_is_transport() {
        let http = Rc::new(MockHttpClient::new());
        // 未配置的 URL 返回 404 "Not Found"
        let err = auth_gateway(&http).login(&credentials()).await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Transport(ApiError::Status {
                status: 404,
                message: None
            })
        );
    }

    #[tokio::test]
    async fn test_login_4xx_keeps_server_message() {
        let http = Rc::new(MockHttpClient::new());
        http.mock_response(SIGN_IN, 429, json!({ "message": "Too many attempts" }));

        let err = auth_gateway(&http).login(&credentials()).await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Transport(ApiError::Status {
                status: 429,
                message: Some("Too many attempts".to_string())
            })
        );
        assert_eq!(err.user_message(Locale::Es), "Too many attempts");
    }

    #[tokio::test]
    async fn test_login_network_failure() {
        let http = Rc::new(MockHttpClient::new());
        http.mock_error(SIGN_IN, HttpError::Network("Failed to fetch".into()));

        let err = auth_gateway(&http).login(&credentials()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch");
    }

    #[tokio::test]
    async fn test_logout() {
        let http = Rc::new(MockHttpClient::new());
        http.mock_response(SIGN_OUT, 200, json!({ "success": true, "message": "", "data": null }));
        http.mock_raw(SIGN_OUT, 500, "");

        let gateway = auth_gateway(&http);
        assert!(gateway.logout().await.is_ok());
        // 队列剩下的 500 会被重复使用
        assert_eq!(gateway.logout().await.unwrap_err().status(), Some(500));
    }

    #[tokio::test]
    async fn test_catalog_gateway_fetches_requested_page() {
        let http = Rc::new(MockHttpClient::new());
        let config = AppConfig {
            catalog_api_key: "key".to_string(),
            ..AppConfig::default()
        };
        http.mock_response(
            "https://api.themoviedb.org/3/movie/popular?page=3&api_key=key&language=es",
            200,
            json!({
                "page": 3,
                "results": [{ "id": 7, "title": "Alien", "vote_average": 8.1 }],
                "total_pages": 10,
                "total_results": 200
            }),
        );

        let gateway = CatalogGateway::new(ApiClient::catalog(http, &config));
        let page = gateway.fetch_page(3).await.unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].title, "Alien");
        assert!(page.has_next());
    }
}

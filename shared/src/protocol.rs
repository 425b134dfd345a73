use crate::{AuthResponse, Credentials, Page};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// 该方法是否携带 JSON 请求体
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path, relative to the client's base URL.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Extra query parameters for this request (on top of the client defaults).
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// Catalog API
// =========================================================

/// Fetch one page of popular movies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularMoviesRequest {
    pub page: u32,
}

impl ApiRequest for PopularMoviesRequest {
    type Response = Page;
    const PATH: &'static str = "/movie/popular";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string())]
    }
}

// =========================================================
// Auth API
// =========================================================

/// Sign in with email and password
impl ApiRequest for Credentials {
    type Response = AuthResponse;
    const PATH: &'static str = "/sign-in";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Sign out. The body is ignored by the server; the response is only an ack.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SignOutRequest;

impl ApiRequest for SignOutRequest {
    type Response = serde::de::IgnoredAny;
    const PATH: &'static str = "/sign-out";
    const METHOD: HttpMethod = HttpMethod::Post;
}

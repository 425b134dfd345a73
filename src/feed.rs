//! 分页加载控制器
//!
//! 给定一个 `PageSource`，按页码严格递增、一次一页地拉取数据，
//! 把所有已到达的页拼接成一个不断增长的电影列表，并暴露加载/错误状态。
//!
//! 外部的"需要更多"信号（哨兵元素进入视口等）可以任意次数地调用
//! [`PageFeed::request_more`]：已有请求在途、已没有下一页、或控制器已被丢弃时，
//! 调用都是空操作。控制器本身不依赖任何执行器，`request_more` 同步地把请求标记为在途，
//! 然后把实际的拉取工作作为本地 Future 交给调用方去 spawn。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use tenpo_movies_shared::{Locale, Movie, Page};

use crate::error::ApiError;
use crate::gateway::PageSource;

/// 一次页面拉取任务，由调用方负责驱动
pub type FeedTask = LocalBoxFuture<'static, ()>;

/// 对外暴露的状态快照
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    /// 已加载的全部电影，按页码顺序拼接，不去重
    pub movies: Vec<Movie>,
    /// 列表为空且第 1 页请求在途
    pub is_loading_first_page: bool,
    /// 第 1 页之后的某页请求在途
    pub is_fetching_next_page: bool,
    /// 最近一次失败；下一次成功后清除
    pub error: Option<ApiError>,
    /// `last_page.page < last_page.total_pages`；尚未加载任何页时为 true
    pub has_more: bool,
    /// 最近一页报告的结果总数
    pub total_results: u64,
}

impl FeedState {
    fn new() -> Self {
        Self {
            movies: Vec::new(),
            is_loading_first_page: false,
            is_fetching_next_page: false,
            error: None,
            has_more: true,
            total_results: 0,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.is_loading_first_page || self.is_fetching_next_page
    }

    /// 最近一次失败的原始描述（日志、调试用）
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// 面向用户的错误文本：服务端消息，或本地化的通用提示
    pub fn user_error(&self, locale: Locale) -> Option<String> {
        self.error.as_ref().map(|e| e.user_message(locale))
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

type Listener = Box<dyn Fn(&FeedState)>;

struct FeedInner<S> {
    source: S,
    state: RefCell<FeedState>,
    /// 已成功加载的最大页码，0 表示尚未加载
    last_loaded_page: Cell<u32>,
    /// 在途请求的页码，同一时刻最多一个
    in_flight: Cell<Option<u32>>,
    discarded: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

impl<S: PageSource> FeedInner<S> {
    fn update(&self, f: impl FnOnce(&mut FeedState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            f(&mut state);
            state.clone()
        };
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }

    fn complete(&self, page: u32, result: Result<Page, ApiError>) {
        // 控制器已被丢弃，或这已不是当前在途的请求：忽略迟到的结果
        if self.discarded.get() {
            log::debug!("[PageFeed] discarded, ignoring page {}", page);
            return;
        }
        if self.in_flight.get() != Some(page) {
            log::debug!("[PageFeed] stale response for page {}", page);
            return;
        }
        self.in_flight.set(None);

        match result {
            Ok(data) => {
                log::debug!(
                    "[PageFeed] page {}/{} loaded ({} movies)",
                    data.page,
                    data.total_pages,
                    data.results.len()
                );
                self.last_loaded_page.set(page);
                let has_more = data.has_next();
                let total_results = data.total_results;
                self.update(|s| {
                    s.has_more = has_more;
                    s.total_results = total_results;
                    s.movies.extend(data.results);
                    s.error = None;
                    s.is_loading_first_page = false;
                    s.is_fetching_next_page = false;
                });
            }
            Err(e) => {
                log::warn!("[PageFeed] page {} failed: {}", page, e);
                self.update(|s| {
                    s.error = Some(e);
                    s.is_loading_first_page = false;
                    s.is_fetching_next_page = false;
                });
            }
        }
    }
}

/// 分页加载控制器
///
/// 持有者被 drop（视图卸载、查询变化）时自动调用 [`PageFeed::discard`]。
pub struct PageFeed<S: PageSource + 'static> {
    inner: Rc<FeedInner<S>>,
}

impl<S: PageSource + 'static> PageFeed<S> {
    /// 创建一个空的控制器，不发起任何请求
    pub fn new(source: S) -> Self {
        Self {
            inner: Rc::new(FeedInner {
                source,
                state: RefCell::new(FeedState::new()),
                last_loaded_page: Cell::new(0),
                in_flight: Cell::new(None),
                discarded: Cell::new(false),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// 创建控制器并立即请求第 1 页
    pub fn initialize(source: S) -> (Self, Option<FeedTask>) {
        let feed = Self::new(source);
        let task = feed.request_more();
        (feed, task)
    }

    /// 请求下一页
    ///
    /// 返回 `None` 表示本次调用是空操作；否则返回的任务必须被驱动完成，
    /// 在它完成之前后续调用都会被忽略。
    pub fn request_more(&self) -> Option<FeedTask> {
        let inner = &self.inner;
        if inner.discarded.get()
            || inner.in_flight.get().is_some()
            || !inner.state.borrow().has_more
        {
            return None;
        }

        let page = inner.last_loaded_page.get() + 1;
        inner.in_flight.set(Some(page));
        inner.update(|s| {
            if page == 1 {
                s.is_loading_first_page = true;
            } else {
                s.is_fetching_next_page = true;
            }
        });
        log::debug!("[PageFeed] requesting page {}", page);

        let inner = Rc::clone(&self.inner);
        Some(
            async move {
                let result = inner.source.fetch_page(page).await;
                inner.complete(page, result);
            }
            .boxed_local(),
        )
    }

    /// 当前状态快照
    pub fn state(&self) -> FeedState {
        self.inner.state.borrow().clone()
    }

    /// 下一次 `request_more` 会请求的页码
    pub fn next_page(&self) -> u32 {
        self.inner.last_loaded_page.get() + 1
    }

    /// 注册状态变化回调
    pub fn subscribe(&self, listener: impl Fn(&FeedState) + 'static) {
        self.inner.listeners.borrow_mut().push(Box::new(listener));
    }

    /// 丢弃控制器：之后到达的响应不再修改状态，`request_more` 永远是空操作
    pub fn discard(&self) {
        if !self.inner.discarded.replace(true) {
            self.inner.listeners.borrow_mut().clear();
        }
    }
}

impl<S: PageSource + 'static> Drop for PageFeed<S> {
    fn drop(&mut self) {
        self.discard();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use crate::i18n::{Message, t};
    use std::collections::HashMap;

    /// 按页码返回预设结果的数据源，并记录每一次调用
    struct ScriptedSource {
        pages: RefCell<HashMap<u32, Vec<Result<Page, ApiError>>>>,
        calls: Rc<RefCell<Vec<u32>>>,
    }

    impl ScriptedSource {
        fn new() -> (Self, Rc<RefCell<Vec<u32>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            let source = Self {
                pages: RefCell::new(HashMap::new()),
                calls: calls.clone(),
            };
            (source, calls)
        }

        fn with_pages(total_pages: u32, per_page: u64) -> (Self, Rc<RefCell<Vec<u32>>>) {
            let (source, calls) = Self::new();
            for n in 1..=total_pages {
                source.ok(make_page(n, total_pages, per_page));
            }
            (source, calls)
        }

        fn ok(&self, page: Page) {
            self.pages
                .borrow_mut()
                .entry(page.page)
                .or_default()
                .push(Ok(page));
        }

        fn fail(&self, page: u32, message: &str) {
            self.fail_with(page, HttpError::Network(message.to_string()).into());
        }

        fn fail_with(&self, page: u32, error: ApiError) {
            self.pages.borrow_mut().entry(page).or_default().push(Err(error));
        }
    }

    #[async_trait::async_trait(?Send)]
    impl PageSource for ScriptedSource {
        async fn fetch_page(&self, page: u32) -> Result<Page, ApiError> {
            self.calls.borrow_mut().push(page);
            let mut pages = self.pages.borrow_mut();
            match pages.get_mut(&page) {
                Some(queue) if !queue.is_empty() => queue.remove(0),
                _ => Err(ApiError::Status {
                    status: 404,
                    message: None,
                }),
            }
        }
    }

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: "2024-01-01".to_string(),
            vote_average: 7.0,
            vote_count: 10,
            popularity: 0.0,
            adult: false,
            original_language: "en".to_string(),
            original_title: format!("Movie {}", id),
            genre_ids: Vec::new(),
            video: false,
        }
    }

    fn make_page(page: u32, total_pages: u32, per_page: u64) -> Page {
        let start = (page as u64 - 1) * per_page;
        Page {
            page,
            results: (start + 1..=start + per_page).map(movie).collect(),
            total_pages,
            total_results: total_pages as u64 * per_page,
        }
    }

    fn ids(state: &FeedState) -> Vec<u64> {
        state.movies.iter().map(|m| m.id).collect()
    }

    #[tokio::test]
    async fn test_first_page_of_three() {
        let (source, _) = ScriptedSource::with_pages(3, 20);
        let (feed, task) = PageFeed::initialize(source);

        let state = feed.state();
        assert!(state.is_loading_first_page);
        assert!(!state.is_fetching_next_page);
        assert!(state.movies.is_empty());

        task.unwrap().await;

        let state = feed.state();
        assert!(state.has_more);
        assert_eq!(state.movies.len(), 20);
        assert!(!state.is_loading_first_page);
        assert!(!state.is_fetching_next_page);
        assert_eq!(state.error, None);
        assert_eq!(state.total_results, 60);
        assert_eq!(feed.next_page(), 2);
    }

    #[tokio::test]
    async fn test_repeated_signals_while_in_flight_issue_one_request() {
        let (source, calls) = ScriptedSource::with_pages(3, 2);
        let (feed, task) = PageFeed::initialize(source);

        for _ in 0..5 {
            assert!(feed.request_more().is_none());
        }
        task.unwrap().await;
        assert_eq!(*calls.borrow(), vec![1]);

        let task = feed.request_more().unwrap();
        assert!(feed.state().is_fetching_next_page);
        assert!(!feed.state().is_loading_first_page);
        for _ in 0..5 {
            assert!(feed.request_more().is_none());
        }
        task.await;

        assert_eq!(*calls.borrow(), vec![1, 2]);
        assert!(!feed.state().is_fetching_next_page);
    }

    #[tokio::test]
    async fn test_no_requests_after_last_page() {
        let (source, calls) = ScriptedSource::with_pages(2, 3);
        let (feed, task) = PageFeed::initialize(source);
        task.unwrap().await;
        feed.request_more().unwrap().await;

        assert!(!feed.state().has_more);
        for _ in 0..10 {
            assert!(feed.request_more().is_none());
        }
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_single_page_catalog_has_no_more() {
        let (source, calls) = ScriptedSource::with_pages(1, 4);
        let (feed, task) = PageFeed::initialize(source);
        task.unwrap().await;

        assert!(!feed.state().has_more);
        assert!(feed.request_more().is_none());
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[tokio::test]
    async fn test_accumulates_pages_in_order() {
        let (source, calls) = ScriptedSource::with_pages(4, 3);
        let (feed, task) = PageFeed::initialize(source);
        task.unwrap().await;
        while let Some(task) = feed.request_more() {
            task.await;
        }

        let state = feed.state();
        assert_eq!(*calls.borrow(), vec![1, 2, 3, 4]);
        assert_eq!(state.movies.len(), 12);
        assert_eq!(ids(&state), (1..=12).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_duplicates_across_pages_are_kept() {
        let (source, _) = ScriptedSource::new();
        source.ok(Page {
            page: 1,
            results: vec![movie(1), movie(2)],
            total_pages: 2,
            total_results: 4,
        });
        source.ok(Page {
            page: 2,
            results: vec![movie(2), movie(3)],
            total_pages: 2,
            total_results: 4,
        });

        let (feed, task) = PageFeed::initialize(source);
        task.unwrap().await;
        feed.request_more().unwrap().await;

        assert_eq!(ids(&feed.state()), vec![1, 2, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_keeps_result_and_allows_manual_retry() {
        let (source, calls) = ScriptedSource::new();
        source.ok(make_page(1, 3, 2));
        source.fail(2, "Network error");
        source.ok(make_page(2, 3, 2));

        let (feed, task) = PageFeed::initialize(source);
        task.unwrap().await;
        let before = feed.state().movies.clone();

        feed.request_more().unwrap().await;

        let state = feed.state();
        assert!(state.error_message().unwrap().contains("Network error"));
        assert_eq!(state.movies, before);
        assert!(!state.is_fetching_next_page);
        assert!(state.has_more);

        // 信号再次触发时重试同一页
        feed.request_more().unwrap().await;
        let state = feed.state();
        assert_eq!(*calls.borrow(), vec![1, 2, 2]);
        assert_eq!(state.movies.len(), 4);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_first_page_failure() {
        let (source, calls) = ScriptedSource::new();
        source.fail(1, "Failed to fetch");
        source.ok(make_page(1, 1, 1));

        let (feed, task) = PageFeed::initialize(source);
        task.unwrap().await;

        let state = feed.state();
        assert!(!state.is_loading_first_page);
        assert!(state.movies.is_empty());
        assert_eq!(state.error_message().as_deref(), Some("Failed to fetch"));

        feed.request_more().unwrap().await;
        assert_eq!(*calls.borrow(), vec![1, 1]);
        assert_eq!(feed.state().movies.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failures_use_localized_fallback() {
        let (source, _) = ScriptedSource::new();
        source.ok(make_page(1, 3, 1));
        source.fail_with(2, HttpError::Timeout(30).into());
        source.ok(make_page(2, 3, 1));
        source.fail_with(
            3,
            ApiError::Status {
                status: 503,
                message: None,
            },
        );

        let (feed, task) = PageFeed::initialize(source);
        task.unwrap().await;

        feed.request_more().unwrap().await;
        let state = feed.state();
        assert_eq!(state.error_message().as_deref(), Some("request timed out after 30s"));
        assert_eq!(
            state.user_error(Locale::Es).as_deref(),
            Some(t(Locale::Es, Message::GenericError))
        );

        feed.request_more().unwrap().await;
        assert_eq!(feed.state().user_error(Locale::Es), None);

        feed.request_more().unwrap().await;
        assert_eq!(
            feed.state().user_error(Locale::En).as_deref(),
            Some(t(Locale::En, Message::GenericError))
        );
    }

    #[tokio::test]
    async fn test_server_message_is_shown_to_user() {
        let (source, _) = ScriptedSource::new();
        source.fail_with(
            1,
            ApiError::Status {
                status: 401,
                message: Some("Invalid API key".to_string()),
            },
        );

        let (feed, task) = PageFeed::initialize(source);
        task.unwrap().await;

        assert_eq!(
            feed.state().user_error(Locale::Es).as_deref(),
            Some("Invalid API key")
        );
    }

    #[tokio::test]
    async fn test_discarded_controller_ignores_late_response() {
        let (source, calls) = ScriptedSource::with_pages(3, 2);
        let (feed, task) = PageFeed::initialize(source);

        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        feed.subscribe(move |_| counter.set(counter.get() + 1));

        feed.discard();
        task.unwrap().await;

        // 请求已经发出，但结果没有写入状态
        assert_eq!(*calls.borrow(), vec![1]);
        let state = feed.state();
        assert!(state.movies.is_empty());
        assert!(state.is_loading_first_page);
        assert_eq!(notified.get(), 0);
        assert!(feed.request_more().is_none());
    }

    #[tokio::test]
    async fn test_dropping_controller_discards_it() {
        let (source, calls) = ScriptedSource::with_pages(3, 2);
        let (feed, task) = PageFeed::initialize(source);

        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        feed.subscribe(move |_| counter.set(counter.get() + 1));

        drop(feed);
        task.unwrap().await;

        assert_eq!(*calls.borrow(), vec![1]);
        assert_eq!(notified.get(), 0);
    }

    #[tokio::test]
    async fn test_subscribers_see_every_transition() {
        let (source, _) = ScriptedSource::with_pages(2, 1);
        let seen: Rc<RefCell<Vec<(bool, bool, usize)>>> = Rc::new(RefCell::new(Vec::new()));
        let feed = PageFeed::new(source);
        let log = seen.clone();
        feed.subscribe(move |s| {
            log.borrow_mut().push((
                s.is_loading_first_page,
                s.is_fetching_next_page,
                s.movies.len(),
            ))
        });

        feed.request_more().unwrap().await;
        feed.request_more().unwrap().await;

        assert_eq!(
            *seen.borrow(),
            vec![
                (true, false, 0),
                (false, false, 1),
                (false, true, 1),
                (false, false, 2),
            ]
        );
    }
}

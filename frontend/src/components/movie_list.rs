use crate::catalog::{MovieFeed, use_catalog};
use crate::components::icons::AlertCircle;
use crate::components::movie_card::MovieCard;
use crate::use_locale;
use crate::web::VisibilityObserver;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tenpo_movies::i18n::{Message, t};

/// 哨兵元素可见比例达到该值时加载下一页
const SENTINEL_THRESHOLD: f64 = 0.1;

/// 热门电影列表（无限滚动）
///
/// 组件卸载时 `PageFeed` 随 StoredValue 一起被 drop，之后到达的响应会被丢弃。
#[component]
pub fn MovieList() -> impl IntoView {
    let locale = use_locale();

    let (feed, first_page) = use_catalog().popular_feed();
    let (state, set_state) = signal(feed.state());
    feed.subscribe(move |s| set_state.set(s.clone()));
    let feed = StoredValue::<MovieFeed, LocalStorage>::new_local(feed);

    if let Some(task) = first_page {
        spawn_local(task);
    }

    let load_more = move || {
        if let Some(task) = feed.try_with_value(|f| f.request_more()).flatten() {
            spawn_local(task);
        }
    };

    // 每次请求状态变化都重建观察者：新观察者会立即回报一次当前可见性，
    // 这样哨兵在一页加载完后仍在视口内时也能继续加载。
    // 出错后不自动重试，由错误提示里的按钮重新请求同一页。
    let sentinel = NodeRef::<html::Div>::new();
    let observer = StoredValue::<Option<VisibilityObserver>, LocalStorage>::new_local(None);

    Effect::new(move |_| {
        let ready = state.with(|s| s.has_more && !s.is_fetching() && s.error.is_none());
        let Some(el) = sentinel.get() else {
            return;
        };

        let next = if ready {
            VisibilityObserver::new(&el, SENTINEL_THRESHOLD, load_more)
        } else {
            None
        };
        observer.set_value(next);
    });

    let status = move || {
        state.with(|s| {
            if s.is_loading_first_page {
                view! {
                    <div class="flex flex-col items-center justify-center py-24 gap-4">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                        <p class="text-base-content/70">{t(locale, Message::MoviesLoading)}</p>
                    </div>
                }
                .into_any()
            } else if s.movies.is_empty() {
                match s.user_error(locale) {
                    Some(msg) => view! {
                        <div role="alert" class="alert alert-error">
                            <AlertCircle attr:class="shrink-0 h-6 w-6" />
                            <div>
                                <h3 class="font-bold">{t(locale, Message::MoviesErrorLoading)}</h3>
                                <div class="text-sm">{msg}</div>
                            </div>
                            <button class="btn btn-sm" on:click=move |_| load_more()>
                                {t(locale, Message::Retry)}
                            </button>
                        </div>
                    }
                    .into_any(),
                    None if !s.has_more => view! {
                        <div class="text-center py-24 text-base-content/60">
                            {t(locale, Message::MoviesEmpty)}
                        </div>
                    }
                    .into_any(),
                    None => ().into_any(),
                }
            } else {
                ().into_any()
            }
        })
    };

    view! {
        <div class="space-y-6">
            {status}

            <div class="grid grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-5 gap-6">
                // 不同页之间可能出现重复的电影，用位置作为 key
                <For
                    each=move || state.with(|s| s.movies.iter().cloned().enumerate().collect::<Vec<_>>())
                    key=|(index, _)| *index
                    children=|(_, movie)| view! { <MovieCard movie=movie /> }
                />
            </div>

            <Show when=move || state.with(|s| s.is_fetching_next_page)>
                <div class="flex items-center justify-center gap-3 py-6">
                    <span class="loading loading-spinner text-primary"></span>
                    <span class="text-base-content/70">{t(locale, Message::MoviesLoadingMore)}</span>
                </div>
            </Show>

            <Show when=move || state.with(|s| !s.movies.is_empty() && s.error.is_some())>
                <div role="alert" class="alert alert-warning">
                    <AlertCircle attr:class="shrink-0 h-6 w-6" />
                    <span>
                        {t(locale, Message::MoviesErrorLoading)} ": "
                        {move || state.with(|s| s.user_error(locale).unwrap_or_default())}
                    </span>
                    <button class="btn btn-sm" on:click=move |_| load_more()>
                        {t(locale, Message::Retry)}
                    </button>
                </div>
            </Show>

            <Show when=move || state.with(|s| !s.movies.is_empty() && !s.has_more)>
                <p class="text-center text-base-content/50 py-6">{t(locale, Message::MoviesEnd)}</p>
            </Show>

            <div node_ref=sentinel class="h-10" aria-hidden="true"></div>
        </div>
    }
}

use crate::auth::use_auth;
use crate::components::icons::{Film, LogOut};
use crate::components::movie_list::MovieList;
use crate::use_locale;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tenpo_movies::i18n::{Message, t};

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let locale = use_locale();
    let (is_leaving, set_is_leaving) = signal(false);

    // 注销总会回到匿名状态，路由服务随后重定向到登录页
    let on_logout = move |_| {
        set_is_leaving.set(true);
        spawn_local(async move {
            auth.logout().await;
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <Film attr:class="text-primary h-6 w-6" />
                        <div class="flex flex-col">
                            <span class="text-xl font-bold">{t(locale, Message::AppTitle)}</span>
                            <span class="text-sm text-base-content/60 hidden md:inline">
                                {t(locale, Message::AppSubtitle)}
                            </span>
                        </div>
                    </div>
                    <div class="flex-none">
                        <button
                            on:click=on_logout
                            class="btn btn-outline btn-error gap-2"
                            disabled=move || is_leaving.get()
                        >
                            <LogOut attr:class="h-4 w-4" />
                            {t(locale, Message::Logout)}
                        </button>
                    </div>
                </div>

                <MovieList />
            </div>
        </div>
    }
}

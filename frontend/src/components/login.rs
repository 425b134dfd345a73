use crate::auth::use_auth;
use crate::components::icons::{AlertCircle, Film};
use crate::use_locale;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tenpo_movies::AuthError;
use tenpo_movies::i18n::{Message, t};
use tenpo_movies_shared::Credentials;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let locale = use_locale();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 登录成功后的跳转由路由服务根据会话状态完成
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let credentials = Credentials {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match auth.login(credentials).await {
                Ok(()) | Err(AuthError::LoginPending) => {}
                Err(e) => set_error_msg.set(Some(e.user_message(locale))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Film attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">{t(locale, Message::WelcomeBack)}</h1>
                        <p class="text-base-content/70">{t(locale, Message::SignInSubtitle)}</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || error_msg.get().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <AlertCircle attr:class="shrink-0 h-6 w-6" />
                                <span>{msg}</span>
                            </div>
                        })}

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">{t(locale, Message::EmailLabel)}</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                autocomplete="email"
                                placeholder=t(locale, Message::EmailPlaceholder)
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">{t(locale, Message::PasswordLabel)}</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder=t(locale, Message::PasswordPlaceholder)
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! {
                                        <span class="loading loading-spinner"></span>
                                        {t(locale, Message::SigningIn)}
                                    }.into_any()
                                } else {
                                    t(locale, Message::SignIn).into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::top_header::language_switcher::LanguageSwitcher;
use crate::shared::locale::use_locale;
use crate::system::auth::context::{do_login, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let locale = use_locale();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (failed, set_failed) = signal(false);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();

        set_is_loading.set(true);
        set_failed.set(false);

        spawn_local(async move {
            // A successful login switches the root view to the main layout
            if let Err(e) = do_login(username_val, password_val, set_auth_state).await {
                log::warn!("Login failed: {}", e);
                set_failed.set(true);
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <div class="login-box__lang">
                    <LanguageSwitcher />
                </div>
                <h1>{move || locale.t("app.title")}</h1>
                <p class="login-box__company">{move || locale.t("app.company")}</p>
                <h2>{move || locale.t("login.title")}</h2>

                <Show when=move || failed.get()>
                    <div class="error-message">{move || locale.t("login.failed")}</div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">{move || locale.t("login.username")}</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{move || locale.t("login.password")}</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { locale.t("login.loading") } else { locale.t("login.submit") }}
                    </button>
                </form>
            </div>
        </div>
    }
}

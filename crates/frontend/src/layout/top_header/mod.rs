//! Application top bar: sidebar toggle, title, language, user and logout.

pub mod language_switcher;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::locale::use_locale;
use crate::system::auth::context::{do_logout, use_auth};
use language_switcher::LanguageSwitcher;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let locale = use_locale();
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button class="top-header__icon-btn" on:click=move |_| ctx.toggle_left()>
                    {icon("menu")}
                </button>
                {icon("droplet")}
                <span class="top-header__title">{move || locale.t("app.title")}</span>
            </div>

            <div class="top-header__actions">
                <LanguageSwitcher />

                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.get().user_info
                            .map(|u| u.full_name.unwrap_or(u.username))
                            .unwrap_or_default()}
                    </span>
                </div>

                <button
                    class="top-header__icon-btn"
                    on:click=logout
                    title=move || locale.t("nav.logout")
                >
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
